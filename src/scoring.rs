//! Final score reporting: percentage, qualitative tier and the per-question
//! breakdown shown once a run is completed.

use serde::Serialize;

const EXCELLENT_THRESHOLD: u8 = 80;
const GOOD_THRESHOLD: u8 = 60;

/// `100 * score / total`, rounded half up.
///
/// Returns 0 when `total` is 0 and clamps `score` to `total`.
pub fn percentage(score: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let score = score.min(total);
    ((score * 200 + total) / (total * 2)) as u8
}

/// Qualitative band of a final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Excellent,
    Good,
    NeedsReview,
}

impl Tier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            p if p >= EXCELLENT_THRESHOLD => Tier::Excellent,
            p if p >= GOOD_THRESHOLD => Tier::Good,
            _ => Tier::NeedsReview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::NeedsReview => "Needs review",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent! You have a strong understanding of this topic.",
            Tier::Good => {
                "Good job! You have a solid grasp of the basics, but there's room for improvement."
            }
            Tier::NeedsReview => {
                "You might want to review this module again to strengthen your understanding."
            }
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub title: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u8,
    pub tier: Tier,
}

impl QuizSummary {
    pub fn new(title: impl Into<String>, score: usize, total: usize) -> Self {
        let percentage = percentage(score, total);
        Self {
            title: title.into(),
            score,
            total,
            percentage,
            tier: Tier::from_percentage(percentage),
        }
    }
}

/// How one question of a run was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord<'a> {
    pub question_id: &'a str,
    pub prompt: &'a str,
    pub chosen_text: &'a str,
    pub correct_text: &'a str,
    pub is_correct: bool,
}
