use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// Minimum number of options a question must offer.
pub const MIN_OPTIONS: usize = 2;

/// A single selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_id: String,
    pub explanation: String,
}

impl Question {
    /// Look up one of this question's options by id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == option_id)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.option(option_id).is_some()
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(&self.correct_option_id)
    }

    fn validate(&self) -> Result<(), QuestionSetError> {
        if self.options.len() < MIN_OPTIONS {
            return Err(QuestionSetError::TooFewOptions {
                question_id: self.id.clone(),
                count: self.options.len(),
            });
        }

        let mut seen = HashSet::with_capacity(self.options.len());
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(QuestionSetError::DuplicateOption {
                    question_id: self.id.clone(),
                    option_id: option.id.clone(),
                });
            }
        }

        if !self.has_option(&self.correct_option_id) {
            return Err(QuestionSetError::UnknownCorrectOption {
                question_id: self.id.clone(),
                correct_option_id: self.correct_option_id.clone(),
            });
        }

        Ok(())
    }
}

/// A titled, ordered list of questions making up one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionSet {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            questions,
        }
    }

    /// Check the dataset before a quiz is started on it.
    ///
    /// # Errors
    ///
    /// Returns the first defect found: an empty list, a question with fewer
    /// than two options, repeated option or question ids, or a correct
    /// option id that names none of the question's options.
    pub fn validate(&self) -> Result<(), QuestionSetError> {
        if self.questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(QuestionSetError::DuplicateQuestion(question.id.clone()));
            }
            question.validate()?;
        }

        Ok(())
    }
}

/// Defects in a question dataset, detected before a run starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionSetError {
    #[error("question set contains no questions")]
    Empty,

    #[error("question {question_id} has {count} option(s), at least 2 are required")]
    TooFewOptions { question_id: String, count: usize },

    #[error("question {question_id} repeats option id {option_id}")]
    DuplicateOption {
        question_id: String,
        option_id: String,
    },

    #[error(
        "question {question_id} names correct option {correct_option_id}, \
         which is not one of its options"
    )]
    UnknownCorrectOption {
        question_id: String,
        correct_option_id: String,
    },

    #[error("question id {0} is used more than once")]
    DuplicateQuestion(String),
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Question `id` with options `{id}-a`..`{id}-d`, `{id}-b` being correct.
    pub fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Prompt for {id}"),
            options: ["a", "b", "c", "d"]
                .iter()
                .map(|suffix| AnswerOption {
                    id: format!("{id}-{suffix}"),
                    text: format!("Option {suffix}"),
                })
                .collect(),
            correct_option_id: format!("{id}-b"),
            explanation: format!("Explanation for {id}"),
        }
    }

    pub fn question_set(count: usize) -> QuestionSet {
        QuestionSet::new(
            "Test Quiz",
            "A quiz used in tests.",
            (1..=count).map(|i| question(&format!("q{i}"))).collect(),
        )
    }
}
