//! Quiz run state machine.
//!
//! A [`QuizEngine`] walks a fixed question list one question at a time:
//!
//! ```text
//! Answering --submit_answer--> Revealed --advance--> Answering (next question)
//!                                       \--advance--> Completed (after the last)
//! ```
//!
//! `restart` returns to `Answering` on the first question from any phase.
//! Calls that are not legal in the current phase are ignored and reported
//! back as `false`.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info, trace};

use crate::models::{AnswerOption, Question, QuestionSet, QuestionSetError};
use crate::scoring::{AnswerRecord, QuizSummary};

/// Invoked with `(score, total_questions)` when a run completes.
pub type CompletionCallback = Box<dyn FnMut(usize, usize)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No answer submitted yet for the current question.
    Answering,
    /// The answer is locked in; correctness and explanation are visible.
    Revealed,
    /// Every question has been answered.
    Completed,
}

/// What the host may show about an option once the answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// This is the correct option.
    Correct,
    /// The user picked this option and it is wrong.
    IncorrectPick,
    /// Neither correct nor picked.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub id: &'a str,
    pub text: &'a str,
    pub selected: bool,
    /// `None` until the answer has been submitted.
    pub reveal: Option<Reveal>,
}

/// Feedback shown right after an answer is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub correct: bool,
    pub explanation: &'a str,
}

pub struct QuizEngine {
    title: String,
    description: String,
    questions: Vec<Question>,
    on_complete: Option<CompletionCallback>,
    phase: Phase,
    current_index: usize,
    selected: Option<String>,
    score: usize,
    /// Question id to the option id submitted for it.
    answers: HashMap<String, String>,
}

impl QuizEngine {
    /// Start a run over `set`.
    ///
    /// # Errors
    ///
    /// Returns the dataset defect found by [`QuestionSet::validate`]; the
    /// engine is never constructed on an empty or inconsistent set.
    pub fn new(set: QuestionSet) -> Result<Self, QuestionSetError> {
        set.validate()?;
        let QuestionSet {
            title,
            description,
            questions,
        } = set;

        debug!(title = %title, questions = questions.len(), "quiz engine created");

        Ok(Self {
            answers: HashMap::with_capacity(questions.len()),
            title,
            description,
            questions,
            on_complete: None,
            phase: Phase::Answering,
            current_index: 0,
            selected: None,
            score: 0,
        })
    }

    /// Attach the callback invoked once each time a run completes.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnMut(usize, usize) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based position, for display.
    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// How far through the run the current question is, as a whole percent.
    pub fn progress_percent(&self) -> u16 {
        ((self.current_index + 1) * 100 / self.questions.len()) as u16
    }

    pub fn selected_option_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether a submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Answering && self.selected.is_some()
    }

    pub fn is_answer_submitted(&self) -> bool {
        self.phase == Phase::Revealed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// The current question's options with selection and reveal state.
    pub fn options(&self) -> Vec<OptionView<'_>> {
        let question = self.current_question();
        let revealed = self.phase == Phase::Revealed;

        question
            .options
            .iter()
            .map(|option| {
                let selected = self.selected.as_deref() == Some(option.id.as_str());
                let reveal = revealed.then(|| {
                    if question.is_correct(&option.id) {
                        Reveal::Correct
                    } else if selected {
                        Reveal::IncorrectPick
                    } else {
                        Reveal::Other
                    }
                });
                OptionView {
                    id: &option.id,
                    text: &option.text,
                    selected,
                    reveal,
                }
            })
            .collect()
    }

    /// Correctness and explanation for the submitted answer, while revealed.
    pub fn feedback(&self) -> Option<Feedback<'_>> {
        if self.phase != Phase::Revealed {
            return None;
        }
        let question = self.current_question();
        let correct = self
            .selected
            .as_deref()
            .is_some_and(|id| question.is_correct(id));

        Some(Feedback {
            correct,
            explanation: &question.explanation,
        })
    }

    /// Final result, available once the run is completed.
    pub fn summary(&self) -> Option<QuizSummary> {
        self.is_completed()
            .then(|| QuizSummary::new(&self.title, self.score, self.questions.len()))
    }

    /// Answered questions in question order.
    pub fn answer_breakdown(&self) -> Vec<AnswerRecord<'_>> {
        self.questions
            .iter()
            .filter_map(|question| {
                let chosen_id = self.answers.get(&question.id)?;
                Some(AnswerRecord {
                    question_id: &question.id,
                    prompt: &question.prompt,
                    chosen_text: option_text(question.option(chosen_id)),
                    correct_text: option_text(question.correct_option()),
                    is_correct: question.is_correct(chosen_id),
                })
            })
            .collect()
    }

    /// Provisionally select an option of the current question.
    ///
    /// Ignored unless answering, or when `option_id` is not one of the
    /// current question's options.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.phase != Phase::Answering {
            trace!(option_id, phase = ?self.phase, "selection ignored outside answering");
            return false;
        }
        if !self.current_question().has_option(option_id) {
            trace!(option_id, "selection ignored, unknown option");
            return false;
        }

        self.selected = Some(option_id.to_string());
        true
    }

    /// Lock in the selected option and reveal the result.
    ///
    /// The score is decided here, once per question.
    pub fn submit_answer(&mut self) -> bool {
        if self.phase != Phase::Answering {
            trace!(phase = ?self.phase, "submit ignored outside answering");
            return false;
        }
        let Some(selected) = self.selected.clone() else {
            trace!("submit ignored, nothing selected");
            return false;
        };

        let question = &self.questions[self.current_index];
        let correct = question.is_correct(&selected);
        self.answers.insert(question.id.clone(), selected);
        if correct {
            self.score += 1;
        }
        self.phase = Phase::Revealed;

        debug!(
            question = self.current_index,
            correct,
            score = self.score,
            "answer submitted"
        );
        true
    }

    /// Move past a revealed question, completing the run after the last.
    pub fn advance(&mut self) -> bool {
        if self.phase != Phase::Revealed {
            trace!(phase = ?self.phase, "advance ignored before reveal");
            return false;
        }

        if !self.is_last_question() {
            self.current_index += 1;
            self.selected = None;
            self.phase = Phase::Answering;
            debug!(question = self.current_index, "advanced");
            return true;
        }

        self.phase = Phase::Completed;
        let total = self.questions.len();
        info!(title = %self.title, score = self.score, total, "quiz completed");
        if let Some(callback) = self.on_complete.as_mut() {
            callback(self.score, total);
        }
        true
    }

    /// Reset to the first question with no answers, from any phase.
    pub fn restart(&mut self) {
        self.phase = Phase::Answering;
        self.current_index = 0;
        self.selected = None;
        self.score = 0;
        self.answers.clear();
        debug!(title = %self.title, "quiz restarted");
    }
}

fn option_text(option: Option<&AnswerOption>) -> &str {
    option.map_or("", |option| option.text.as_str())
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("title", &self.title)
            .field("phase", &self.phase)
            .field("current_index", &self.current_index)
            .field("selected", &self.selected)
            .field("score", &self.score)
            .field("answers", &self.answers)
            .field("total_questions", &self.questions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::models::fixtures::question_set;
    use crate::scoring::Tier;

    fn engine(count: usize) -> QuizEngine {
        QuizEngine::new(question_set(count)).unwrap()
    }

    fn answer(engine: &mut QuizEngine, option_suffix: &str) {
        let id = format!("{}-{}", engine.current_question().id, option_suffix);
        assert!(engine.select_option(&id));
        assert!(engine.submit_answer());
        assert!(engine.advance());
    }

    #[test]
    fn test_initial_state() {
        let engine = engine(3);
        assert_eq!(engine.phase(), Phase::Answering);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.selected_option_id(), None);
        assert_eq!(engine.score(), 0);
        assert!(!engine.can_submit());
        assert!(engine.feedback().is_none());
        assert!(engine.summary().is_none());
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(matches!(
            QuizEngine::new(question_set(0)),
            Err(QuestionSetError::Empty)
        ));
    }

    #[test]
    fn test_selection_can_change_before_submit() {
        let mut engine = engine(2);
        assert!(engine.select_option("q1-a"));
        assert!(engine.select_option("q1-b"));
        assert_eq!(engine.selected_option_id(), Some("q1-b"));
        assert!(engine.can_submit());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let mut engine = engine(2);
        assert!(engine.select_option("q1-a"));
        assert!(!engine.select_option("q2-a"));
        assert!(!engine.select_option(""));
        assert_eq!(engine.selected_option_id(), Some("q1-a"));
        assert_eq!(engine.phase(), Phase::Answering);
    }

    #[test]
    fn test_submit_without_selection_is_ignored() {
        let mut engine = engine(2);
        assert!(!engine.submit_answer());
        assert_eq!(engine.phase(), Phase::Answering);
        assert!(engine.answers().is_empty());
    }

    #[test]
    fn test_double_submit_counts_once() {
        let mut engine = engine(2);
        engine.select_option("q1-b");
        assert!(engine.submit_answer());
        assert!(!engine.submit_answer());
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.answer_for("q1"), Some("q1-b"));
    }

    #[test]
    fn test_selection_locked_after_submit() {
        let mut engine = engine(2);
        engine.select_option("q1-a");
        engine.submit_answer();

        assert!(!engine.select_option("q1-b"));
        assert_eq!(engine.selected_option_id(), Some("q1-a"));
        assert_eq!(engine.score(), 0);
        assert_eq!(
            engine.feedback(),
            Some(Feedback {
                correct: false,
                explanation: "Explanation for q1",
            })
        );
    }

    #[test]
    fn test_reveal_marks_options() {
        let mut engine = engine(1);
        engine.select_option("q1-c");
        assert!(engine.options().iter().all(|o| o.reveal.is_none()));

        engine.submit_answer();
        let reveals: Vec<_> = engine.options().iter().map(|o| o.reveal).collect();
        assert_eq!(
            reveals,
            vec![
                Some(Reveal::Other),
                Some(Reveal::Correct),
                Some(Reveal::IncorrectPick),
                Some(Reveal::Other),
            ]
        );
        assert!(engine.options()[2].selected);
    }

    #[test]
    fn test_advance_before_submit_is_ignored() {
        let mut engine = engine(3);
        engine.select_option("q1-a");
        assert!(!engine.advance());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.phase(), Phase::Answering);
        assert_eq!(engine.selected_option_id(), Some("q1-a"));
    }

    #[test]
    fn test_advance_clears_selection() {
        let mut engine = engine(3);
        answer(&mut engine, "b");
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.phase(), Phase::Answering);
        assert_eq!(engine.selected_option_id(), None);
        assert_eq!(engine.answer_for("q1"), Some("q1-b"));
    }

    #[test]
    fn test_mixed_run_scenario() {
        let mut engine = engine(5);
        for suffix in ["b", "a", "b", "d", "b"] {
            answer(&mut engine, suffix);
        }

        let summary = engine.summary().unwrap();
        assert_eq!(engine.phase(), Phase::Completed);
        assert_eq!(summary.score, 3);
        assert_eq!(summary.percentage, 60);
        assert_eq!(summary.tier, Tier::Good);

        let breakdown = engine.answer_breakdown();
        assert_eq!(breakdown.len(), 5);
        assert!(!breakdown[1].is_correct);
        assert_eq!(breakdown[1].chosen_text, "Option a");
        assert_eq!(breakdown[1].correct_text, "Option b");
    }

    #[test]
    fn test_single_question_completes() {
        let mut engine = engine(1);
        answer(&mut engine, "b");

        let summary = engine.summary().unwrap();
        assert!(engine.is_completed());
        assert_eq!(summary.score, 1);
        assert_eq!(summary.percentage, 100);
        assert_eq!(summary.tier, Tier::Excellent);
    }

    #[test]
    fn test_completion_callback_fires_once_per_run() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut engine =
            engine(2).on_complete(move |score, total| sink.borrow_mut().push((score, total)));

        answer(&mut engine, "b");
        engine.select_option("q2-a");
        engine.submit_answer();
        assert!(calls.borrow().is_empty());

        assert!(engine.advance());
        assert!(!engine.advance());
        assert_eq!(*calls.borrow(), vec![(1, 2)]);

        engine.restart();
        answer(&mut engine, "b");
        answer(&mut engine, "b");
        assert_eq!(*calls.borrow(), vec![(1, 2), (2, 2)]);
    }

    #[test]
    fn test_completed_ignores_everything_but_restart() {
        let mut engine = engine(1);
        answer(&mut engine, "a");

        assert!(!engine.select_option("q1-b"));
        assert!(!engine.submit_answer());
        assert!(!engine.advance());
        assert_eq!(engine.score(), 0);
        assert!(engine.is_completed());
    }

    #[test]
    fn test_restart_matches_fresh_engine() {
        let fresh = engine(3);
        let mut engine = engine(3);
        answer(&mut engine, "b");
        engine.select_option("q2-c");
        engine.submit_answer();
        engine.restart();

        assert_eq!(engine.phase(), fresh.phase());
        assert_eq!(engine.current_index(), fresh.current_index());
        assert_eq!(engine.selected_option_id(), fresh.selected_option_id());
        assert_eq!(engine.score(), fresh.score());
        assert_eq!(engine.answers(), fresh.answers());
        assert_eq!(engine.options(), fresh.options());
    }

    #[test]
    fn test_progress_percent() {
        let mut engine = engine(4);
        assert_eq!(engine.progress_percent(), 25);
        answer(&mut engine, "b");
        answer(&mut engine, "b");
        answer(&mut engine, "b");
        assert_eq!(engine.progress_percent(), 100);
    }

    #[test]
    fn test_instances_are_isolated() {
        let mut first = engine(2);
        let second = engine(2);
        first.select_option("q1-b");
        first.submit_answer();

        assert_eq!(first.score(), 1);
        assert_eq!(second.score(), 0);
        assert_eq!(second.phase(), Phase::Answering);
    }
}
