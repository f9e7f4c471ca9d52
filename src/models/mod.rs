mod question;

pub use question::{AnswerOption, Question, QuestionSet, QuestionSetError};

#[cfg(test)]
pub(crate) use question::fixtures;

/// Which screen the terminal host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
