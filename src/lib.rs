//! # cyber-quiz
//!
//! Multiple-choice quizzes for cybersecurity learning modules, run in the
//! terminal.
//!
//! The core is [`QuizEngine`], a small state machine that presents one
//! question at a time, locks in each answer exactly once, reveals the
//! explanation and keeps score. [`Quiz`] wraps it in a terminal UI with a
//! module picker and a result screen.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cyber_quiz::{BuiltinModule, Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let set = BuiltinModule::Cryptography.question_set()?;
//!     let summary = Quiz::new(vec![set])?.run()?;
//!
//!     if let Some(summary) = summary {
//!         println!("{}%: {}", summary.percentage, summary.tier.message());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The engine can also be driven directly:
//!
//! ```rust
//! use cyber_quiz::{BuiltinModule, Phase, QuizEngine};
//!
//! let set = BuiltinModule::Encoding.question_set().unwrap();
//! let mut engine = QuizEngine::new(set)
//!     .unwrap()
//!     .on_complete(|score, total| println!("{score}/{total}"));
//!
//! engine.select_option("enc-q1-b");
//! engine.submit_answer();
//! assert_eq!(engine.phase(), Phase::Revealed);
//! assert_eq!(engine.score(), 1);
//! ```

mod app;
mod data;
pub mod engine;
mod models;
pub mod scoring;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;
use tracing::{debug, info};

pub use app::App;
pub use data::{BuiltinModule, LoadError, load_question_set_from_json, parse_question_set};
pub use engine::{Feedback, OptionView, Phase, QuizEngine, Reveal};
pub use models::{AnswerOption, AppState, Question, QuestionSet, QuestionSetError};
pub use scoring::{QuizSummary, Tier};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error("invalid question set {title:?}: {source}")]
    Invalid {
        title: String,
        #[source]
        source: QuestionSetError,
    },

    #[error("no question sets to choose from")]
    NoQuestionSets,

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A set of quizzes that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Offer `sets` in the module picker.
    ///
    /// # Errors
    ///
    /// Fails when `sets` is empty or any set does not validate, before
    /// anything is drawn.
    pub fn new(sets: Vec<QuestionSet>) -> Result<Self, QuizError> {
        if sets.is_empty() {
            return Err(QuizError::NoQuestionSets);
        }
        for set in &sets {
            set.validate().map_err(|source| QuizError::Invalid {
                title: set.title.clone(),
                source,
            })?;
        }

        Ok(Self {
            app: App::new(sets),
        })
    }

    /// All bundled modules.
    pub fn builtin() -> Result<Self, QuizError> {
        let sets = BuiltinModule::all()
            .into_iter()
            .map(BuiltinModule::question_set)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(sets)
    }

    /// Load a single question set from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use cyber_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions/encoding.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let set = load_question_set_from_json(path)?;
        Self::new(vec![set])
    }

    /// Run the quiz in the terminal until the user quits.
    ///
    /// Returns the summary of the last run completed in this session.
    pub fn run(mut self) -> Result<Option<QuizSummary>, QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result?;

        info!(runs = self.app.completed_runs(), "quiz session ended");
        Ok(self.app.last_summary().cloned())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::QuizTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code)? {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    debug!(?key, state = ?app.state, "key pressed");
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => Ok(handle_quiz_input(app, key)),
        AppState::Result => Ok(handle_result_input(app, key)),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_module(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_module(),
        KeyCode::Enter => {
            if let Err(source) = app.start_quiz() {
                let title = app
                    .catalog()
                    .get(app.menu_index())
                    .map(|set| set.title.clone())
                    .unwrap_or_default();
                return Err(QuizError::Invalid { title, source });
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
        _ => {}
    }
    Ok(false)
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(number) = c.to_digit(10) {
                app.select_option_number(number as usize);
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.confirm(),
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        KeyCode::Char('m') | KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}
