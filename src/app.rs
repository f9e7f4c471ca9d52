use std::cell::Cell;
use std::rc::Rc;

use tracing::{debug, info};

use crate::engine::{Phase, QuizEngine};
use crate::models::{AppState, QuestionSet, QuestionSetError};
use crate::scoring::QuizSummary;

/// Terminal host around [`QuizEngine`]: module picker, the running quiz and
/// the result screen. Holds at most one run at a time.
pub struct App {
    pub state: AppState,
    catalog: Vec<QuestionSet>,
    menu_index: usize,
    engine: Option<QuizEngine>,
    option_cursor: usize,
    result_scroll: usize,
    completed_runs: Rc<Cell<usize>>,
    last_summary: Option<QuizSummary>,
}

impl App {
    pub fn new(catalog: Vec<QuestionSet>) -> Self {
        Self {
            state: AppState::Welcome,
            catalog,
            menu_index: 0,
            engine: None,
            option_cursor: 0,
            result_scroll: 0,
            completed_runs: Rc::new(Cell::new(0)),
            last_summary: None,
        }
    }

    pub fn catalog(&self) -> &[QuestionSet] {
        &self.catalog
    }

    pub fn menu_index(&self) -> usize {
        self.menu_index
    }

    pub fn engine(&self) -> Option<&QuizEngine> {
        self.engine.as_ref()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Runs completed during this session, across modules and restarts.
    pub fn completed_runs(&self) -> usize {
        self.completed_runs.get()
    }

    pub fn last_summary(&self) -> Option<&QuizSummary> {
        self.last_summary.as_ref()
    }

    pub fn select_next_module(&mut self) {
        if !self.catalog.is_empty() {
            self.menu_index = (self.menu_index + 1) % self.catalog.len();
        }
    }

    pub fn select_previous_module(&mut self) {
        if !self.catalog.is_empty() {
            let len = self.catalog.len();
            self.menu_index = (self.menu_index + len - 1) % len;
        }
    }

    /// Start a fresh run of the highlighted module.
    pub fn start_quiz(&mut self) -> Result<(), QuestionSetError> {
        let set = self
            .catalog
            .get(self.menu_index)
            .cloned()
            .ok_or(QuestionSetError::Empty)?;

        let runs = Rc::clone(&self.completed_runs);
        let engine = QuizEngine::new(set)?.on_complete(move |score, total| {
            runs.set(runs.get() + 1);
            info!(score, total, runs = runs.get(), "run finished");
        });

        debug!(title = engine.title(), "starting quiz");
        self.engine = Some(engine);
        self.option_cursor = 0;
        self.result_scroll = 0;
        self.state = AppState::Quiz;
        Ok(())
    }

    pub fn select_next_option(&mut self) {
        self.move_option_cursor(1);
    }

    pub fn select_previous_option(&mut self) {
        self.move_option_cursor(-1);
    }

    fn move_option_cursor(&mut self, step: isize) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if engine.phase() != Phase::Answering {
            return;
        }

        let len = engine.current_question().options.len();
        // The first key press picks the highlighted option instead of skipping it.
        if engine.selected_option_id().is_some() {
            self.option_cursor =
                (self.option_cursor as isize + step).rem_euclid(len as isize) as usize;
        }
        self.select_option_at_cursor();
    }

    /// Select the option at 1-based `number`, as shown next to it.
    pub fn select_option_number(&mut self, number: usize) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if number == 0 || number > engine.current_question().options.len() {
            return;
        }
        if engine.phase() == Phase::Answering {
            self.option_cursor = number - 1;
            self.select_option_at_cursor();
        }
    }

    fn select_option_at_cursor(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            let option_id = engine
                .current_question()
                .options
                .get(self.option_cursor)
                .map(|option| option.id.clone());
            if let Some(option_id) = option_id {
                engine.select_option(&option_id);
            }
        }
    }

    /// Submit when answering, move on when revealed.
    pub fn confirm(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        match engine.phase() {
            Phase::Answering => {
                engine.submit_answer();
            }
            Phase::Revealed => {
                engine.advance();
                self.option_cursor = 0;
                if let Some(summary) = engine.summary() {
                    self.last_summary = Some(summary);
                    self.result_scroll = 0;
                    self.state = AppState::Result;
                }
            }
            Phase::Completed => {}
        }
    }

    /// Play the current module again from the first question.
    pub fn restart(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.restart();
            self.option_cursor = 0;
            self.result_scroll = 0;
            self.state = AppState::Quiz;
        }
    }

    /// Leave the current run and return to the module picker.
    pub fn back_to_menu(&mut self) {
        self.engine = None;
        self.option_cursor = 0;
        self.result_scroll = 0;
        self.state = AppState::Welcome;
    }

    pub fn scroll_results_down(&mut self) {
        let answered = self
            .engine
            .as_ref()
            .map_or(0, |engine| engine.answers().len());
        self.result_scroll = (self.result_scroll + 1).min(answered.saturating_sub(1));
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}
