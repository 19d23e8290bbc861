//! # certquiz
//!
//! A terminal quiz runner for certification-exam style JSON question banks.
//!
//! Banks store correct answers in whatever shape their author liked: bare
//! letters, punctuated letters, or full option text, under `answer` or
//! `answers`, scalar or list. The [`grading`] module normalizes all of that
//! to canonical letter sets and grades selections against them, including the
//! yes/no-per-statement question variant. The rest of the crate is the
//! terminal application around that engine.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use certquiz::{Quiz, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::from_json("questions.json", "storage")?;
//!     quiz.run()?;
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod grading;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::App;
pub use data::{
    load_questions_from_json, parse_questions, LoadError, ScoreEntry, Storage, StorageError,
};
pub use models::{AnswerSpec, AppState, Question, QuestionKind};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from loaded questions.
    pub fn new(questions: Vec<Question>, storage: Storage) -> Self {
        Self {
            app: App::new(questions, storage),
        }
    }

    /// Load a quiz from a JSON question bank.
    ///
    /// `storage_dir` is where score history and learned-question state live.
    pub fn from_json<P: AsRef<Path>, S: AsRef<Path>>(
        path: P,
        storage_dir: S,
    ) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        let storage = Storage::new(storage_dir.as_ref());
        Ok(Self::new(questions, storage))
    }

    /// Disable question shuffling (useful for drilling a bank in order).
    pub fn without_shuffle(mut self) -> Self {
        self.app = self.app.with_shuffle(false);
        self
    }

    /// Cap the number of questions per run.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.app = self.app.with_limit(limit);
        self
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
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

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Feedback => handle_feedback_input(app, key),
        AppState::Result => handle_result_input(app, key),
        AppState::History => handle_history_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_row();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_row();
            false
        }
        KeyCode::Char(' ') => {
            match app.kind() {
                QuestionKind::Standard => app.toggle_current(),
                QuestionKind::YesNoMulti => app.cycle_choice(),
            }
            false
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if app.kind() == QuestionKind::YesNoMulti {
                let index = yes_option_index(app);
                app.choose(index);
            }
            false
        }
        KeyCode::Char('n') | KeyCode::Char('N') => {
            if app.kind() == QuestionKind::YesNoMulti {
                let index = no_option_index(app);
                app.choose(index);
            }
            false
        }
        KeyCode::Enter => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_feedback_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.next_question();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.open_history();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_history_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Enter => {
            app.close_history();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_learned_questions();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

/// The options of a yes/no-multi question are the two values "yes" and "no"
/// in bank order, so the yes row is wherever "yes" happens to sit.
fn yes_option_index(app: &App) -> usize {
    app.current_question()
        .options
        .iter()
        .position(|o| o.trim().eq_ignore_ascii_case("yes"))
        .unwrap_or(0)
}

fn no_option_index(app: &App) -> usize {
    app.current_question()
        .options
        .iter()
        .position(|o| o.trim().eq_ignore_ascii_case("no"))
        .unwrap_or(1)
}
