mod question;

pub use question::{AnswerSpec, Question, QuestionKind};

/// Which screen the application is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    /// Per-question verdict shown after submitting an answer.
    Feedback,
    Result,
    History,
}
