mod loader;
mod storage;

pub use loader::{load_questions_from_json, parse_questions, LoadError};
pub use storage::{ScoreEntry, Storage, StorageError, HISTORY_DISPLAY_LIMIT};
