//! Question bank loading.
//!
//! Banks come in three shapes: a plain JSON array of questions, an object
//! mapping topic names to question lists (flattened into one list), and
//! legacy files of whitespace-separated JSON objects. Individual entries that
//! fail to deserialize are skipped with a warning rather than failing the
//! whole load.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use log::warn;
use serde_json::Value;

use crate::models::Question;

/// Error loading a question bank.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file content was not parseable in any supported shape.
    Parse(serde_json::Error),
    /// The file parsed but yielded no usable questions.
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
            LoadError::Empty => write!(f, "question file contains no usable questions"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Empty => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

/// Load questions from a JSON file.
pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_questions(&content)
}

/// Parse question bank content in any of the supported shapes.
pub fn parse_questions(content: &str) -> Result<Vec<Question>, LoadError> {
    let content = content.trim();

    let values = match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Object(map)) => {
            // Topic -> list maps are flattened in key order.
            let mut flattened = Vec::new();
            for (_, value) in map {
                match value {
                    Value::Array(items) => flattened.extend(items),
                    other => flattened.push(other),
                }
            }
            flattened
        }
        Ok(other) => vec![other],
        Err(err) => split_concatenated_objects(content).ok_or(LoadError::Parse(err))?,
    };

    let questions: Vec<Question> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(q) => Some(q),
            Err(e) => {
                warn!("skipping question entry #{}: {}", i + 1, e);
                None
            }
        })
        .collect();

    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(questions)
}

/// Recover legacy files written as whitespace-separated JSON objects.
///
/// Scans for balanced top-level `{...}` spans, tracking string literals and
/// escapes so braces inside question text don't break the split. Returns
/// None if no object span is found.
fn split_concatenated_objects(content: &str) -> Option<Vec<Value>> {
    let mut values = Vec::new();
    let bytes = content.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] == b'{' {
            let end = find_object_end(content, pos)?;
            match serde_json::from_str(&content[pos..end]) {
                Ok(value) => values.push(value),
                Err(e) => warn!("skipping malformed JSON object #{}: {}", values.len() + 1, e),
            }
            pos = end;
        } else {
            pos += 1;
        }
    }

    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Byte offset one past the `}` matching the `{` at `start`.
fn find_object_end(content: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in content[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_array() {
        let questions = parse_questions(
            r#"[
                {"question": "one", "options": ["a", "b"], "answer": "A"},
                {"question": "two", "options": ["c", "d"], "answers": ["A", "B"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "one");
    }

    #[test]
    fn flattens_topic_map() {
        let questions = parse_questions(
            r#"{
                "topic-a": [{"question": "one", "options": [], "answer": "A"}],
                "topic-b": [
                    {"question": "two", "options": [], "answer": "A"},
                    {"question": "three", "options": [], "answer": "B"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 3);
    }

    #[test]
    fn topic_map_keeps_scalar_values_as_entries() {
        let questions =
            parse_questions(r#"{"only": {"question": "one", "options": [], "answer": "A"}}"#)
                .unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "one");
    }

    #[test]
    fn recovers_concatenated_objects() {
        let questions = parse_questions(
            r#"{"question": "one", "options": ["a"], "answer": "A"}
               {"question": "two", "options": ["b"], "answer": "A"}"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[1].question, "two");
    }

    #[test]
    fn concatenated_objects_survive_braces_in_strings() {
        let questions = parse_questions(
            r#"{"question": "set {1, 2}", "options": ["a"], "answer": "A"}
               {"question": "two", "options": ["b"], "answer": "A"}"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].question, "set {1, 2}");
    }

    #[test]
    fn skips_malformed_entries() {
        let questions = parse_questions(
            r#"[
                {"question": "good", "options": [], "answer": "A"},
                {"no_question_field": true}
            ]"#,
        )
        .unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn empty_bank_is_an_error() {
        assert!(matches!(parse_questions("[]"), Err(LoadError::Empty)));
        assert!(matches!(parse_questions("not json"), Err(LoadError::Parse(_))));
    }
}
