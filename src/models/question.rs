use serde::{Deserialize, Serialize};

/// A single question from a JSON question bank.
///
/// Banks in the wild are messy: the answer may live under `answer` or
/// `answers`, be a single string or a list, and reference options by letter
/// ("A"), punctuated letter ("A:"), or full option text. The raw spec is kept
/// as stored and only interpreted by the grading engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "text")]
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default, alias = "answers")]
    pub answer: AnswerSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, alias = "Image", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Raw correct-answer specification, exactly as stored in the bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerSpec {
    /// `null` in the bank, or no answer key at all.
    Missing,
    One(String),
    Many(Vec<String>),
}

impl Default for AnswerSpec {
    fn default() -> Self {
        Self::Missing
    }
}

impl AnswerSpec {
    /// The spec as a sequence, coercing a scalar to a one-element slice.
    pub fn items(&self) -> &[String] {
        match self {
            Self::Missing => &[],
            Self::One(s) => std::slice::from_ref(s),
            Self::Many(v) => v,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

impl From<&str> for AnswerSpec {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<Vec<String>> for AnswerSpec {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

/// How a question is graded, resolved once per question rather than
/// re-detected at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    /// Lettered multi-select graded as a set of letters.
    Standard,
    /// Fixed yes/no options with one ordered choice per statement,
    /// graded positionally.
    YesNoMulti,
}

impl Question {
    /// Resolve the grading path for this question.
    ///
    /// Yes/no-multi applies only when the options are exactly the two values
    /// "yes" and "no" (case-insensitive) and the answer spec has more than
    /// one entry; a lone yes/no answer is an ordinary two-option question.
    pub fn kind(&self) -> QuestionKind {
        if self.options.len() == 2 && self.answer.items().len() > 1 {
            let mut lowered: Vec<String> = self
                .options
                .iter()
                .map(|o| o.trim().to_lowercase())
                .collect();
            lowered.sort();
            if lowered == ["no", "yes"] {
                return QuestionKind::YesNoMulti;
            }
        }
        QuestionKind::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: &[&str], answer: AnswerSpec) -> Question {
        Question {
            question: "q".to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer,
            explanation: None,
            image: None,
        }
    }

    #[test]
    fn yes_no_multi_requires_multiple_answers() {
        let q = question(&["Yes", "No"], AnswerSpec::from("Yes"));
        assert_eq!(q.kind(), QuestionKind::Standard);

        let q = question(
            &["Yes", "No"],
            AnswerSpec::from(vec!["Yes".to_string(), "No".to_string()]),
        );
        assert_eq!(q.kind(), QuestionKind::YesNoMulti);
    }

    #[test]
    fn yes_no_detection_ignores_case_and_order() {
        let q = question(
            &[" no ", "YES"],
            AnswerSpec::from(vec![
                "yes".to_string(),
                "no".to_string(),
                "yes".to_string(),
            ]),
        );
        assert_eq!(q.kind(), QuestionKind::YesNoMulti);
    }

    #[test]
    fn two_ordinary_options_stay_standard() {
        let q = question(
            &["True", "False"],
            AnswerSpec::from(vec!["A".to_string(), "B".to_string()]),
        );
        assert_eq!(q.kind(), QuestionKind::Standard);
    }

    #[test]
    fn answer_spec_deserializes_scalar_and_sequence() {
        let q: Question =
            serde_json::from_str(r#"{"question": "x", "options": ["a"], "answer": "A"}"#).unwrap();
        assert_eq!(q.answer.items(), ["A".to_string()]);

        let q: Question =
            serde_json::from_str(r#"{"question": "x", "options": ["a"], "answers": ["A", "B"]}"#)
                .unwrap();
        assert_eq!(q.answer.items().len(), 2);

        let q: Question = serde_json::from_str(r#"{"question": "x", "options": ["a"]}"#).unwrap();
        assert!(q.answer.is_empty());

        let q: Question =
            serde_json::from_str(r#"{"question": "x", "options": ["a"], "answer": null}"#).unwrap();
        assert!(q.answer.is_empty());
    }

    #[test]
    fn accepts_text_alias_for_question() {
        let q: Question =
            serde_json::from_str(r#"{"text": "aliased", "options": [], "answer": "A"}"#).unwrap();
        assert_eq!(q.question, "aliased");
    }
}
