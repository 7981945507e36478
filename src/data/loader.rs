//! Question bank file loading.
//!
//! The bank file is JSON: `{ "subjects": [ { "key", "label", "questions":
//! [ { "text", "options", "correct_index" } ] } ] }`. Question ids are
//! assigned sequentially in file order; every entry is validated before
//! the application starts.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::models::Question;
use crate::service::{QuestionBank, SubjectManager};

/// Error loading the question bank file.
#[derive(Debug)]
pub enum LoadError {
    /// Error reading the file.
    Io(io::Error),
    /// Error parsing the JSON.
    Parse(serde_json::Error),
    /// The file parsed but an entry breaks an invariant.
    Invalid(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "Failed to read bank file: {}", e),
            LoadError::Parse(e) => write!(f, "Failed to parse bank file: {}", e),
            LoadError::Invalid(reason) => write!(f, "Invalid bank entry: {}", reason),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Parse(err)
    }
}

#[derive(Deserialize)]
struct BankFile {
    subjects: Vec<BankSubject>,
}

#[derive(Deserialize)]
struct BankSubject {
    key: String,
    label: String,
    questions: Vec<BankQuestion>,
}

#[derive(Deserialize)]
struct BankQuestion {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

/// Load and validate a bank file, producing the bank and subject registry.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<(QuestionBank, SubjectManager), LoadError> {
    let content = fs::read_to_string(path)?;
    parse_bank(&content)
}

fn parse_bank(content: &str) -> Result<(QuestionBank, SubjectManager), LoadError> {
    let file: BankFile = serde_json::from_str(content)?;

    let mut bank = QuestionBank::new();
    let mut subjects = SubjectManager::new();
    let mut next_id: u32 = 1;

    for subject in &file.subjects {
        subjects
            .add_subject(&subject.key, &subject.label)
            .map_err(|e| LoadError::Invalid(e.to_string()))?;

        let key = subject.key.trim();
        let entry = bank.entry(key.to_string()).or_default();
        for question in &subject.questions {
            if question.options.is_empty() {
                return Err(LoadError::Invalid(format!(
                    "question '{}' in '{}' has no options",
                    question.text, key
                )));
            }
            if question.correct_index >= question.options.len() {
                return Err(LoadError::Invalid(format!(
                    "question '{}' in '{}': correct option {} out of range for {} options",
                    question.text,
                    key,
                    question.correct_index,
                    question.options.len()
                )));
            }
            entry.push(Question::new(
                next_id,
                key,
                &question.text,
                question.options.clone(),
                question.correct_index,
            ));
            next_id += 1;
        }
    }

    Ok((bank, subjects))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BANK: &str = r#"{
        "subjects": [
            {
                "key": "math",
                "label": "Mathematics",
                "questions": [
                    { "text": "2+2?", "options": ["3", "4"], "correct_index": 1 },
                    { "text": "3*3?", "options": ["9", "6"], "correct_index": 0 }
                ]
            },
            {
                "key": "sci",
                "label": "Science",
                "questions": [
                    { "text": "H2O is?", "options": ["Water", "Salt"], "correct_index": 0 }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_assigns_sequential_ids_in_file_order() {
        let (bank, subjects) = parse_bank(GOOD_BANK).unwrap();

        let math = &bank["math"];
        assert_eq!(math.len(), 2);
        assert_eq!(math[0].id, 1);
        assert_eq!(math[1].id, 2);
        assert_eq!(bank["sci"][0].id, 3);

        assert_eq!(math[0].correct_index, 1);
        assert_eq!(math[0].subject, "math");
        assert_eq!(subjects.label_for("math"), "Mathematics");
        assert_eq!(subjects.label_for("sci"), "Science");
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_bank("{ not json"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_out_of_range_correct_index_is_rejected() {
        let bad = r#"{ "subjects": [ { "key": "m", "label": "M", "questions": [
            { "text": "?", "options": ["a", "b"], "correct_index": 2 }
        ] } ] }"#;
        assert!(matches!(parse_bank(bad), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_question_without_options_is_rejected() {
        let bad = r#"{ "subjects": [ { "key": "m", "label": "M", "questions": [
            { "text": "?", "options": [], "correct_index": 0 }
        ] } ] }"#;
        assert!(matches!(parse_bank(bad), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_blank_subject_label_is_rejected() {
        let bad = r#"{ "subjects": [ { "key": "m", "label": "  ", "questions": [] } ] }"#;
        assert!(matches!(parse_bank(bad), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        assert!(matches!(
            load_bank("/definitely/not/here.json"),
            Err(LoadError::Io(_))
        ));
    }
}
