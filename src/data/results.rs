//! Result log persistence.
//!
//! A JSON file holding an array of result records, read back in full for
//! the teacher dashboard. Records are the exact serde projection of
//! `QuizResult`, so what is appended is what is read back.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::QuizResult;

/// Error reading or writing the result log.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Result log IO error: {}", e),
            StoreError::Parse(e) => write!(f, "Result log is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err)
    }
}

/// Append-only log of finished quiz results.
pub struct ResultStore {
    path: PathBuf,
}

impl ResultStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored records, oldest first. A missing or empty file is an
    /// empty log, not an error.
    pub fn load(&self) -> Result<Vec<QuizResult>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Append one record: read the log, push, write it back whole.
    pub fn append(&self, result: &QuizResult) -> Result<(), StoreError> {
        let mut results = self.load()?;
        results.push(result.clone());
        fs::write(&self.path, serde_json::to_string_pretty(&results)?)?;
        log::info!(
            "Result appended for {} ({}): {}/{}",
            result.student_name,
            result.subject,
            result.score,
            result.total_questions
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn temp_store() -> ResultStore {
        let path = std::env::temp_dir().join(format!("examroom-results-{}.json", Uuid::new_v4()));
        ResultStore::new(path)
    }

    fn sample_result(name: &str, score: u32) -> QuizResult {
        QuizResult {
            student_name: name.to_string(),
            student_id: "S-1".to_string(),
            subject: "Mathematics".to_string(),
            score,
            total_questions: 5,
            time_used_secs: 42,
            time_limit_secs: 60,
            attempted: 5,
            taken_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_file_loads_as_empty() {
        let store = temp_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_append_then_load_round_trips() {
        let store = temp_store();
        let result = sample_result("Ada", 4);

        store.append(&result).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, vec![result]);
        fs::remove_file(&store.path).unwrap();
    }

    #[test]
    fn test_appends_accumulate_in_order() {
        let store = temp_store();
        store.append(&sample_result("Ada", 4)).unwrap();
        store.append(&sample_result("Grace", 5)).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].student_name, "Ada");
        assert_eq!(loaded[1].student_name, "Grace");
        fs::remove_file(&store.path).unwrap();
    }

    #[test]
    fn test_corrupt_log_is_a_parse_error() {
        let store = temp_store();
        fs::write(&store.path, "not json at all").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Parse(_))));
        fs::remove_file(&store.path).unwrap();
    }
}
