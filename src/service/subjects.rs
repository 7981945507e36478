//! Subject registry: key to display label, in first-add order.

use crate::service::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub key: String,
    pub label: String,
}

/// Keeps the known subjects and their display labels.
#[derive(Debug, Default)]
pub struct SubjectManager {
    subjects: Vec<Subject>,
}

impl SubjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subject. Re-adding an existing key replaces its label,
    /// last write wins. Blank keys or labels are rejected.
    pub fn add_subject(&mut self, key: &str, label: &str) -> Result<(), ServiceError> {
        let key = key.trim();
        let label = label.trim();
        if key.is_empty() {
            return Err(ServiceError::InvalidSubject(
                "subject key must not be empty".to_string(),
            ));
        }
        if label.is_empty() {
            return Err(ServiceError::InvalidSubject(
                "subject label must not be empty".to_string(),
            ));
        }

        match self.subjects.iter_mut().find(|s| s.key == key) {
            Some(existing) => existing.label = label.to_string(),
            None => self.subjects.push(Subject {
                key: key.to_string(),
                label: label.to_string(),
            }),
        }
        Ok(())
    }

    /// Display label for a key; unknown keys fall back to the key itself.
    pub fn label_for(&self, key: &str) -> String {
        self.subjects
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn all(&self) -> &[Subject] {
        &self.subjects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subjects_keep_first_add_order() {
        let mut manager = SubjectManager::new();
        manager.add_subject("math", "Mathematics").unwrap();
        manager.add_subject("sci", "Science").unwrap();
        manager.add_subject("hist", "History").unwrap();

        let keys: Vec<&str> = manager.all().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["math", "sci", "hist"]);
    }

    #[test]
    fn test_readding_a_key_overwrites_the_label() {
        let mut manager = SubjectManager::new();
        manager.add_subject("math", "Maths").unwrap();
        manager.add_subject("sci", "Science").unwrap();
        manager.add_subject("math", "Mathematics").unwrap();

        assert_eq!(manager.label_for("math"), "Mathematics");
        // Overwriting does not move the subject or add a duplicate.
        assert_eq!(manager.all().len(), 2);
        assert_eq!(manager.all()[0].key, "math");
    }

    #[test]
    fn test_blank_key_or_label_is_rejected() {
        let mut manager = SubjectManager::new();
        assert!(matches!(
            manager.add_subject("", "Mathematics"),
            Err(ServiceError::InvalidSubject(_))
        ));
        assert!(matches!(
            manager.add_subject("math", "   "),
            Err(ServiceError::InvalidSubject(_))
        ));
        assert!(manager.all().is_empty());
    }

    #[test]
    fn test_unknown_key_falls_back_to_itself() {
        let manager = SubjectManager::new();
        assert_eq!(manager.label_for("nonexistent"), "nonexistent");
    }
}
