//! Quiz assembly, scoring and the subject registry.

mod quiz;
mod subjects;

pub use quiz::{QuestionBank, QuizService, SelectionCount};
pub use subjects::{Subject, SubjectManager};

/// Domain error for bank and assembly operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Subject key or label failed validation.
    InvalidSubject(String),
    /// The subject is unknown or has nothing to draw from.
    NoQuestions(String),
    /// A submitted question broke the bank invariant.
    InvalidQuestion(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::InvalidSubject(reason) => write!(f, "Invalid subject: {}", reason),
            ServiceError::NoQuestions(subject) => {
                write!(f, "No questions available for '{}'", subject)
            }
            ServiceError::InvalidQuestion(reason) => write!(f, "Invalid question: {}", reason),
        }
    }
}

impl std::error::Error for ServiceError {}
