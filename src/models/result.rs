//! Scored outcome of a finished quiz.
//!
//! This struct is also the persisted record shape: the result log stores
//! its exact serde projection. Percentage, grade and time status are
//! derived on demand and never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TimedQuiz;

/// A finished quiz, scored and stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub student_name: String,
    pub student_id: String,
    /// Subject display label.
    pub subject: String,
    pub score: u32,
    pub total_questions: u32,
    pub time_used_secs: u64,
    pub time_limit_secs: u64,
    /// Distinct questions the student answered.
    pub attempted: u32,
    pub taken_at: DateTime<Utc>,
}

impl QuizResult {
    /// Build the record for a finished quiz. Missing or blank identity
    /// fields fall back to the guest placeholders.
    pub fn from_quiz(
        quiz: &TimedQuiz,
        score: u32,
        student_name: Option<&str>,
        student_id: Option<&str>,
    ) -> Self {
        Self {
            student_name: identity_or(student_name, "Guest"),
            student_id: identity_or(student_id, "N/A"),
            subject: quiz.session.subject_label.clone(),
            score,
            total_questions: quiz.session.total_questions() as u32,
            time_used_secs: quiz.session.time_used_secs(),
            time_limit_secs: quiz.time_limit_secs,
            attempted: quiz.session.attempted_count() as u32,
            taken_at: Utc::now(),
        }
    }

    /// Score as a percentage of the total; 0.0 for an empty quiz.
    pub fn percentage(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total_questions)
    }

    /// Letter grade from the percentage, lower bounds inclusive.
    pub fn grade(&self) -> &'static str {
        let pct = self.percentage();
        if pct >= 80.0 {
            "A+"
        } else if pct >= 70.0 {
            "A"
        } else if pct >= 60.0 {
            "B"
        } else if pct >= 50.0 {
            "C"
        } else {
            "F"
        }
    }

    pub fn time_status(&self) -> &'static str {
        if self.time_used_secs > self.time_limit_secs {
            "Time over"
        } else {
            "Completed within time"
        }
    }
}

fn identity_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
