//! Quiz session state machine.
//!
//! A session owns a snapshot of the selected questions plus everything the
//! student does with them: position, recorded answers, start/finish stamps.
//! `TimedQuiz` wraps a session with a time limit and the expiry checks the
//! host loop polls.

use std::collections::HashMap;
use std::time::Instant;

use uuid::Uuid;

use crate::models::Question;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Finished,
}

/// One student working through an ordered set of questions.
pub struct QuizSession {
    /// Unique session id.
    pub id: Uuid,
    /// Subject key the questions were drawn from.
    pub subject_key: String,
    /// Display label resolved at assembly time.
    pub subject_label: String,
    /// Snapshot of the selected questions (copies, not bank entries).
    pub questions: Vec<Question>,
    /// Position of the question currently shown.
    pub current_index: usize,
    /// Recorded answers: question id -> chosen option index.
    pub answers: HashMap<u32, usize>,
    /// Stamped by `start()`.
    pub started_at: Option<Instant>,
    /// Stamped by the first `finish()` call, then frozen.
    pub finished_at: Option<Instant>,
}

impl QuizSession {
    pub fn new(subject_key: &str, subject_label: &str, questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            subject_key: subject_key.to_string(),
            subject_label: subject_label.to_string(),
            questions,
            current_index: 0,
            answers: HashMap::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match (self.started_at, self.finished_at) {
            (None, _) => SessionStatus::NotStarted,
            (Some(_), None) => SessionStatus::InProgress,
            (Some(_), Some(_)) => SessionStatus::Finished,
        }
    }

    /// Begin (or restart) the session: position and answers are reset, the
    /// start time is stamped and any previous end stamp is cleared.
    pub fn start(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.started_at = Some(Instant::now());
        self.finished_at = None;
    }

    /// Stamp the end of the session. The first call wins; repeat calls
    /// leave the original stamp untouched.
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Instant::now());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Move forward one question, clamped to the last index. Returns the
    /// question at the (possibly unchanged) position.
    pub fn go_to_next(&mut self) -> &Question {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        }
        self.current_question()
    }

    /// Move back one question, clamped to the first index. Returns the
    /// question at the (possibly unchanged) position.
    pub fn go_to_previous(&mut self) -> &Question {
        self.current_index = self.current_index.saturating_sub(1);
        self.current_question()
    }

    /// Record an answer for a question; a later answer for the same
    /// question overwrites the earlier one. The choice is trusted to come
    /// from the rendered option list and is not range-checked here.
    pub fn save_answer(&mut self, question_id: u32, choice: usize) {
        self.answers.insert(question_id, choice);
    }

    pub fn answer_for(&self, question_id: u32) -> Option<usize> {
        self.answers.get(&question_id).copied()
    }

    /// Number of distinct questions with a recorded answer.
    pub fn attempted_count(&self) -> usize {
        self.answers.len()
    }

    /// Whole seconds between start and `now`, or between start and the end
    /// stamp once finished. Zero while not started.
    pub fn time_used_at(&self, now: Instant) -> u64 {
        let Some(started) = self.started_at else {
            return 0;
        };
        let end = self.finished_at.unwrap_or(now);
        end.saturating_duration_since(started).as_secs()
    }

    pub fn time_used_secs(&self) -> u64 {
        self.time_used_at(Instant::now())
    }
}

/// A session with a time limit in seconds.
pub struct TimedQuiz {
    pub session: QuizSession,
    pub time_limit_secs: u64,
}

impl TimedQuiz {
    pub fn new(session: QuizSession, time_limit_secs: u64) -> Self {
        Self {
            session,
            time_limit_secs,
        }
    }

    /// Seconds left at `now`; never below zero. Safe to poll repeatedly,
    /// mutates nothing.
    pub fn remaining_at(&self, now: Instant) -> u64 {
        self.time_limit_secs
            .saturating_sub(self.session.time_used_at(now))
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_at(Instant::now())
    }

    pub fn is_time_over_at(&self, now: Instant) -> bool {
        self.remaining_at(now) == 0
    }

    pub fn is_time_over(&self) -> bool {
        self.is_time_over_at(Instant::now())
    }
}
