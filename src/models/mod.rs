//! Core domain types.
//!
//! Questions, the session state machine and the scored result record.

mod question;
mod result;
mod session;

pub use question::Question;
pub use result::QuizResult;
pub use session::{QuizSession, SessionStatus, TimedQuiz};
