//! Quiz assembly and scoring.
//!
//! `QuizService` owns the question bank. Loading a quiz draws a uniformly
//! shuffled copy of a subject's questions, trims it to the requested count,
//! shuffles each question's options (remapping the correct index) and hands
//! back a started `TimedQuiz`. The bank itself is only ever changed through
//! `add_subject` / `add_question`.

use std::collections::HashMap;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Question, QuizSession, TimedQuiz};
use crate::service::{ServiceError, SubjectManager};

/// Subject key to its full set of authored questions.
pub type QuestionBank = HashMap<String, Vec<Question>>;

/// How many questions a quiz draws from the subject pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCount {
    /// Every question the subject has.
    All,
    /// The first `n` after shuffling; capped at the pool size.
    Count(usize),
}

impl FromStr for SelectionCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(SelectionCount::All);
        }
        match s.parse::<usize>() {
            Ok(0) => Err("question count must be at least 1".to_string()),
            Ok(n) => Ok(SelectionCount::Count(n)),
            Err(_) => Err(format!("expected a number or 'all', got '{}'", s)),
        }
    }
}

impl std::fmt::Display for SelectionCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionCount::All => write!(f, "all"),
            SelectionCount::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Owns the bank and the subject registry, assembles quizzes, scores them.
pub struct QuizService {
    bank: QuestionBank,
    subjects: SubjectManager,
    next_question_id: u32,
}

impl QuizService {
    /// The id counter resumes after the highest id already in the bank.
    pub fn new(bank: QuestionBank, subjects: SubjectManager) -> Self {
        let next_question_id = bank
            .values()
            .flatten()
            .map(|q| q.id)
            .max()
            .map_or(1, |max| max + 1);
        Self {
            bank,
            subjects,
            next_question_id,
        }
    }

    pub fn subjects(&self) -> &SubjectManager {
        &self.subjects
    }

    pub fn question_count(&self, subject_key: &str) -> usize {
        self.bank.get(subject_key).map_or(0, Vec::len)
    }

    /// Banked questions for a subject, in authored order.
    pub fn questions_for(&self, subject_key: &str) -> &[Question] {
        self.bank.get(subject_key).map_or(&[], Vec::as_slice)
    }

    /// Assemble and start a timed quiz.
    ///
    /// The session owns copies of the bank questions; shuffling the quiz
    /// order and each question's options never touches the bank.
    pub fn load_quiz(
        &self,
        subject_key: &str,
        count: SelectionCount,
        time_limit_secs: u64,
    ) -> Result<TimedQuiz, ServiceError> {
        let pool = self
            .bank
            .get(subject_key)
            .filter(|questions| !questions.is_empty())
            .ok_or_else(|| ServiceError::NoQuestions(subject_key.to_string()))?;

        let mut rng = rand::rng();
        let mut questions = pool.clone();
        questions.shuffle(&mut rng);

        // A session needs at least one question; `Count(0)` would start one
        // with nothing to show.
        let take = match count {
            SelectionCount::All => questions.len(),
            SelectionCount::Count(n) => n.min(questions.len()),
        };
        if take == 0 {
            return Err(ServiceError::NoQuestions(subject_key.to_string()));
        }
        questions.truncate(take);

        for question in &mut questions {
            shuffle_options(question, &mut rng);
        }

        let label = self.subjects.label_for(subject_key);
        let mut session = QuizSession::new(subject_key, &label, questions);
        session.start();
        log::info!(
            "Quiz {} started: subject '{}', {} questions, {}s limit",
            session.id,
            subject_key,
            session.total_questions(),
            time_limit_secs
        );
        Ok(TimedQuiz::new(session, time_limit_secs))
    }

    /// Count of recorded answers that pick the correct option. Unanswered
    /// questions never count.
    pub fn calculate_score(&self, session: &QuizSession) -> u32 {
        session
            .questions
            .iter()
            .filter(|question| {
                session
                    .answer_for(question.id)
                    .is_some_and(|choice| question.is_correct(choice))
            })
            .count() as u32
    }

    /// Register a subject and make sure it has a bank entry.
    pub fn add_subject(&mut self, key: &str, label: &str) -> Result<(), ServiceError> {
        self.subjects.add_subject(key, label)?;
        self.bank.entry(key.trim().to_string()).or_default();
        log::info!("Subject '{}' registered", key.trim());
        Ok(())
    }

    /// Append a question to a subject, creating the bank entry if needed.
    /// Returns the assigned id.
    pub fn add_question(
        &mut self,
        subject_key: &str,
        text: &str,
        options: Vec<String>,
        correct_index: usize,
    ) -> Result<u32, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::InvalidQuestion(
                "question text must not be empty".to_string(),
            ));
        }
        if options.is_empty() {
            return Err(ServiceError::InvalidQuestion(
                "a question needs at least one option".to_string(),
            ));
        }
        if correct_index >= options.len() {
            return Err(ServiceError::InvalidQuestion(format!(
                "correct option {} is out of range for {} options",
                correct_index,
                options.len()
            )));
        }

        let id = self.next_question_id;
        self.next_question_id += 1;
        let question = Question::new(id, subject_key, text, options, correct_index);
        self.bank
            .entry(subject_key.to_string())
            .or_default()
            .push(question);
        log::info!("Question {} added to '{}'", id, subject_key);
        Ok(id)
    }
}

/// Shuffle a question's options in place and remap the correct index to
/// follow the correct option's new position.
fn shuffle_options(question: &mut Question, rng: &mut impl Rng) {
    let correct_text = question.options[question.correct_index].clone();
    question.options.shuffle(rng);
    if let Some(new_index) = question.options.iter().position(|o| *o == correct_text) {
        question.correct_index = new_index;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::models::SessionStatus;

    const OPTION_TEXTS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

    fn bank_question(id: u32) -> Question {
        Question::new(
            id,
            "math",
            &format!("Question {id}"),
            OPTION_TEXTS.iter().map(|s| s.to_string()).collect(),
            (id as usize - 1) % 4,
        )
    }

    fn service_with_math(count: u32) -> QuizService {
        let mut subjects = SubjectManager::new();
        subjects.add_subject("math", "Mathematics").unwrap();
        let mut bank = QuestionBank::new();
        bank.insert("math".to_string(), (1..=count).map(bank_question).collect());
        QuizService::new(bank, subjects)
    }

    #[test]
    fn test_load_quiz_selects_requested_count() {
        let service = service_with_math(5);
        let quiz = service
            .load_quiz("math", SelectionCount::Count(3), 60)
            .unwrap();

        assert_eq!(quiz.session.total_questions(), 3);
        assert_eq!(quiz.session.subject_label, "Mathematics");
        assert_eq!(quiz.session.status(), SessionStatus::InProgress);

        let ids: HashSet<u32> = quiz.session.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 3, "no duplicate questions");
        assert!(ids.iter().all(|id| (1..=5).contains(id)));
    }

    #[test]
    fn test_load_quiz_all_takes_every_question() {
        let service = service_with_math(5);

        let all = service.load_quiz("math", SelectionCount::All, 60).unwrap();
        assert_eq!(all.session.total_questions(), 5);

        // A count past the pool size behaves like "all".
        let over = service
            .load_quiz("math", SelectionCount::Count(99), 60)
            .unwrap();
        assert_eq!(over.session.total_questions(), 5);

        let ids: HashSet<u32> = all.session.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=5).collect::<HashSet<u32>>());
    }

    #[test]
    fn test_load_quiz_rejects_a_zero_count() {
        // The CLI parser refuses 0, but the variant is a public type and
        // can be built directly. The service must not hand back a started
        // session with no current question.
        let service = service_with_math(3);
        assert!(matches!(
            service.load_quiz("math", SelectionCount::Count(0), 60),
            Err(ServiceError::NoQuestions(_))
        ));
    }

    #[test]
    fn test_load_quiz_fails_without_questions() {
        let mut service = service_with_math(3);
        assert!(matches!(
            service.load_quiz("history", SelectionCount::All, 60),
            Err(ServiceError::NoQuestions(_))
        ));

        // A registered subject with an empty pool fails the same way.
        service.add_subject("geo", "Geography").unwrap();
        assert!(matches!(
            service.load_quiz("geo", SelectionCount::All, 60),
            Err(ServiceError::NoQuestions(_))
        ));
    }

    #[test]
    fn test_option_shuffle_tracks_the_correct_text() {
        let service = service_with_math(5);
        let quiz = service.load_quiz("math", SelectionCount::All, 60).unwrap();

        for question in &quiz.session.questions {
            let expected = OPTION_TEXTS[(question.id as usize - 1) % 4];
            assert_eq!(question.options[question.correct_index], expected);
        }
    }

    #[test]
    fn test_load_quiz_leaves_the_bank_untouched() {
        let service = service_with_math(4);
        let before = service.questions_for("math").to_vec();

        for _ in 0..5 {
            service.load_quiz("math", SelectionCount::All, 60).unwrap();
        }

        assert_eq!(service.questions_for("math"), &before[..]);
    }

    #[test]
    fn test_shuffle_produces_every_order() {
        let service = service_with_math(3);
        let mut seen: HashSet<Vec<u32>> = HashSet::new();

        for _ in 0..300 {
            let quiz = service.load_quiz("math", SelectionCount::All, 60).unwrap();
            seen.insert(quiz.session.questions.iter().map(|q| q.id).collect());
        }

        assert_eq!(seen.len(), 6, "all 3! orders should appear");
    }

    #[test]
    fn test_calculate_score_counts_only_correct_answers() {
        let service = service_with_math(3);
        let questions: Vec<Question> = (1..=3).map(bank_question).collect();
        let wrong = (questions[1].correct_index + 1) % questions[1].options.len();

        let mut session = QuizSession::new("math", "Mathematics", questions.clone());
        session.start();
        session.save_answer(questions[0].id, questions[0].correct_index);
        session.save_answer(questions[1].id, wrong);
        // Question 3 left unanswered.

        assert_eq!(service.calculate_score(&session), 1);
    }

    #[test]
    fn test_add_question_assigns_sequential_ids() {
        let mut service = service_with_math(5);

        let first = service
            .add_question(
                "math",
                "What is 6*7?",
                vec!["42".into(), "36".into()],
                0,
            )
            .unwrap();
        let second = service
            .add_question(
                "physics",
                "Unit of force?",
                vec!["Newton".into(), "Joule".into()],
                0,
            )
            .unwrap();

        assert_eq!(first, 6);
        assert_eq!(second, 7);
        assert_eq!(service.question_count("math"), 6);
        // The bank entry was created on demand.
        assert_eq!(service.question_count("physics"), 1);
    }

    #[test]
    fn test_add_question_enforces_the_invariant() {
        let mut service = service_with_math(1);

        assert!(matches!(
            service.add_question("math", "  ", vec!["a".into()], 0),
            Err(ServiceError::InvalidQuestion(_))
        ));
        assert!(matches!(
            service.add_question("math", "No options?", vec![], 0),
            Err(ServiceError::InvalidQuestion(_))
        ));
        assert!(matches!(
            service.add_question("math", "Off by one?", vec!["a".into(), "b".into()], 2),
            Err(ServiceError::InvalidQuestion(_))
        ));
        assert_eq!(service.question_count("math"), 1);
    }

    #[test]
    fn test_add_subject_registers_and_creates_entry() {
        let mut service = service_with_math(1);
        service.add_subject("chem", "Chemistry").unwrap();

        assert_eq!(service.subjects().label_for("chem"), "Chemistry");
        assert_eq!(service.question_count("chem"), 0);
    }

    #[test]
    fn test_selection_count_parsing() {
        assert_eq!("all".parse::<SelectionCount>(), Ok(SelectionCount::All));
        assert_eq!("ALL".parse::<SelectionCount>(), Ok(SelectionCount::All));
        assert_eq!(" 5 ".parse::<SelectionCount>(), Ok(SelectionCount::Count(5)));
        assert!("0".parse::<SelectionCount>().is_err());
        assert!("-3".parse::<SelectionCount>().is_err());
        assert!("many".parse::<SelectionCount>().is_err());
    }

    #[test]
    fn test_timed_quiz_end_to_end() {
        let service = service_with_math(5);
        let quiz = service
            .load_quiz("math", SelectionCount::Count(3), 60)
            .unwrap();
        let now = Instant::now();

        assert_eq!(quiz.session.total_questions(), 3);
        assert!(quiz.remaining_at(now) >= 59);
        assert!(!quiz.is_time_over_at(now));

        let after_expiry = now + Duration::from_secs(61);
        assert!(quiz.is_time_over_at(after_expiry));
        assert_eq!(quiz.remaining_at(after_expiry), 0);
    }
}
