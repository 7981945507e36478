//! Application state and transitions.
//!
//! `App` owns the quiz service, the result store and everything the
//! screens show. Input handling lives next to the event loop; the methods
//! here are the transitions it invokes.

use crate::auth::{self, Student};
use crate::data::ResultStore;
use crate::models::{QuizResult, TimedQuiz};
use crate::service::{QuizService, SelectionCount};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Subjects,
    Quiz,
    Result,
    Dashboard,
}

/// Role selected on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRole {
    Student,
    Teacher,
}

/// Which login input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Id,
}

/// Login screen state. The two inputs double as name/id for students and
/// username/password for the teacher.
pub struct LoginForm {
    pub role: LoginRole,
    pub field: LoginField,
    pub name_input: String,
    pub id_input: String,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            role: LoginRole::Student,
            field: LoginField::Name,
            name_input: String::new(),
            id_input: String::new(),
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Name => &mut self.name_input,
            LoginField::Id => &mut self.id_input,
        }
    }

    pub fn push(&mut self, c: char) {
        self.error = None;
        self.focused_mut().push(c);
    }

    pub fn pop(&mut self) {
        self.error = None;
        self.focused_mut().pop();
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            LoginField::Name => LoginField::Id,
            LoginField::Id => LoginField::Name,
        };
    }

    /// Switch between student and teacher login, clearing the inputs.
    pub fn toggle_role(&mut self) {
        self.role = match self.role {
            LoginRole::Student => LoginRole::Teacher,
            LoginRole::Teacher => LoginRole::Student,
        };
        self.name_input.clear();
        self.id_input.clear();
        self.field = LoginField::Name;
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.name_input.is_empty() && self.id_input.is_empty()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// What the teacher dashboard is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    /// Result log aggregates and recent records.
    Results,
    /// Subjects and their question counts.
    Subjects,
    /// Command reference.
    Help,
}

/// Teacher dashboard state.
pub struct Dashboard {
    /// Current view.
    pub view: DashboardView,
    /// Previous view (for returning from Help).
    pub previous_view: Option<DashboardView>,
    /// Current command input.
    pub command_input: String,
    /// Command feedback for display.
    pub command_history: Vec<String>,
    /// Result log snapshot shown in the Results view.
    pub results: Vec<QuizResult>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            view: DashboardView::Results,
            previous_view: None,
            command_input: String::new(),
            command_history: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Add a message to command history.
    pub fn add_to_history(&mut self, msg: String) {
        self.command_history.push(msg);
        // Keep only the last 100 messages
        if self.command_history.len() > 100 {
            self.command_history.remove(0);
        }
    }

    /// Cycle to the next view.
    pub fn next_view(&mut self) {
        self.view = match self.view {
            DashboardView::Results => DashboardView::Subjects,
            DashboardView::Subjects => DashboardView::Help,
            DashboardView::Help => DashboardView::Results,
        };
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

/// Quiz settings carried from the command line.
#[derive(Debug, Clone, Copy)]
pub struct QuizSettings {
    pub question_count: SelectionCount,
    pub time_limit_secs: u64,
}

/// Main application state.
pub struct App {
    /// Current screen.
    pub screen: Screen,
    /// Question bank, subjects and scoring.
    pub service: QuizService,
    /// Result log.
    pub store: ResultStore,
    /// Per-quiz settings from the CLI.
    pub settings: QuizSettings,
    /// Login screen state.
    pub login: LoginForm,
    /// Logged-in student; `None` for guests.
    pub student: Option<Student>,
    /// The active (or just finished) quiz.
    pub quiz: Option<TimedQuiz>,
    /// Option cursor on the quiz screen.
    pub selected_option: usize,
    /// Subject cursor on the subjects screen.
    pub selected_subject: usize,
    /// Result of the last submitted quiz.
    pub last_result: Option<QuizResult>,
    /// Shown on the result screen when the log append failed.
    pub save_error: Option<String>,
    /// Error or info line on the subjects screen.
    pub status_line: Option<String>,
    /// Teacher dashboard state.
    pub dashboard: Dashboard,
}

impl App {
    pub fn new(service: QuizService, store: ResultStore, settings: QuizSettings) -> Self {
        Self {
            screen: Screen::Login,
            service,
            store,
            settings,
            login: LoginForm::new(),
            student: None,
            quiz: None,
            selected_option: 0,
            selected_subject: 0,
            last_result: None,
            save_error: None,
            status_line: None,
            dashboard: Dashboard::new(),
        }
    }

    /// Submit the login form for the selected role.
    pub fn submit_login(&mut self) {
        match self.login.role {
            LoginRole::Student => {
                match auth::validate_student(&self.login.name_input, &self.login.id_input) {
                    Ok(student) => {
                        log::info!("Student '{}' logged in", student.name);
                        self.student = Some(student);
                        self.enter_subjects();
                    }
                    Err(msg) => self.login.error = Some(msg.to_string()),
                }
            }
            LoginRole::Teacher => {
                if auth::verify_teacher(&self.login.name_input, &self.login.id_input) {
                    log::info!("Teacher logged in");
                    self.enter_dashboard();
                } else {
                    self.login.error = Some("Wrong teacher credentials".to_string());
                }
            }
        }
    }

    /// Skip the login and browse subjects without an identity.
    pub fn continue_as_guest(&mut self) {
        log::info!("Guest session started");
        self.student = None;
        self.enter_subjects();
    }

    fn enter_subjects(&mut self) {
        self.selected_subject = 0;
        self.status_line = None;
        self.login = LoginForm::new();
        self.screen = Screen::Subjects;
    }

    fn enter_dashboard(&mut self) {
        match self.store.load() {
            Ok(results) => self.dashboard.results = results,
            Err(err) => {
                log::warn!("Could not read result log: {}", err);
                self.dashboard.add_to_history(format!("Error: {}", err));
            }
        }
        self.dashboard.view = DashboardView::Results;
        self.login = LoginForm::new();
        self.screen = Screen::Dashboard;
    }

    /// Back to the login screen, dropping any session and identity.
    pub fn logout(&mut self) {
        log::info!("Logged out");
        self.student = None;
        self.quiz = None;
        self.last_result = None;
        self.login = LoginForm::new();
        self.screen = Screen::Login;
    }

    pub fn select_next_subject(&mut self) {
        let len = self.service.subjects().all().len();
        if len > 0 {
            self.selected_subject = (self.selected_subject + 1) % len;
        }
    }

    pub fn select_previous_subject(&mut self) {
        let len = self.service.subjects().all().len();
        if len > 0 {
            self.selected_subject = (self.selected_subject + len - 1) % len;
        }
    }

    /// Start a quiz for the subject under the cursor. A failed load shows
    /// the error on the subjects screen and stays there.
    pub fn start_quiz(&mut self) {
        let Some(subject) = self.service.subjects().all().get(self.selected_subject) else {
            self.status_line = Some("No subjects available".to_string());
            return;
        };
        let key = subject.key.clone();
        self.load_and_enter(&key);
    }

    fn load_and_enter(&mut self, subject_key: &str) {
        match self.service.load_quiz(
            subject_key,
            self.settings.question_count,
            self.settings.time_limit_secs,
        ) {
            Ok(quiz) => {
                self.quiz = Some(quiz);
                self.selected_option = 0;
                self.save_error = None;
                self.status_line = None;
                self.screen = Screen::Quiz;
            }
            Err(err) => {
                self.status_line = Some(err.to_string());
                self.screen = Screen::Subjects;
            }
        }
    }

    pub fn select_next_option(&mut self) {
        if let Some(quiz) = &self.quiz {
            let len = quiz.session.current_question().options.len();
            if len > 0 {
                self.selected_option = (self.selected_option + 1) % len;
            }
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(quiz) = &self.quiz {
            let len = quiz.session.current_question().options.len();
            if len > 0 {
                self.selected_option = (self.selected_option + len - 1) % len;
            }
        }
    }

    /// Record the highlighted option for the current question and move on.
    pub fn record_answer(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let id = quiz.session.current_question().id;
        quiz.session.save_answer(id, self.selected_option);
        quiz.session.go_to_next();

        let next_id = quiz.session.current_question().id;
        self.selected_option = quiz.session.answer_for(next_id).unwrap_or(0);
    }

    /// Move to the next question, preselecting its recorded answer.
    pub fn go_next_question(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            let id = quiz.session.go_to_next().id;
            self.selected_option = quiz.session.answer_for(id).unwrap_or(0);
        }
    }

    /// Move to the previous question, preselecting its recorded answer.
    pub fn go_previous_question(&mut self) {
        if let Some(quiz) = self.quiz.as_mut() {
            let id = quiz.session.go_to_previous().id;
            self.selected_option = quiz.session.answer_for(id).unwrap_or(0);
        }
    }

    /// Finish the session, score it, persist the result and show it.
    pub fn submit_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if quiz.session.is_finished() {
            return;
        }

        quiz.session.finish();
        let score = self.service.calculate_score(&quiz.session);
        let result = QuizResult::from_quiz(
            quiz,
            score,
            self.student.as_ref().map(|s| s.name.as_str()),
            self.student.as_ref().map(|s| s.id.as_str()),
        );
        log::info!(
            "Quiz {} submitted: {}/{} correct in {}s",
            quiz.session.id,
            score,
            result.total_questions,
            result.time_used_secs
        );

        self.save_error = None;
        if let Err(err) = self.store.append(&result) {
            log::warn!("Could not save result: {}", err);
            self.save_error = Some(err.to_string());
        }
        self.last_result = Some(result);
        self.screen = Screen::Result;
    }

    /// Leave the quiz without scoring it.
    pub fn abandon_quiz(&mut self) {
        if let Some(quiz) = &self.quiz {
            log::info!("Quiz {} abandoned", quiz.session.id);
        }
        self.back_to_subjects();
    }

    pub fn back_to_subjects(&mut self) {
        self.quiz = None;
        self.status_line = None;
        self.screen = Screen::Subjects;
    }

    /// Run the same subject again with a fresh session.
    pub fn retake(&mut self) {
        let Some(quiz) = &self.quiz else {
            return;
        };
        let key = quiz.session.subject_key.clone();
        self.load_and_enter(&key);
    }

    /// Called by the event loop between key events. Force-submits the
    /// active quiz once its time limit is used up; only the quiz screen
    /// is ever affected, so a finished or replaced session cannot be
    /// re-submitted by a late tick.
    pub fn on_tick(&mut self) {
        if self.screen != Screen::Quiz {
            return;
        }
        if self.quiz.as_ref().is_some_and(|quiz| quiz.is_time_over()) {
            log::info!("Time limit reached, submitting");
            self.submit_quiz();
        }
    }
}

/// Aggregated result statistics for one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectStats {
    pub subject: String,
    pub attempts: usize,
    pub average_percentage: f64,
    pub best_percentage: f64,
}

/// Aggregate the result log per subject, in order of first appearance.
pub fn aggregate_by_subject(results: &[QuizResult]) -> Vec<SubjectStats> {
    let mut stats: Vec<SubjectStats> = Vec::new();

    for result in results {
        let index = match stats.iter().position(|s| s.subject == result.subject) {
            Some(index) => index,
            None => {
                stats.push(SubjectStats {
                    subject: result.subject.clone(),
                    attempts: 0,
                    average_percentage: 0.0,
                    best_percentage: 0.0,
                });
                stats.len() - 1
            }
        };
        let entry = &mut stats[index];
        entry.attempts += 1;
        // Running sum until the final divide below.
        entry.average_percentage += result.percentage();
        entry.best_percentage = entry.best_percentage.max(result.percentage());
    }

    for entry in &mut stats {
        if entry.attempts > 0 {
            entry.average_percentage /= entry.attempts as f64;
        }
    }
    stats
}
