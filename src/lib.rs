//! # examroom
//!
//! A terminal-based exam room: students sit timed multiple-choice quizzes
//! per subject, teachers manage the question bank and watch results.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use examroom::{AppError, ExamRoom, QuizSettings, SelectionCount};
//!
//! fn main() -> Result<(), AppError> {
//!     let settings = QuizSettings {
//!         question_count: SelectionCount::Count(10),
//!         time_limit_secs: 300,
//!     };
//!
//!     // Load the question bank and open the result log
//!     let room = ExamRoom::from_files("questions.json", "results.json", settings)?;
//!
//!     // Run the app in the terminal
//!     room.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod auth;
mod commands;
mod data;
mod models;
mod service;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

pub use app::{App, DashboardView, QuizSettings, Screen};
pub use commands::{execute_command, CommandResult};
pub use data::{load_bank, LoadError, ResultStore, StoreError};
pub use models::{Question, QuizResult, QuizSession, TimedQuiz};
pub use service::{
    QuestionBank, QuizService, SelectionCount, ServiceError, Subject, SubjectManager,
};

/// Error type for application startup and the event loop.
#[derive(Debug)]
pub enum AppError {
    /// Error loading the question bank.
    Load(LoadError),
    /// IO error during execution.
    Io(io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Load(e) => write!(f, "Failed to load the question bank: {}", e),
            AppError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Load(e) => Some(e),
            AppError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        AppError::Load(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err)
    }
}

/// An exam room instance that can be run in the terminal.
pub struct ExamRoom {
    app: App,
}

impl ExamRoom {
    /// Create an exam room from an already built service and store.
    pub fn new(service: QuizService, store: ResultStore, settings: QuizSettings) -> Self {
        Self {
            app: App::new(service, store, settings),
        }
    }

    /// Load the question bank from a JSON file and log results next to it.
    ///
    /// # Arguments
    ///
    /// * `bank_path` - Path to the JSON question bank.
    /// * `results_path` - Path of the JSON result log (created on first save).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use examroom::{ExamRoom, QuizSettings, SelectionCount};
    ///
    /// let settings = QuizSettings {
    ///     question_count: SelectionCount::All,
    ///     time_limit_secs: 300,
    /// };
    /// let room = ExamRoom::from_files("questions.json", "results.json", settings)
    ///     .expect("Failed to load the question bank");
    /// ```
    pub fn from_files<B: AsRef<Path>, R: AsRef<Path>>(
        bank_path: B,
        results_path: R,
        settings: QuizSettings,
    ) -> Result<Self, AppError> {
        let (bank, subjects) = load_bank(bank_path)?;
        let service = QuizService::new(bank, subjects);
        let store = ResultStore::new(results_path);
        Ok(Self::new(service, store, settings))
    }

    /// Run the app in the terminal.
    ///
    /// This will take over the terminal, display the UI, and return when
    /// the user quits.
    pub fn run(mut self) -> Result<(), AppError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), AppError> {
    loop {
        app.on_tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll with a timeout so the quiz timer keeps counting down
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen {
        Screen::Login => handle_login_input(app, key),
        Screen::Subjects => handle_subjects_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
        Screen::Dashboard => handle_dashboard_input(app, key),
    }
}

fn handle_login_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Tab => {
            app.login.next_field();
            false
        }
        KeyCode::Up | KeyCode::Down => {
            app.login.toggle_role();
            false
        }
        KeyCode::Enter => {
            app.submit_login();
            false
        }
        KeyCode::Backspace => {
            app.login.pop();
            false
        }
        // Only a bare form treats 'g' as the guest shortcut
        KeyCode::Char('g') if app.login.is_empty() => {
            app.continue_as_guest();
            false
        }
        KeyCode::Char(c) => {
            app.login.push(c);
            false
        }
        KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_subjects_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_subject();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_subject();
            false
        }
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Esc => {
            app.logout();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.record_answer();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.go_previous_question();
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.go_next_question();
            false
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.submit_quiz();
            false
        }
        KeyCode::Esc => {
            app.abandon_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retake();
            false
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc => {
            app.back_to_subjects();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyCode) -> bool {
    // If in Help view, Esc or Enter returns to previous view
    if matches!(app.dashboard.view, DashboardView::Help) {
        if matches!(key, KeyCode::Esc | KeyCode::Enter) {
            app.dashboard.view = app
                .dashboard
                .previous_view
                .take()
                .unwrap_or(DashboardView::Results);
        }
        return false;
    }

    match key {
        KeyCode::Char(c) => {
            app.dashboard.command_input.push(c);
        }
        KeyCode::Backspace => {
            app.dashboard.command_input.pop();
        }
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.dashboard.command_input);
            let result = execute_command(&mut app.service, &app.store, &mut app.dashboard, &input);

            match result {
                CommandResult::Ok(Some(msg)) => {
                    app.dashboard.add_to_history(msg);
                }
                CommandResult::Ok(None) => {}
                CommandResult::Error(msg) => {
                    app.dashboard.add_to_history(format!("Error: {}", msg));
                }
                CommandResult::Logout => {
                    app.logout();
                }
                CommandResult::Quit => {
                    return true;
                }
            }
        }
        KeyCode::Esc => {
            app.dashboard.command_input.clear();
        }
        KeyCode::Tab => {
            app.dashboard.next_view();
        }
        _ => {}
    }

    false
}
