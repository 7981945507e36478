//! Dashboard command parser and executor.
//!
//! Handles teacher commands like `subject`, `question`, `results`, etc.

use crate::app::{Dashboard, DashboardView};
use crate::data::ResultStore;
use crate::service::QuizService;

/// Result of executing a command.
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Ok(Option<String>),
    /// Command failed with an error message.
    Error(String),
    /// Leave the dashboard and return to the login screen.
    Logout,
    /// Application should quit.
    Quit,
}

/// Parse and execute a command.
pub fn execute_command(
    service: &mut QuizService,
    store: &ResultStore,
    dashboard: &mut Dashboard,
    input: &str,
) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok(None);
    }

    let parts: Vec<&str> = input.split_whitespace().collect();
    let command = parts[0].to_lowercase();
    let args = &parts[1..];

    match command.as_str() {
        "results" => cmd_results(store, dashboard),
        "subjects" => cmd_subjects(dashboard),
        "subject" => cmd_subject(service, args),
        "question" => cmd_question(service, input),
        "view" => cmd_view(store, dashboard, args),
        "help" | "?" => cmd_help(dashboard),
        "logout" => CommandResult::Logout,
        "quit" | "exit" => CommandResult::Quit,
        _ => CommandResult::Error(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    }
}

/// Reload the result log and show it.
fn cmd_results(store: &ResultStore, dashboard: &mut Dashboard) -> CommandResult {
    match store.load() {
        Ok(results) => {
            let count = results.len();
            dashboard.results = results;
            dashboard.view = DashboardView::Results;
            CommandResult::Ok(Some(format!("Showing {} result(s).", count)))
        }
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

/// Show the subject list.
fn cmd_subjects(dashboard: &mut Dashboard) -> CommandResult {
    dashboard.view = DashboardView::Subjects;
    CommandResult::Ok(Some("Viewing subjects.".to_string()))
}

/// Register a subject.
fn cmd_subject(service: &mut QuizService, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return CommandResult::Error("Usage: subject <key> <label>".to_string());
    }

    let key = args[0];
    let label = args[1..].join(" ");

    match service.add_subject(key, &label) {
        Ok(()) => CommandResult::Ok(Some(format!("Subject '{}' saved.", key))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

/// Append a question to a subject's bank. The pieces are pipe-separated
/// because the text and options contain spaces; the correct option is
/// given as a 1-based number.
fn cmd_question(service: &mut QuizService, input: &str) -> CommandResult {
    const USAGE: &str =
        "Usage: question <subject> | <text> | <option> | <option> [| ...] | <correct#>";

    let rest = match input.split_once(char::is_whitespace) {
        Some((_, rest)) => rest,
        None => return CommandResult::Error(USAGE.to_string()),
    };

    let segments: Vec<&str> = rest.split('|').map(str::trim).collect();
    if segments.len() < 4 || segments[0].is_empty() {
        return CommandResult::Error(USAGE.to_string());
    }

    let subject = segments[0];
    let text = segments[1];
    let options: Vec<String> = segments[2..segments.len() - 1]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let correct = segments[segments.len() - 1];
    let correct_number: usize = match correct.parse() {
        Ok(n) if n >= 1 => n,
        _ => {
            return CommandResult::Error(format!(
                "The correct option must be a 1-based number, got '{}'.",
                correct
            ));
        }
    };

    match service.add_question(subject, text, options, correct_number - 1) {
        Ok(id) => CommandResult::Ok(Some(format!("Question {} added to '{}'.", id, subject))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

/// Switch the dashboard view by name.
fn cmd_view(store: &ResultStore, dashboard: &mut Dashboard, args: &[&str]) -> CommandResult {
    match args.first().map(|a| a.to_lowercase()).as_deref() {
        None | Some("results") => cmd_results(store, dashboard),
        Some("subjects") => cmd_subjects(dashboard),
        Some("help") => cmd_help(dashboard),
        Some(other) => CommandResult::Error(format!("Unknown view: {}", other)),
    }
}

/// Show the help view, remembering where to return.
fn cmd_help(dashboard: &mut Dashboard) -> CommandResult {
    dashboard.previous_view = Some(dashboard.view);
    dashboard.view = DashboardView::Help;
    CommandResult::Ok(None)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::service::{QuestionBank, SubjectManager};

    fn fixture() -> (QuizService, ResultStore, Dashboard) {
        let mut subjects = SubjectManager::new();
        subjects.add_subject("math", "Mathematics").unwrap();
        let service = QuizService::new(QuestionBank::new(), subjects);
        // A path that never exists: the store loads as empty.
        let store = ResultStore::new(
            std::env::temp_dir().join(format!("examroom-cmd-{}.json", Uuid::new_v4())),
        );
        (service, store, Dashboard::new())
    }

    #[test]
    fn test_empty_input_is_a_quiet_ok() {
        let (mut service, store, mut dashboard) = fixture();
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "   "),
            CommandResult::Ok(None)
        ));
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let (mut service, store, mut dashboard) = fixture();
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "frobnicate"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_subject_command_registers_with_multiword_label() {
        let (mut service, store, mut dashboard) = fixture();

        let result = execute_command(
            &mut service,
            &store,
            &mut dashboard,
            "SUBJECT cs Computer Science",
        );

        assert!(matches!(result, CommandResult::Ok(Some(_))));
        assert_eq!(service.subjects().label_for("cs"), "Computer Science");
    }

    #[test]
    fn test_subject_command_usage_error() {
        let (mut service, store, mut dashboard) = fixture();
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "subject cs"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_question_command_appends_with_one_based_correct() {
        let (mut service, store, mut dashboard) = fixture();

        let result = execute_command(
            &mut service,
            &store,
            &mut dashboard,
            "question math | What is 2+2? | 3 | 4 | 5 | 2",
        );

        assert!(matches!(result, CommandResult::Ok(Some(_))));
        let questions = service.questions_for("math");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "What is 2+2?");
        assert_eq!(questions[0].options, vec!["3", "4", "5"]);
        assert_eq!(questions[0].correct_index, 1);
    }

    #[test]
    fn test_question_command_rejects_bad_shapes() {
        let (mut service, store, mut dashboard) = fixture();

        // Too few segments.
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "question math | Q?"),
            CommandResult::Error(_)
        ));
        // Correct option is not a 1-based number.
        assert!(matches!(
            execute_command(
                &mut service,
                &store,
                &mut dashboard,
                "question math | Q? | a | b | 0"
            ),
            CommandResult::Error(_)
        ));
        // Correct option out of range, rejected by the service.
        assert!(matches!(
            execute_command(
                &mut service,
                &store,
                &mut dashboard,
                "question math | Q? | a | b | 3"
            ),
            CommandResult::Error(_)
        ));
        assert!(service.questions_for("math").is_empty());
    }

    #[test]
    fn test_results_command_loads_and_switches_view() {
        let (mut service, store, mut dashboard) = fixture();
        dashboard.view = DashboardView::Subjects;

        let result = execute_command(&mut service, &store, &mut dashboard, "results");

        assert!(matches!(result, CommandResult::Ok(Some(_))));
        assert_eq!(dashboard.view, DashboardView::Results);
        assert!(dashboard.results.is_empty());
    }

    #[test]
    fn test_help_remembers_the_previous_view() {
        let (mut service, store, mut dashboard) = fixture();
        dashboard.view = DashboardView::Subjects;

        execute_command(&mut service, &store, &mut dashboard, "help");

        assert_eq!(dashboard.view, DashboardView::Help);
        assert_eq!(dashboard.previous_view, Some(DashboardView::Subjects));
    }

    #[test]
    fn test_logout_and_quit_pass_through() {
        let (mut service, store, mut dashboard) = fixture();
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "logout"),
            CommandResult::Logout
        ));
        assert!(matches!(
            execute_command(&mut service, &store, &mut dashboard, "exit"),
            CommandResult::Quit
        ));
    }
}
