//! Teacher dashboard renderer.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::{App, DashboardView, aggregate_by_subject};

/// Render the dashboard based on current state.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header
        Constraint::Min(10),   // Main content
        Constraint::Length(3), // Command history (last message)
        Constraint::Length(3), // Command input
    ])
    .split(area);

    render_header(frame, chunks[0], app);
    render_main_content(frame, chunks[1], app);
    render_command_history(frame, chunks[2], app);
    render_command_input(frame, chunks[3], app);
}

/// Render the header with bank and log info.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let subjects = app.service.subjects().all();
    let question_total: usize = subjects
        .iter()
        .map(|s| app.service.question_count(&s.key))
        .sum();

    let header_text = format!(
        " Subjects: {}  |  Questions: {}  |  Results: {}  |  Log: {}",
        subjects.len(),
        question_total,
        app.dashboard.results.len(),
        app.store.path().display()
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Green).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Teacher Dashboard ")
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

fn render_main_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.dashboard.view {
        DashboardView::Results => render_results(frame, area, app),
        DashboardView::Subjects => render_subjects(frame, area, app),
        DashboardView::Help => render_help(frame, area),
    }
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40), // Per-subject aggregates
        Constraint::Percentage(60), // Recent records
    ])
    .margin(1)
    .split(area);

    render_aggregates(frame, chunks[0], app);
    render_recent(frame, chunks[1], app);
}

fn render_aggregates(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for stats in aggregate_by_subject(&app.dashboard.results) {
        // Progress bar over the average percentage
        let bar_width = 15;
        let filled = ((stats.average_percentage / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(empty));

        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<18}", stats.subject),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:>3} attempt(s)  ", stats.attempts),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(bar, Style::default().fg(Color::Yellow)),
            Span::styled(
                format!(" avg {:>3.0}%", stats.average_percentage),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("  best {:>3.0}%", stats.best_percentage),
                Style::default().fg(Color::Green),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No results yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" By Subject ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_recent(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    // Show last N records (most recent first)
    let max_display = (area.height as usize).saturating_sub(3);
    for result in app.dashboard.results.iter().rev().take(max_display) {
        let color = grade_color(result.grade());

        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<14}", result.student_name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:<16}", result.subject),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!(
                    "{}/{} ({:.0}%) {}",
                    result.score,
                    result.total_questions,
                    result.percentage(),
                    result.grade()
                ),
                Style::default().fg(color),
            ),
            Span::styled(
                format!("  {}  {}", result.time_status(), result.taken_at.format("%Y-%m-%d %H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  Waiting for results...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Recent Results ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_subjects(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for subject in app.service.subjects().all() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<18}", subject.key),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("{:<24}", subject.label),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{} question(s)", app.service.question_count(&subject.key)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No subjects yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Subjects ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

/// Render the help view.
fn render_help(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AVAILABLE COMMANDS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  results                ", Style::default().fg(Color::Yellow)),
            Span::raw("Reload and show the result log"),
        ]),
        Line::from(vec![
            Span::styled("  subjects               ", Style::default().fg(Color::Yellow)),
            Span::raw("Show subjects and question counts"),
        ]),
        Line::from(vec![
            Span::styled("  subject <key> <label>  ", Style::default().fg(Color::Yellow)),
            Span::raw("Add a subject or rename its label"),
        ]),
        Line::from(vec![
            Span::styled("  question <subject> | <text> | <option> | <option> [| ...] | <correct#>", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("                         ", Style::default()),
            Span::raw("Add a question (correct option is 1-based)"),
        ]),
        Line::from(vec![
            Span::styled("  view <name>            ", Style::default().fg(Color::Yellow)),
            Span::raw("Switch view: results, subjects or help"),
        ]),
        Line::from(vec![
            Span::styled("  logout                 ", Style::default().fg(Color::Yellow)),
            Span::raw("Back to the login screen"),
        ]),
        Line::from(vec![
            Span::styled("  quit / exit            ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit the application"),
        ]),
        Line::from(vec![
            Span::styled("  help / ?               ", Style::default().fg(Color::Yellow)),
            Span::raw("Show this help"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab cycles views  ·  Press Esc or Enter to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(2)),
    );

    frame.render_widget(widget, area);
}

/// Render the last command history message.
fn render_command_history(frame: &mut Frame, area: Rect, app: &App) {
    let last_msg = app
        .dashboard
        .command_history
        .last()
        .map(|s| s.as_str())
        .unwrap_or("");

    let history = Paragraph::new(last_msg)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(history, area);
}

/// Render the command input bar.
fn render_command_input(frame: &mut Frame, area: Rect, app: &App) {
    let input_text = format!("> {}", app.dashboard.command_input);

    let input = Paragraph::new(input_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(input, area);

    // Show cursor position
    let cursor_x = area.x + cursor_column(&app.dashboard.command_input);
    let cursor_y = area.y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Cursor offset inside the command box: one column of border, then the
/// "> " prompt, then the typed characters (not bytes).
fn cursor_column(input: &str) -> u16 {
    3 + input.chars().count() as u16
}

fn grade_color(grade: &str) -> Color {
    match grade {
        "A+" => Color::Green,
        "A" => Color::Cyan,
        "B" | "C" => Color::Yellow,
        _ => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_column_counts_chars_not_bytes() {
        assert_eq!(cursor_column(""), 3);
        assert_eq!(cursor_column("results"), 10);
        // Multibyte input: "é" is one column but two bytes.
        assert_eq!(cursor_column("résumé"), 9);
    }
}
