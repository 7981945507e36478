//! Login screen.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{App, LoginField, LoginRole};

/// Render the login form.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.login;

    let chunks = Layout::vertical([
        Constraint::Percentage(30),
        Constraint::Length(14),
        Constraint::Percentage(30),
    ])
    .split(area);

    let (role_line, first_label, second_label) = match form.role {
        LoginRole::Student => ("Student login", "Name: ", "Student id: "),
        LoginRole::Teacher => ("Teacher login", "Username: ", "Password: "),
    };

    // The teacher password is never echoed.
    let second_value = match form.role {
        LoginRole::Student => form.id_input.clone(),
        LoginRole::Teacher => "*".repeat(form.id_input.chars().count()),
    };

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "EXAMROOM",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(role_line, Style::default().fg(Color::Green))),
        Line::from(""),
        input_line(
            first_label,
            form.name_input.clone(),
            form.field == LoginField::Name,
        ),
        Line::from(""),
        input_line(second_label, second_value, form.field == LoginField::Id),
        Line::from(""),
    ];

    if let Some(err) = &form.error {
        content.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "[Tab] switch field  ·  [Up/Down] switch role  ·  [Enter] log in",
        Style::default().fg(Color::DarkGray),
    )));
    content.push(Line::from(Span::styled(
        "[g] continue as guest  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn input_line(label: &str, value: String, focused: bool) -> Line<'_> {
    let value_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(label.to_string(), Style::default().fg(Color::White)),
        Span::styled(value, value_style),
    ];
    if focused {
        spans.push(Span::styled("_", value_style));
    }
    Line::from(spans)
}
