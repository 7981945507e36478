//! Subject selection screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_list(frame, chunks[1], app);
    render_status(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let who = app
        .student
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("Guest");
    let header_text = format!(
        " {}  |  Questions per quiz: {}  |  Time limit: {}s",
        who, app.settings.question_count, app.settings.time_limit_secs
    );

    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Green).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pick a subject ")
                .title_style(Style::default().fg(Color::Cyan).bold()),
        );

    frame.render_widget(header, area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, subject) in app.service.subjects().all().iter().enumerate() {
        let is_selected = index == app.selected_subject;
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };
        let count = app.service.question_count(&subject.key);

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{:<24}", subject.label), style),
            Span::styled(
                format!("{} question(s)", count),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No subjects yet...",
            Style::default().fg(Color::DarkGray).italic(),
        )));
    }

    let widget =
        Paragraph::new(lines).block(Block::default().padding(Padding::new(1, 1, 1, 0)));
    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status_line else {
        return;
    };
    let widget = Paragraph::new(status.as_str()).fg(Color::Red);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("[Up/Down] select  ·  [Enter] start  ·  [Esc] logout  ·  [q] quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
