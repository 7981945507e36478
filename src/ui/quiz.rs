//! Quiz screen.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };
    let session = &quiz.session;
    let question = session.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let header = Layout::horizontal([Constraint::Fill(1), Constraint::Length(10)]).split(chunks[0]);
    render_subject_and_time(frame, header[0], app);
    render_progress(frame, header[1], app);

    render_question_text(frame, chunks[2], &question.text);
    render_options(frame, chunks[3], app);
    render_answered(frame, chunks[4], app);
    render_controls(frame, chunks[5]);
}

fn render_subject_and_time(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };
    let remaining = quiz.remaining_secs();
    let time_color = if remaining <= 10 {
        Color::Red
    } else {
        Color::Yellow
    };

    let line = Line::from(vec![
        Span::styled(
            quiz.session.subject_label.clone(),
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Time left: {}s", remaining),
            Style::default().fg(time_color),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };
    let progress = format!(
        "{}/{}",
        quiz.session.current_index + 1,
        quiz.session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };
    let question = quiz.session.current_question();
    let recorded = quiz.session.answer_for(question.id);

    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);
    for (index, option) in question.options.iter().enumerate() {
        let is_selected = index == app.selected_option;
        let is_recorded = recorded == Some(index);

        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else if is_recorded {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        let mut spans = vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ];
        if is_recorded {
            spans.push(Span::styled(
                "  (saved)",
                Style::default().fg(Color::DarkGray),
            ));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_answered(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };
    let widget = Paragraph::new(format!(
        "Answered {}/{}",
        quiz.session.attempted_count(),
        quiz.session.total_questions()
    ))
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new(
        "[Up/Down] choose  ·  [Enter] save  ·  [Left/Right] move  ·  [s] submit  ·  [Esc] leave",
    )
    .alignment(Alignment::Center)
    .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
