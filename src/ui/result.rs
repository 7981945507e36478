//! Result screen.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::QuizResult;

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.last_result else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_summary(frame, chunks[1], app, result);
    render_question_breakdown(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn grade_color(grade: &str) -> Color {
    match grade {
        "A+" => Color::Green,
        "A" => Color::Cyan,
        "B" | "C" => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App, result: &QuizResult) {
    let grade = result.grade();
    let color = grade_color(grade);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} ({})  ·  {}", result.student_name, result.student_id, result.subject),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)  ·  Grade {}",
                result.score,
                result.total_questions,
                result.percentage(),
                grade
            ),
            Style::default().fg(color).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{}  ·  {}s of {}s  ·  {} attempted",
                result.time_status(),
                result.time_used_secs,
                result.time_limit_secs,
                result.attempted
            ),
            Style::default().fg(Color::Gray),
        )),
    ];

    if let Some(err) = &app.save_error {
        content.push(Line::from(Span::styled(
            format!("Result not saved: {}", err),
            Style::default().fg(Color::Red),
        )));
    } else {
        content.push(Line::from(""));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, app: &App) {
    let Some(quiz) = &app.quiz else {
        return;
    };

    let lines: Vec<Line> = quiz
        .session
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let answer = quiz.session.answer_for(question.id);
            let (symbol, color) = match answer {
                Some(choice) if question.is_correct(choice) => ("+", Color::Green),
                Some(_) => ("-", Color::Red),
                None => (".", Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    truncate_question(&question.text),
                    Style::default().fg(Color::Gray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("[r] retake  ·  [b] subjects  ·  [q] quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
