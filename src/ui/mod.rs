mod dashboard;
mod login;
mod quiz;
mod result;
mod subjects;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Screen};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.screen {
        Screen::Login => login::render(frame, area, app),
        Screen::Subjects => subjects::render(frame, area, app),
        Screen::Quiz => quiz::render(frame, area, app),
        Screen::Result => result::render(frame, area, app),
        Screen::Dashboard => dashboard::render(frame, area, app),
    }
}
