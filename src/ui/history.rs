use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::data::HISTORY_DISPLAY_LIMIT;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!("QUIZ HISTORY (last {} attempts)", HISTORY_DISPLAY_LIMIT),
        Style::default().fg(Color::Cyan).bold(),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray));
    frame.render_widget(title, chunks[0]);

    let lines: Vec<Line> = if app.history().is_empty() {
        vec![Line::from(
            "No history yet. Complete a quiz to see your results.".fg(Color::Gray),
        )]
    } else {
        app.history()
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("{}  ", entry.date),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("{}/{} ({}%)", entry.correct, entry.total, entry.score),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1)));
    frame.render_widget(widget, chunks[1]);

    if let Some(message) = app.reset_message() {
        let widget = Paragraph::new(message)
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(widget, chunks[2]);
    }

    let controls = Paragraph::new("r reset learned questions  ·  esc back  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}
