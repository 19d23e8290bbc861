use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let Some(verdict) = app.last_verdict() else {
        return;
    };

    let (headline, color) = if verdict.is_correct {
        ("Correct!", Color::Green)
    } else {
        ("Wrong.", Color::Red)
    };

    let header = Paragraph::new(Line::from(Span::styled(
        headline,
        Style::default().fg(color).bold(),
    )))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Color::DarkGray));
    frame.render_widget(header, chunks[1]);

    let mut lines = Vec::new();
    if !verdict.is_correct {
        lines.push(Line::from(vec![
            Span::styled("Correct answer(s): ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                verdict.correct_display.as_str(),
                Style::default().fg(Color::White),
            ),
        ]));
        lines.push(Line::from(""));
    }
    if let Some(explanation) = &app.current_question().explanation {
        lines.push(Line::from(Span::styled(
            explanation.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(body, chunks[2]);

    let controls = Paragraph::new("enter continue  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[3]);
}
