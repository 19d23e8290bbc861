use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuestionKind;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let has_image = question.image.is_some();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(if has_image { 5 } else { 4 }),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], app);

    match app.kind() {
        QuestionKind::Standard => render_options(frame, chunks[2], app),
        QuestionKind::YesNoMulti => render_statements(frame, chunks[2], app),
    }

    render_controls(frame, chunks[3], app.kind());
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "{}/{}",
        app.current_question_number(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let mut lines = vec![Line::from(Span::styled(
        question.question.as_str(),
        Style::default().fg(Color::White).bold(),
    ))];

    // Images are not rendered in a terminal; show where to find them.
    if let Some(image) = &question.image {
        lines.push(Line::from(
            format!("[image: {}]", image).fg(Color::DarkGray).italic(),
        ));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let toggled = app.toggled();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let is_cursor = index == app.cursor();
        let is_toggled = toggled.get(index).copied().unwrap_or(false);

        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_toggled {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let checkbox = if is_toggled { "[x]" } else { "[ ]" };
        let letter = (b'A' + index as u8) as char;

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, checkbox), style),
            Span::styled(format!("{}. ", letter), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// One row per statement; each row holds its own yes/no choice.
fn render_statements(frame: &mut Frame, area: Rect, app: &App) {
    let question = app.current_question();
    let choices = app.choices();
    let mut lines: Vec<Line> = Vec::with_capacity(choices.len() * 2);

    for (index, choice) in choices.iter().enumerate() {
        let is_cursor = index == app.cursor();
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };

        let mut spans = vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}: ", index + 1), style),
        ];
        for (opt_index, option) in question.options.iter().enumerate() {
            let picked = *choice == Some(opt_index);
            let opt_style = if picked {
                Style::default().fg(Color::Green).bold()
            } else {
                style
            };
            let tag = if picked { "(o)" } else { "( )" };
            spans.push(Span::styled(format!("{} {}  ", tag, option), opt_style));
        }

        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect, kind: QuestionKind) {
    let text = match kind {
        QuestionKind::Standard => "j/k navigate  ·  space toggle  ·  enter submit  ·  q quit",
        QuestionKind::YesNoMulti => "j/k navigate  ·  y/n choose  ·  enter submit  ·  q quit",
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
