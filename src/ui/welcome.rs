use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let menu_height = (app.catalog().len() as u16) * 3;
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(menu_height + 2),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .horizontal_margin(4)
    .split(area);

    render_banner(frame, chunks[1]);
    render_modules(frame, chunks[2], app);
    render_controls(frame, chunks[3], app.completed_runs());
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "CYBER QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from("Pick a module to test what you learned".fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        area,
    );
}

fn render_modules(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::with_capacity(app.catalog().len() * 3);

    for (index, set) in app.catalog().iter().enumerate() {
        let is_selected = index == app.menu_index();
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(set.title.as_str(), style),
            Span::styled(
                format!("  ({} questions)", set.questions.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", set.description),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, completed_runs: usize) {
    let mut lines = vec![Line::from(
        "j/k choose  ·  enter start  ·  q quit".fg(Color::DarkGray),
    )];
    if completed_runs > 0 {
        lines.push(Line::from(Span::styled(
            format!("{} quiz(zes) completed this session", completed_runs),
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}
