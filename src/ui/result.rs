use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::QuizEngine;
use crate::scoring::{QuizSummary, Tier};

const QUESTION_PREVIEW_LENGTH: usize = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(engine) = app.engine() else {
        return;
    };
    let Some(summary) = engine.summary() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], &summary);
    render_score_gauge(frame, chunks[2], &summary);
    render_assessment(frame, chunks[3], summary.tier);
    render_question_breakdown(frame, chunks[4], engine, app.result_scroll());
    render_controls(frame, chunks[5]);
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Excellent => Color::Green,
        Tier::Good => Color::Cyan,
        Tier::NeedsReview => Color::Yellow,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ COMPLETED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(summary.title.as_str().fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Your score: {} out of {} ({}%)",
                summary.score, summary.total, summary.percentage
            ),
            Style::default().fg(tier_color(summary.tier)).bold(),
        )),
    ];

    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        area,
    );
}

fn render_score_gauge(frame: &mut Frame, area: Rect, summary: &QuizSummary) {
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(tier_color(summary.tier)).bg(Color::Black))
        .percent(u16::from(summary.percentage))
        .label(format!("{}%", summary.percentage));
    frame.render_widget(widget, area);
}

fn render_assessment(frame: &mut Frame, area: Rect, tier: Tier) {
    let content = vec![
        Line::from(Span::styled(
            format!("Performance: {}", tier.label()),
            Style::default().bold(),
        )),
        Line::from(tier.message().fg(tier_color(tier))),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(frame: &mut Frame, area: Rect, engine: &QuizEngine, scroll: usize) {
    let lines: Vec<Line> = engine
        .answer_breakdown()
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let (symbol, color) = if record.is_correct {
                ("+", Color::Green)
            } else {
                ("-", Color::Red)
            };

            let mut spans = vec![
                Span::styled(format!(" {} ", symbol), Style::default().fg(color)),
                Span::styled(
                    format!("{:2}. ", index + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(truncate_question(record.prompt), Style::default().fg(Color::Gray)),
            ];
            if !record.is_correct {
                spans.push(Span::styled(
                    format!("  → {}", record.correct_text),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::new(1, 1, 1, 0)))
        .scroll((scroll as u16, 0));
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
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  m menu  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
