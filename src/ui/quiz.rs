use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::engine::{Feedback, OptionView, Phase, QuizEngine, Reveal};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(engine) = app.engine() else {
        return;
    };

    // Margin on both sides, then border and padding inside the feedback box.
    let content_width = area.width.saturating_sub(2);
    let description_height = wrapped_line_count(engine.description(), content_width);
    let feedback_height = engine.feedback().map_or(0, |feedback| {
        1 + wrapped_line_count(feedback.explanation, content_width.saturating_sub(4)) + 2
    });

    let chunks = Layout::vertical([
        Constraint::Length(1 + description_height),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(feedback_height),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], engine);
    render_progress(frame, chunks[1], engine);
    render_prompt(frame, chunks[2], &engine.current_question().prompt);
    render_options(
        frame,
        chunks[3],
        &engine.options(),
        app.option_cursor(),
        engine.phase(),
    );
    if let Some(feedback) = engine.feedback() {
        render_feedback(frame, chunks[4], feedback);
    }
    render_controls(frame, chunks[5], engine);
}

/// Rows `text` needs when word-wrapped to `width` columns.
///
/// Wraps one column early so the estimate never falls short of the
/// rendered paragraph.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = usize::from(width.saturating_sub(1)).max(1);
    let mut lines = 1;
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len <= width {
            line_len += 1 + word_len;
            continue;
        }
        if line_len > 0 {
            lines += 1;
        }
        // Words longer than a row are broken across rows.
        let extra_rows = (word_len - 1) / width;
        lines += extra_rows;
        line_len = word_len - extra_rows * width;
    }
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn render_header(frame: &mut Frame, area: Rect, engine: &QuizEngine) {
    let [top_row, description_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
    let [title_area, counter_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(22)]).areas(top_row);

    frame.render_widget(
        Paragraph::new(Span::styled(
            engine.title(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        title_area,
    );
    frame.render_widget(
        Paragraph::new(engine.description())
            .wrap(Wrap { trim: true })
            .fg(Color::DarkGray),
        description_area,
    );

    let counter = format!(
        "Question {} of {}",
        engine.current_question_number(),
        engine.total_questions()
    );
    frame.render_widget(
        Paragraph::new(counter)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        counter_area,
    );
}

fn render_progress(frame: &mut Frame, area: Rect, engine: &QuizEngine) {
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(engine.progress_percent())
        .label("");
    frame.render_widget(widget, area);
}

fn render_prompt(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold()
        .block(Block::default().padding(Padding::top(1)));
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[OptionView<'_>],
    cursor: usize,
    phase: Phase,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let (style, symbol) = option_style(option);
        let marker = if phase == Phase::Answering && index == cursor {
            ">"
        } else {
            " "
        };
        let radio = if option.selected { "(*)" } else { "( )" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, radio), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(option.text, style),
            Span::styled(symbol, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn option_style(option: &OptionView<'_>) -> (Style, &'static str) {
    match option.reveal {
        Some(Reveal::Correct) => (Style::default().fg(Color::Green).bold(), "  ✓"),
        Some(Reveal::IncorrectPick) => (Style::default().fg(Color::Red).bold(), "  ✗"),
        Some(Reveal::Other) => (Style::default().fg(Color::DarkGray), ""),
        None if option.selected => (Style::default().fg(Color::Cyan).bold(), ""),
        None => (Style::default().fg(Color::Gray), ""),
    }
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: Feedback<'_>) {
    let (verdict, color) = if feedback.correct {
        ("Correct!", Color::Green)
    } else {
        ("Incorrect", Color::Red)
    };

    let content = vec![
        Line::from(Span::styled(verdict, Style::default().fg(color).bold())),
        Line::from(feedback.explanation.fg(Color::Gray)),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(color)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, engine: &QuizEngine) {
    let enter_action = match engine.phase() {
        Phase::Answering if engine.can_submit() => Span::styled("enter submit", Color::Green),
        Phase::Answering => Span::styled("enter submit (pick an option)", Color::DarkGray),
        Phase::Revealed if engine.is_last_question() => {
            Span::styled("enter see results", Color::Green)
        }
        Phase::Revealed => Span::styled("enter next question", Color::Green),
        Phase::Completed => Span::raw(""),
    };

    let line = Line::from(vec![
        "j/k or 1-9 choose  ·  ".fg(Color::DarkGray),
        enter_action,
        "  ·  esc menu  ·  q quit".fg(Color::DarkGray),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
