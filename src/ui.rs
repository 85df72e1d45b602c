pub mod charting;

use keystreak::{
    arcade::{Arcade, ArcadePhase, Feedback},
    practice::Practice,
    scoring::{CharCell, CharState},
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, Gauge, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{App, AppMode};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.mode {
            AppMode::Practice(practice) => render_practice(practice, area, buf),
            AppMode::Arcade(arcade) => render_arcade(arcade, area, buf),
        }
    }
}

/// Styled spans for the reference text, one per character
fn prompt_spans(cells: &[CharCell]) -> Vec<Span<'static>> {
    let green_bold_style = bold_style().fg(Color::Green);
    let red_bold_style = bold_style().fg(Color::Red);
    let underlined_dim_bold_style = dim_bold_style().add_modifier(Modifier::UNDERLINED);

    cells
        .iter()
        .map(|cell| match (cell.state, cell.caret) {
            (CharState::Incorrect, _) => Span::styled(
                match cell.expected {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            (CharState::Correct, _) => Span::styled(cell.expected.to_string(), green_bold_style),
            (CharState::Untyped, true) => {
                Span::styled(cell.expected.to_string(), underlined_dim_bold_style)
            }
            (CharState::Untyped, false) => Span::styled(cell.expected.to_string(), dim_bold_style()),
        })
        .collect()
}

fn render_practice(practice: &Practice, area: Rect, buf: &mut Buffer) {
    let summary = practice.summary();
    let prompt = practice.current_text();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_occupied_lines = if prompt.width() <= max_chars_per_line as usize {
        1
    } else {
        ((prompt.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };
    let chart_lines = if practice.history().is_empty() { 0 } else { 10 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // padding
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(1), // padding
            Constraint::Length(1), // progress
            Constraint::Length(1), // live stats
            Constraint::Min(1),    // padding
            Constraint::Length(chart_lines),
            Constraint::Length(1), // history stats
            Constraint::Length(1), // last attempt
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled("< ", dim_bold_style()),
        Span::styled(practice.difficulty().to_string(), bold_style().fg(Color::Cyan)),
        Span::styled(" >", dim_bold_style()),
        Span::styled(
            format!(
                "   text {}/{}   streak {}",
                text_number(practice),
                practice.challenges().len(),
                summary.streak
            ),
            bold_style(),
        ),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    let widget = Paragraph::new(Line::from(prompt_spans(&practice.characters())))
        .alignment(if prompt_occupied_lines == 1 {
            // when the prompt is small enough to fit on one line
            // centering the text gives a nice zen feeling
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    widget.render(chunks[2], buf);

    let progress = practice.progress();
    Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio((progress / 100.0).clamp(0.0, 1.0))
        .label(format!("{progress:.0}%"))
        .render(chunks[4], buf);

    // live figures while typing, the last finished attempt otherwise
    let (wpm, accuracy) = if practice.is_active() {
        (practice.live_wpm(), practice.live_accuracy())
    } else {
        (summary.current_wpm, summary.current_accuracy)
    };
    let live = Paragraph::new(Span::styled(
        format!(
            "{:.1}s   {} errors   {} wpm   {}% acc",
            practice.elapsed_secs(),
            practice.error_count(),
            wpm,
            accuracy
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center);
    live.render(chunks[5], buf);

    if !practice.history().is_empty() {
        render_history_chart(practice, chunks[7], buf);
    }

    let history_line = match practice.history().stats() {
        Some(stats) => format!(
            "{} attempts   best {} wpm   mean {:.0} wpm   {:.0}% acc   {:.2} sd",
            stats.attempts,
            stats.best_wpm,
            stats.mean_wpm,
            stats.mean_accuracy,
            stats.wpm_std_dev
        ),
        None => String::from("start typing to begin"),
    };
    Paragraph::new(Span::styled(
        history_line,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);

    if let Some(latest) = practice.history().latest() {
        Paragraph::new(Span::styled(
            format!(
                "last: {} wpm   {}% acc   {:.1}s   at {}",
                latest.wpm,
                latest.accuracy,
                latest.elapsed_secs,
                latest.completed_at.format("%H:%M:%S")
            ),
            dim_bold_style(),
        ))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
    }

    Paragraph::new(Span::styled(
        "(tab) restart / (←/→) difficulty / (esc)ape",
        italic_style(),
    ))
    .render(chunks[10], buf);
}

/// One-based position of the current text, 0 when there are none
fn text_number(practice: &Practice) -> usize {
    if practice.challenges().is_empty() {
        0
    } else {
        practice.challenge_index() + 1
    }
}

fn render_history_chart(practice: &Practice, area: Rect, buf: &mut Buffer) {
    let (attempts, y_max) = charting::compute_chart_params(practice.history());
    let wpm_points = charting::wpm_points(practice.history());
    let accuracy_points = charting::accuracy_points(practice.history());

    let datasets = vec![
        Dataset::default()
            .name("wpm")
            .marker(ratatui::symbols::Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&wpm_points),
        Dataset::default()
            .name("acc %")
            .marker(ratatui::symbols::Marker::Braille)
            .style(Style::default().fg(Color::Green))
            .graph_type(GraphType::Line)
            .data(&accuracy_points),
    ];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("attempt")
                .bounds([1.0, attempts])
                .labels(vec![
                    Span::styled("1", bold_style()),
                    Span::styled(charting::format_label(attempts), bold_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm / acc")
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::styled("0", bold_style()),
                    Span::styled(charting::format_label(y_max), bold_style()),
                ]),
        )
        .render(area, buf);
}

fn render_arcade(arcade: &Arcade, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),
            Constraint::Length(1), // word or title
            Constraint::Length(1),
            Constraint::Length(1), // input or detail
            Constraint::Length(1), // level progress
            Constraint::Length(1), // stats
            Constraint::Min(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let level_name = arcade
        .current_level()
        .map(|l| l.name.as_str())
        .unwrap_or_default();
    Paragraph::new(Span::styled(
        format!(
            "level {} {}   time {}s   score {}   best {}",
            arcade.level() + 1,
            level_name,
            arcade.time_left(),
            arcade.score(),
            arcade.high_score()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let (title, detail, legend): (Line, Line, &str) = match arcade.phase() {
        ArcadePhase::Ready => (
            Line::from(Span::styled("ARCADE", bold_style().fg(Color::Yellow))),
            Line::from(Span::styled(
                format!("type each word before the clock runs out, {level_name} first"),
                italic_style(),
            )),
            "(enter) start / (esc)ape",
        ),
        ArcadePhase::Playing(_) => {
            let input_style = match arcade.feedback() {
                Some(Feedback::Incorrect) => bold_style().fg(Color::Red),
                Some(Feedback::Correct) => bold_style().fg(Color::Green),
                None => bold_style(),
            };
            (
                Line::from(Span::styled(
                    arcade.current_word().to_string(),
                    bold_style().fg(Color::Cyan),
                )),
                Line::from(vec![
                    Span::styled(arcade.input().to_string(), input_style),
                    Span::styled("_", dim_bold_style()),
                ]),
                "(esc)ape",
            )
        }
        ArcadePhase::Over => (
            Line::from(Span::styled("GAME OVER", bold_style().fg(Color::Red))),
            Line::from(Span::styled(
                if arcade.is_new_high_score() {
                    format!("new high score: {}!", arcade.score())
                } else {
                    format!("final score: {}", arcade.score())
                },
                bold_style().fg(Color::Yellow),
            )),
            "(enter) play again / (esc)ape",
        ),
    };

    Paragraph::new(title)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
    Paragraph::new(detail)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    if arcade.is_playing() {
        let progress = arcade.level_progress();
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio((progress / 100.0).clamp(0.0, 1.0))
            .label(format!("level {progress:.0}%"))
            .render(chunks[5], buf);
    }

    Paragraph::new(Span::styled(
        format!(
            "{}% acc   {} words   {} mistakes",
            arcade.accuracy(),
            arcade.words_typed(),
            arcade.mistakes()
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);

    Paragraph::new(Span::styled(legend, italic_style())).render(chunks[8], buf);
}
