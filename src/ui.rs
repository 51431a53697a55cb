use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{App, View};

const HORIZONTAL_MARGIN: u16 = 1;
const HEADER_HEIGHT: u16 = 8;
const STATS_WIDTH: u16 = 28;

#[derive(Debug, Clone, Copy, PartialEq)]
enum ButtonState {
    Default,
    Wrong,
    Right,
}

pub fn draw(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header = if self.settings.show_stats {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(STATS_WIDTH), Constraint::Min(10)])
                .split(chunks[0])
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(0), Constraint::Min(10)])
                .split(chunks[0])
        };

        if self.settings.show_stats {
            render_stats(self, header[0], buf);
        }
        render_prompt(self, header[1], buf);

        match &self.view {
            View::Asking(question) => {
                render_answers(&question.answers, |_| ButtonState::Default, chunks[1], buf)
            }
            View::Revealed {
                question,
                chosen,
                outcome,
            } => render_answers(
                &question.answers,
                |slot| {
                    if slot == outcome.correct_slot {
                        ButtonState::Right
                    } else if slot == *chosen {
                        ButtonState::Wrong
                    } else {
                        ButtonState::Default
                    }
                },
                chunks[1],
                buf,
            ),
            View::Unavailable(reason) => Paragraph::new(reason.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("No question"))
                .render(chunks[1], buf),
        }

        if let Some(status) = &self.status {
            let color = if status.is_error {
                Color::Yellow
            } else {
                Color::Green
            };
            Paragraph::new(status.text.as_str())
                .style(Style::default().fg(color))
                .render(chunks[2], buf);
        }

        Paragraph::new(menu_line(self))
            .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let stats = app.session.stats();
    let lines: Vec<Line> = stats
        .lines()
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let color = match i {
                0 => Color::Green,
                1 => Color::Red,
                _ => Color::Gray,
            };
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(color)),
                Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Stats"))
        .render(area, buf);
}

fn render_prompt(app: &App, area: Rect, buf: &mut Buffer) {
    let prompt = match &app.view {
        View::Asking(q) | View::Revealed { question: q, .. } => q.prompt.as_str(),
        View::Unavailable(_) => "",
    };
    let title = format!(
        "{} | {}",
        app.session.deck().direction(),
        app.session.policy()
    );

    // Vertically center a prompt that fits on one line.
    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2) as usize;
    let rows = if inner_width == 0 {
        1
    } else {
        prompt.width().div_ceil(inner_width).max(1) as u16
    };
    let padding = inner_height.saturating_sub(rows) / 2;
    let mut lines = vec![Line::default(); padding as usize];
    lines.push(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title))
        .render(area, buf);
}

fn render_answers(
    answers: &[String],
    state_of: impl Fn(usize) -> ButtonState,
    area: Rect,
    buf: &mut Buffer,
) {
    if answers.is_empty() {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Ratio(1, answers.len() as u32);
            answers.len()
        ])
        .split(area);

    for (slot, (answer, row)) in answers.iter().zip(rows.iter()).enumerate() {
        let style = match state_of(slot) {
            ButtonState::Default => Style::default(),
            ButtonState::Wrong => Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            ButtonState::Right => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        };
        let key = (slot + 1) % 10;
        let label = fit_label(answer, row.width.saturating_sub(8) as usize);

        Paragraph::new(format!("{key}. {label}"))
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .render(*row, buf);
    }
}

fn menu_line(app: &App) -> String {
    format!(
        "(1-{}) answer  (n)ext  (s)wap language  (m)emorize  (t)oggle stats  answers: {} (+/-)  order: (r)andom/(w)eakest  (esc)ape",
        app.settings.answer_count.min(10) % 10,
        app.settings.answer_count
    )
}

/// Truncates `text` to `max` display columns, marking the cut with an
/// ellipsis.
fn fit_label(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
