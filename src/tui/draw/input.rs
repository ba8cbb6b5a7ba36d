//! Input section: question field, submit control, bottom bar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::super::app::App;
use super::super::constants::{ACCENT, INPUT_PLACEHOLDER, SUBMIT_LABEL};
use super::super::shortcuts;

/// Display columns taken by `s` (wide characters count twice).
fn columns(s: &str) -> usize {
    textwrap::core::display_width(s)
}

/// Tail of `input` that fits in `width` columns with one column left for the cursor.
pub(super) fn visible_tail(input: &str, width: usize) -> &str {
    if columns(input) < width {
        return input;
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut start = input.len();
    for (idx, c) in input.char_indices().rev() {
        let w = columns(c.encode_utf8(&mut [0u8; 4]));
        if used + w > budget {
            break;
        }
        used += w;
        start = idx;
    }
    &input[start..]
}

/// Submit control style: highlighted when enabled, greyed out otherwise.
pub(super) fn submit_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw the input block and set cursor position.
fn draw_input_block(f: &mut Frame, app: &App, input_area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if app.is_pending() {
            Color::DarkGray
        } else {
            ACCENT
        }))
        .title(Span::styled(" Question ", Style::default().fg(Color::DarkGray)));
    let inner = input_block.inner(input_area);
    let shown = visible_tail(&app.input, inner.width as usize);
    let input_content = if app.input.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(shown)
    };
    let input_paragraph = Paragraph::new(Line::from(input_content))
        .block(input_block)
        .style(Style::default().fg(Color::White));
    f.render_widget(input_paragraph, input_area);
    let cx = inner.x + columns(shown).min(inner.width as usize) as u16;
    f.set_cursor_position(Position::new(cx, inner.y));
}

fn draw_submit(f: &mut Frame, app: &App, area: Rect) {
    let label = if app.is_pending() { " ... " } else { SUBMIT_LABEL };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let button = Paragraph::new(Line::from(Span::styled(
        label,
        submit_style(app.can_submit()),
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(button, area);
}

/// Bottom bar: state-dependent shortcuts.
fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = shortcuts::labels::bottom_bar(app.is_pending());
    f.render_widget(Paragraph::new(shortcuts).alignment(Alignment::Right), area);
}

pub(crate) fn draw_input_section(f: &mut Frame, app: &App, input_section: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(input_section);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(SUBMIT_LABEL.chars().count() as u16 + 4),
        ])
        .split(rows[0]);

    draw_input_block(f, app, cols[0]);
    draw_submit(f, app, cols[1]);
    draw_bottom_bar(f, app, rows[1]);
}
