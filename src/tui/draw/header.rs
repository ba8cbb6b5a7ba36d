//! Header: logo (spinner while waiting), title, endpoint.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::time::Instant;

use crate::core::app;

use super::super::app::App;
use super::super::constants::{ACCENT, LOGO_IDLE, LOGO_THINKING};

/// Start time for header animation phase (thinking spinner).
static HEADER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Max width for the endpoint in the header; longer URLs keep their tail behind "…".
const ENDPOINT_HEADER_WIDTH: u16 = 40;

/// Keep the last `max_len - 1` characters behind "…" when `s` is too long.
pub(super) fn truncate_left(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len || max_len < 2 {
        return s.to_string();
    }
    let tail: String = s.chars().skip(count - (max_len - 1)).collect();
    format!("…{}", tail)
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(ENDPOINT_HEADER_WIDTH),
        ])
        .split(area);

    let logo_symbol = if app.is_pending() {
        let start = HEADER_START.get_or_init(Instant::now);
        let phase = start.elapsed().as_millis() as usize;
        LOGO_THINKING[(phase / 80) % LOGO_THINKING.len()]
    } else {
        LOGO_IDLE
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", logo_symbol),
            Style::default().fg(ACCENT),
        ))),
        chunks[0],
    );

    let title = Line::from(Span::styled(
        format!("{} ", app::NAME),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(title).alignment(Alignment::Center),
        chunks[1],
    );

    let endpoint = truncate_left(&app.endpoint, ENDPOINT_HEADER_WIDTH as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            endpoint,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Right),
        chunks[2],
    );
}
