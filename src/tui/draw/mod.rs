//! TUI rendering: header, response pane, and input section.

mod header;
mod input;
mod response;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::app::App;

/// Input field (3 rows with borders) plus the bottom bar.
const INPUT_SECTION_HEIGHT: u16 = 4;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(INPUT_SECTION_HEIGHT),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0]);
    response::draw_response(f, app, chunks[1]);
    input::draw_input_section(f, app, chunks[2]);
}
