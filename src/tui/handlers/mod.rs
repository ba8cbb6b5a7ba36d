//! Event handlers for the TUI: keyboard and mouse.

mod submit;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;

use crate::core::client::AskClient;
use crate::core::error::AskError;

use super::app::{App, ScrollPosition};
use super::constants;
use super::shortcuts::Shortcut;

/// Receiver for the request in flight.
pub struct PendingSubmit {
    pub result_rx: mpsc::Receiver<Result<String, AskError>>,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context for key handling.
pub(crate) struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub client: &'a Arc<AskClient>,
    pub pending: &'a mut Option<PendingSubmit>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event: shortcuts first, then text entry.
pub(crate) fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        client,
        pending,
        rt,
    } = ctx;

    if let Some(shortcut) = Shortcut::match_key(&key) {
        match shortcut {
            Shortcut::Quit => return HandleResult::Break,
            Shortcut::Submit => {
                if pending.is_none()
                    && let Some(query) = app.begin_submission()
                {
                    log::debug!("submitting question ({} chars)", query.chars().count());
                    *pending = Some(submit::spawn_submit(rt, Arc::clone(client), query));
                }
            }
            Shortcut::ClearInput => app.input.clear(),
            Shortcut::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
            Shortcut::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
            Shortcut::PageUp => app.scroll_up(constants::SCROLL_LINES_PAGE),
            Shortcut::PageDown => app.scroll_down(constants::SCROLL_LINES_PAGE),
            Shortcut::Top => app.scroll = ScrollPosition::Top,
            Shortcut::Bottom => app.scroll = ScrollPosition::Bottom,
        }
        return HandleResult::Continue;
    }

    edit_input(key, app);
    HandleResult::Continue
}

/// Text entry in the input field. The field stays editable while a request is pending.
fn edit_input(key: KeyEvent, app: &mut App) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            // Ignore Ctrl/Alt chords: user likely intended a shortcut
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                return;
            }
            app.input.push(c);
        }
        _ => {}
    }
}

/// Handle a mouse event (wheel scrolls the answer pane).
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
}
