//! Centralized keyboard shortcuts.
//!
//! | Action  | Keys                          |
//! |---------|-------------------------------|
//! | Ask     | Enter                         |
//! | Clear   | Ctrl+U                        |
//! | Scroll  | ↑ ↓ PageUp PageDown Home End  |
//! | Quit    | Esc, Ctrl+C                   |
//!
//! Every other printable key edits the input field.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Submit,
    ClearInput,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches. Only key presses count.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('u') if ctrl => Some(Shortcut::ClearInput),
            KeyCode::Esc => Some(Shortcut::Quit),
            KeyCode::Enter => Some(Shortcut::Submit),
            KeyCode::Up => Some(Shortcut::ScrollUp),
            KeyCode::Down => Some(Shortcut::ScrollDown),
            KeyCode::PageUp => Some(Shortcut::PageUp),
            KeyCode::PageDown => Some(Shortcut::PageDown),
            KeyCode::Home => Some(Shortcut::Top),
            KeyCode::End => Some(Shortcut::Bottom),
            _ => None,
        }
    }
}


/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(is_pending: bool) -> Line<'static> {
        if is_pending {
            Line::from(vec![
                Span::styled("Waiting for answer  ", Color::Yellow),
                Span::styled("↑↓ ", DIM),
                Span::raw("scroll"),
                Span::styled("  Esc ", DIM),
                Span::raw("quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("Enter ", DIM),
                Span::raw("ask"),
                Span::styled("  Ctrl+U ", DIM),
                Span::raw("clear"),
                Span::styled("  ↑↓ ", DIM),
                Span::raw("scroll"),
                Span::styled("  Esc ", DIM),
                Span::raw("quit"),
            ])
        }
    }
}
