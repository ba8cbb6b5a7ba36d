//! TUI (Text User Interface): one question field, one answer pane.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod syntax;
mod text;

use app::App;
use crossterm::event::{self, Event};
use crossterm::execute;
use std::io::{self};
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::client::AskClient;
use crate::core::error::ERROR_PREFIX;

use draw::draw;
use handlers::{HandleResult, PendingSubmit};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Deliver the outcome of the request in flight, if it has arrived.
fn poll_pending(app: &mut App, pending: &mut Option<PendingSubmit>) {
    let Some(submit) = pending.as_ref() else {
        return;
    };
    match submit.result_rx.try_recv() {
        Ok(result) => {
            if let Err(e) = &result {
                log::warn!("request failed: {}", e);
            }
            app.finish_submission(result);
            *pending = None;
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            log::error!("request worker exited without a result");
            app.fail_with_text(format!(
                "{}request worker stopped unexpectedly",
                ERROR_PREFIX
            ));
            *pending = None;
        }
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for the ask requests.
pub fn run(client: AskClient) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut app = App::new(client.endpoint().to_string());
    let client = Arc::new(client);
    let mut pending: Option<PendingSubmit> = None;

    // Mouse wheel scrolls the answer pane
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    log::info!("tui started, endpoint {}", app.endpoint);

    loop {
        poll_pending(&mut app, &mut pending);

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => handlers::handle_mouse(mouse, &mut app),
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            client: &client,
                            pending: &mut pending,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    log::info!("tui exited");
    terminal.show_cursor()?;
    Ok(())
}
