//! TUI application state: input field, the current submission, and scroll.

use chrono::{DateTime, Local};

use crate::core::error::{AskError, display_error};

/// Answer of the current submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Answer {
    /// Request outstanding; the submit control is disabled.
    Pending,
    /// Normalized answer text from a successful request.
    Ready(String),
    /// "Error: ..." text for a failed request.
    Failed(String),
}

/// One request/response cycle. Replaced wholesale by the next submission.
#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub(crate) query: String,
    pub(crate) answer: Answer,
    pub(crate) submitted_at: DateTime<Local>,
    pub(crate) answered_at: Option<DateTime<Local>>,
}

impl Submission {
    /// Time between submit and answer, e.g. "1.4s"; None while pending.
    pub(crate) fn elapsed_label(&self) -> Option<String> {
        let answered = self.answered_at?;
        let ms = (answered - self.submitted_at).num_milliseconds().max(0);
        Some(format!("{:.1}s", ms as f64 / 1000.0))
    }
}

/// Scroll position: top (new submission), a specific line index, or bottom (End key).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScrollPosition {
    #[default]
    Top,
    Line(usize),
    Bottom,
}

pub struct App {
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) submission: Option<Submission>,
    /// Endpoint shown in the header.
    pub(crate) endpoint: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
}

impl App {
    pub fn new(endpoint: String) -> Self {
        Self {
            input: String::new(),
            submission: None,
            endpoint,
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.submission
            .as_ref()
            .is_some_and(|s| s.answer == Answer::Pending)
    }

    /// Submit is enabled when nothing is in flight and the input has text.
    pub(crate) fn can_submit(&self) -> bool {
        !self.is_pending() && !self.input.trim().is_empty()
    }

    /// Start a submission cycle: take the input as the query and discard the previous
    /// question and answer. Returns the query to send, or None when submit is disabled.
    pub(crate) fn begin_submission(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let query = self.input.trim().to_string();
        self.input.clear();
        self.submission = Some(Submission {
            query: query.clone(),
            answer: Answer::Pending,
            submitted_at: Local::now(),
            answered_at: None,
        });
        self.scroll = ScrollPosition::Top;
        Some(query)
    }

    /// Store the outcome of the outstanding request.
    pub(crate) fn finish_submission(&mut self, result: Result<String, AskError>) {
        let answer = match result {
            Ok(text) => Answer::Ready(text),
            Err(e) => Answer::Failed(display_error(&e)),
        };
        self.finish(answer);
    }

    /// Record a failure that has no `AskError` (the request worker disappeared).
    pub(crate) fn fail_with_text(&mut self, text: String) {
        self.finish(Answer::Failed(text));
    }

    fn finish(&mut self, answer: Answer) {
        if let Some(sub) = self.submission.as_mut()
            && sub.answer == Answer::Pending
        {
            sub.answer = answer;
            sub.answered_at = Some(Local::now());
        }
    }

    /// Answer text once the request has finished, successful or not.
    pub(crate) fn answer_text(&self) -> Option<&str> {
        match self.submission.as_ref().map(|s| &s.answer) {
            Some(Answer::Ready(text) | Answer::Failed(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub(crate) fn answer_is_error(&self) -> bool {
        self.submission
            .as_ref()
            .is_some_and(|s| matches!(s.answer, Answer::Failed(_)))
    }

    /// Must be called before scroll_up/scroll_down when at top or bottom.
    fn materialize_scroll(&mut self) {
        self.scroll = ScrollPosition::Line(self.scroll_line());
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line((pos + n).min(self.last_max_scroll));
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Top => 0,
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}
