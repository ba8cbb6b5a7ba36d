//! Response pane: the submitted question and its answer rendered as markdown.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use super::super::app::{Answer, App, Submission};
use super::super::constants::{ACCENT, ACCENT_SECONDARY, ERROR};
use super::super::syntax::{highlight_code_block, slice_spans_by_range};
use super::super::text::{
    Segment, char_chunks, is_table_row, normalize_code_operators, parse_markdown_line,
    parse_segments, wrap_lines,
};

/// Repeat a character to fill width (approximate; chars may have different display widths).
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// How a block body is drawn.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Body {
    Markdown,
    Error,
}

struct BlockParams<'a> {
    label: &'a str,
    content: &'a str,
    body: Body,
    border_color: Color,
    wrap_width: usize,
}

/// "┌─ Label ───┐" sized to `width`.
fn top_border(label: &str, width: usize) -> String {
    let head = format!("┌─ {} ", label);
    let trail = width.saturating_sub(head.chars().count() + 1);
    format!("{}{}┐", head, repeat_char('─', trail))
}

fn bottom_border(width: usize) -> String {
    format!("└{}┘", repeat_char('─', width.saturating_sub(2)))
}

/// Render a markdown prose segment, line by line. Table rows are kept whole.
fn add_text_lines(lines: &mut Vec<Line<'static>>, gutter: &Span<'static>, text: &str, width: usize) {
    for raw in text.trim_matches('\n').split('\n') {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let chunks = if is_table_row(raw) {
            vec![raw.trim().to_string()]
        } else {
            wrap_lines(raw, width)
        };
        for chunk in chunks {
            let mut spans = vec![gutter.clone(), Span::raw("  ")];
            spans.extend(parse_markdown_line(&chunk));
            lines.push(Line::from(spans));
        }
    }
}

/// Render a fenced code block in its own frame, hard-wrapped to `width`.
fn add_code_lines(
    lines: &mut Vec<Line<'static>>,
    gutter: &Span<'static>,
    lang: &str,
    code: &str,
    width: usize,
) {
    let frame = Style::default().fg(ACCENT_SECONDARY);
    let label = if lang.is_empty() { "code" } else { lang };
    lines.push(Line::from(vec![
        gutter.clone(),
        Span::styled(top_border(label, width), frame),
    ]));

    let code = normalize_code_operators(code);
    let code_width = width.saturating_sub(2).max(1);
    for spans in highlight_code_block(lang, &code) {
        let len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        for (start, end) in char_chunks(len, code_width) {
            let mut row = vec![gutter.clone(), Span::styled("│ ", frame)];
            row.extend(slice_spans_by_range(&spans, start, end));
            lines.push(Line::from(row));
        }
    }

    lines.push(Line::from(vec![
        gutter.clone(),
        Span::styled(bottom_border(width), frame),
    ]));
}

/// Add a bordered block. Markdown bodies get code blocks and inline styling; error
/// bodies are plain red text.
fn add_block(lines: &mut Vec<Line<'static>>, p: BlockParams<'_>) {
    let border_style = Style::default().fg(p.border_color);
    let gutter = Span::styled("│ ", border_style);
    let content_width = p.wrap_width.saturating_sub(5).max(1);

    lines.push(Line::from(Span::styled(
        top_border(p.label, p.wrap_width),
        border_style,
    )));

    match p.body {
        Body::Error => {
            for chunk in wrap_lines(p.content.trim(), content_width) {
                lines.push(Line::from(vec![
                    gutter.clone(),
                    Span::raw("  "),
                    Span::styled(chunk, Style::default().fg(ERROR)),
                ]));
            }
        }
        Body::Markdown => {
            for segment in parse_segments(p.content) {
                match segment {
                    Segment::Text(text) => {
                        add_text_lines(lines, &gutter, &text, content_width);
                    }
                    Segment::CodeBlock { lang, code } => {
                        add_code_lines(lines, &gutter, &lang, &code, content_width);
                    }
                }
            }
        }
    }

    lines.push(Line::from(Span::styled(
        bottom_border(p.wrap_width),
        border_style,
    )));
}

/// Answer block label, e.g. "Answer 14:32:05 · 1.4s".
fn answer_label(sub: &Submission) -> String {
    match (sub.answered_at, sub.elapsed_label()) {
        (Some(at), Some(elapsed)) => format!("Answer {} · {}", at.format("%H:%M:%S"), elapsed),
        _ => "Answer".to_string(),
    }
}

/// Build every line of the pane for a given width.
pub(crate) fn build_lines(app: &App, wrap_width: usize) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let Some(sub) = app.submission.as_ref() else {
        let hint = Style::default().fg(Color::DarkGray);
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Type a question below and press Enter.",
            hint,
        )));
        lines.push(Line::from(Span::styled(
            "  The answer is rendered here as markdown.",
            hint,
        )));
        return lines;
    };

    add_block(
        &mut lines,
        BlockParams {
            label: "Question",
            content: &sub.query,
            body: Body::Markdown,
            border_color: Color::DarkGray,
            wrap_width,
        },
    );

    match &sub.answer {
        Answer::Pending => {
            lines.push(Line::from(Span::styled(
                "  Thinking... ",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        Answer::Ready(text) | Answer::Failed(text) => {
            let (body, border_color) = match sub.answer {
                Answer::Failed(_) => (Body::Error, ERROR),
                _ => (Body::Markdown, ACCENT_SECONDARY),
            };
            add_block(
                &mut lines,
                BlockParams {
                    label: &answer_label(sub),
                    content: text,
                    body,
                    border_color,
                    wrap_width,
                },
            );
        }
    }
    lines
}

pub(crate) fn draw_response(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];

    let lines = build_lines(app, text_area.width as usize);

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    app.last_max_scroll = total_lines.saturating_sub(visible.max(1));
    let scroll_pos = app.scroll_line();
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(ACCENT))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
