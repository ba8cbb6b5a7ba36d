//! Markdown line rendering: headings, lists, quotes, table rows, rules, and inline
//! **bold**, *italic*, `code`, [links](url).

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::constants::{ACCENT, ACCENT_SECONDARY};

/// Width of a rendered horizontal rule (`---`).
const RULE_WIDTH: usize = 24;

/// Render one line of markdown prose into styled spans.
pub(crate) fn parse_markdown_line(s: &str) -> Vec<Span<'static>> {
    let trimmed = s.trim_start();

    if let Some((level, content)) = parse_heading(trimmed) {
        let mut style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        if level == 1 {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        return if content.is_empty() {
            Vec::new()
        } else {
            vec![Span::styled(content.to_string(), style)]
        };
    }

    if is_rule(trimmed) {
        return vec![Span::styled(
            "─".repeat(RULE_WIDTH),
            Style::default().fg(Color::DarkGray),
        )];
    }

    if let Some(quoted) = trimmed.strip_prefix('>') {
        let mut spans = vec![Span::styled("▎ ", Style::default().fg(Color::DarkGray))];
        spans.extend(
            parse_inline(quoted.trim_start())
                .into_iter()
                .map(|span| span.patch_style(Style::default().add_modifier(Modifier::ITALIC))),
        );
        return spans;
    }

    for bullet in ["- ", "* ", "+ "] {
        if let Some(rest) = trimmed.strip_prefix(bullet) {
            let mut spans = vec![Span::styled("• ", Style::default().fg(ACCENT))];
            spans.extend(parse_inline(rest));
            return spans;
        }
    }

    if let Some(cells) = parse_table_row(trimmed) {
        return render_table_row(&cells);
    }

    if let Some((num, rest)) = parse_numbered_list_prefix(trimmed) {
        let mut spans = vec![Span::styled(format!("{}. ", num), Style::default().fg(ACCENT))];
        spans.extend(parse_inline(rest));
        return spans;
    }

    parse_inline(s)
}

/// True for lines that look like table rows (`| a | b |`); these are not wrapped.
pub(crate) fn is_table_row(s: &str) -> bool {
    parse_table_row(s.trim_start()).is_some()
}

/// "## Title" -> (2, "Title"). Requires a space (or nothing) after the hashes.
fn parse_heading(s: &str) -> Option<(usize, &str)> {
    let level = s.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &s[level..];
    if rest.is_empty() || rest.starts_with(' ') {
        Some((level, rest.trim()))
    } else {
        None
    }
}

/// `---`, `***`, `___` (three or more of the same character).
fn is_rule(s: &str) -> bool {
    let s = s.trim_end();
    let Some(first) = s.chars().next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && s.chars().count() >= 3 && s.chars().all(|c| c == first)
}

fn parse_table_row(s: &str) -> Option<Vec<&str>> {
    let s = s.trim_end();
    if !s.starts_with('|') || s.len() < 2 {
        return None;
    }
    let inner = s.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    Some(inner.split('|').map(str::trim).collect())
}

/// Alignment row such as `|:---|---:|`.
fn is_separator_row(cells: &[&str]) -> bool {
    !cells.is_empty()
        && cells.iter().all(|c| {
            !c.is_empty() && c.contains('-') && c.chars().all(|ch| matches!(ch, '-' | ':'))
        })
}

fn render_table_row(cells: &[&str]) -> Vec<Span<'static>> {
    let border = Style::default().fg(ACCENT);
    if is_separator_row(cells) {
        let rule = cells
            .iter()
            .map(|c| "─".repeat(c.chars().count().max(3)))
            .collect::<Vec<_>>()
            .join("─┼─");
        return vec![Span::styled(rule, border)];
    }
    let mut spans = Vec::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", border));
        }
        spans.extend(parse_inline(cell));
    }
    spans
}

/// Parse "N. " or "N) " at start. Returns (number, rest) or None.
fn parse_numbered_list_prefix(s: &str) -> Option<(&str, &str)> {
    let digits = s.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let (num, rest) = s.split_at(digits);
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(|rest| (num, rest))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Marker {
    Bold,
    Italic,
    Code,
    Link,
}

/// Earliest inline marker in `s` and its byte offset.
fn next_marker(s: &str) -> Option<(usize, Marker)> {
    s.char_indices().find_map(|(i, c)| match c {
        '`' => Some((i, Marker::Code)),
        '[' => Some((i, Marker::Link)),
        '*' if s[i..].starts_with("**") => Some((i, Marker::Bold)),
        '*' => Some((i, Marker::Italic)),
        _ => None,
    })
}

/// Parse inline emphasis, code spans and links. Unmatched markers are kept as text.
fn parse_inline(s: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        let Some((pos, marker)) = next_marker(rest) else {
            spans.push(Span::raw(rest.to_string()));
            break;
        };
        if pos > 0 {
            spans.push(Span::raw(rest[..pos].to_string()));
        }
        rest = &rest[pos..];
        let (span, consumed) = match marker {
            Marker::Bold => delimited(rest, "**", Style::default().add_modifier(Modifier::BOLD)),
            Marker::Italic => italic(rest),
            Marker::Code => delimited(rest, "`", Style::default().fg(ACCENT_SECONDARY)),
            Marker::Link => link(rest),
        };
        spans.extend(span);
        rest = &rest[consumed..];
    }
    spans
}

/// `<delim>text<delim>` styled, or the bare delimiter when unclosed.
fn delimited(s: &str, delim: &str, style: Style) -> (Option<Span<'static>>, usize) {
    let body = &s[delim.len()..];
    match body.find(delim) {
        Some(end) if end > 0 => (
            Some(Span::styled(body[..end].to_string(), style)),
            delim.len() * 2 + end,
        ),
        _ => (Some(Span::raw(delim.to_string())), delim.len()),
    }
}

/// `*text*` where text neither starts nor ends with whitespace (so `2 * 3 * 4` stays plain).
fn italic(s: &str) -> (Option<Span<'static>>, usize) {
    let body = &s[1..];
    let opens = body.chars().next().is_some_and(|c| !c.is_whitespace());
    if opens
        && let Some(end) = body.find('*')
        && end > 0
        && !body[..end].ends_with(char::is_whitespace)
    {
        let style = Style::default().add_modifier(Modifier::ITALIC);
        return (Some(Span::styled(body[..end].to_string(), style)), end + 2);
    }
    (Some(Span::raw("*".to_string())), 1)
}

/// `[text](url)` -> underlined text; `[text]` without a url stays literal.
fn link(s: &str) -> (Option<Span<'static>>, usize) {
    let body = &s[1..];
    let Some(end_br) = body.find(']') else {
        return (Some(Span::raw("[".to_string())), 1);
    };
    let text = &body[..end_br];
    let after = &body[end_br + 1..];
    if let Some(url_part) = after.strip_prefix('(')
        && let Some(end_paren) = url_part.find(')')
    {
        let style = Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::UNDERLINED);
        // '[' + text + ']' + '(' + url + ')'
        let consumed = 1 + end_br + 1 + 1 + end_paren + 1;
        return (Some(Span::styled(text.to_string(), style)), consumed);
    }
    (Some(Span::raw(format!("[{}]", text))), end_br + 2)
}
