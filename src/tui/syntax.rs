//! Syntax highlighting for fenced code blocks in answers, using syntect.

use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::constants::ACCENT_SECONDARY;

const THEME_NAME: &str = "base16-ocean.dark";

/// Convert syntect Color to ratatui Color. Alpha 0 => None (colourless).
fn translate_colour(c: syntect::highlighting::Color) -> Option<Color> {
    let syntect::highlighting::Color { r, g, b, a } = c;
    (a > 0).then_some(Color::Rgb(r, g, b))
}

fn translate_font_style(f: FontStyle) -> Modifier {
    let mut m = Modifier::empty();
    if f.contains(FontStyle::BOLD) {
        m.insert(Modifier::BOLD);
    }
    if f.contains(FontStyle::ITALIC) {
        m.insert(Modifier::ITALIC);
    }
    if f.contains(FontStyle::UNDERLINE) {
        m.insert(Modifier::UNDERLINED);
    }
    m
}

/// Foreground and font style only; the terminal background is kept.
fn translate_style(s: syntect::highlighting::Style) -> Style {
    let fg = translate_colour(s.foreground).unwrap_or(ACCENT_SECONDARY);
    Style::default()
        .fg(fg)
        .add_modifier(translate_font_style(s.font_style))
}

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme() -> Option<&'static Theme> {
    let ts = THEME_SET.get_or_init(ThemeSet::load_defaults);
    ts.themes
        .get(THEME_NAME)
        .or_else(|| ts.themes.values().next())
}

/// Map a fence language (e.g. "sql", "python") to a syntect file extension.
fn lang_to_extension(lang: &str) -> Option<&'static str> {
    let ext = match lang.trim().to_lowercase().as_str() {
        "sql" | "postgres" | "postgresql" | "duckdb" | "sqlite" | "mysql" => "sql",
        "py" | "python" => "py",
        "json" => "json",
        "csv" => "csv",
        "yaml" | "yml" => "yml",
        "sh" | "bash" | "zsh" | "shell" => "sh",
        "js" | "javascript" => "js",
        "ts" | "typescript" => "ts",
        "rs" | "rust" => "rs",
        "html" => "html",
        "md" | "markdown" => "md",
        _ => return None,
    };
    Some(ext)
}

fn plain_line(line: &str) -> Vec<Span<'static>> {
    vec![Span::styled(
        line.to_string(),
        Style::default().fg(ACCENT_SECONDARY),
    )]
}

fn find_syntax(lang: &str) -> Option<&'static SyntaxReference> {
    let ext = lang_to_extension(lang)?;
    syntax_set().find_syntax_by_extension(ext)
}

/// Highlight a whole code block, one span list per line (without line endings).
///
/// Highlighter state carries across lines so multi-line strings and comments are
/// coloured correctly. Unknown languages and highlighter errors fall back to plain
/// accent-coloured lines.
pub(super) fn highlight_code_block(lang: &str, code: &str) -> Vec<Vec<Span<'static>>> {
    let plain = || -> Vec<Vec<Span<'static>>> { code.split('\n').map(plain_line).collect() };
    let (Some(syntax), Some(theme)) = (find_syntax(lang), theme()) else {
        return plain();
    };

    let mut h = HighlightLines::new(syntax, theme);
    let mut out = Vec::new();
    for line in LinesWithEndings::from(code) {
        let Ok(regions) = h.highlight_line(line, syntax_set()) else {
            return plain();
        };
        let spans = regions
            .into_iter()
            .filter_map(|(style, text)| {
                let text = text.trim_end_matches(['\n', '\r']);
                (!text.is_empty()).then(|| Span::styled(text.to_string(), translate_style(style)))
            })
            .collect();
        out.push(spans);
    }
    // LinesWithEndings yields nothing for a trailing empty line; keep line count aligned.
    if code.is_empty() || code.ends_with('\n') {
        out.push(Vec::new());
    }
    out
}

/// Slice spans to cover only the character range [range_start, range_end).
/// Used when wrapping code lines: each wrap chunk gets the spans for its character slice.
pub(super) fn slice_spans_by_range(
    spans: &[Span<'static>],
    range_start: usize,
    range_end: usize,
) -> Vec<Span<'static>> {
    let mut result = Vec::new();
    let mut pos = 0;
    for span in spans {
        let s = span.content.as_ref();
        let len = s.chars().count();
        let span_end = pos + len;
        if span_end > range_start && pos < range_end {
            let take_start = range_start.saturating_sub(pos);
            let take_end = (range_end - pos).min(len);
            if take_start < take_end {
                let sliced: String = s
                    .chars()
                    .skip(take_start)
                    .take(take_end - take_start)
                    .collect();
                result.push(Span::styled(sliced, span.style));
            }
        }
        pos = span_end;
    }
    result
}
