//! Text utilities: markdown rendering, segmentation and line wrapping for the answer pane.

mod markdown;
mod segments;
mod wrap;

pub(crate) use markdown::{is_table_row, parse_markdown_line};
pub(crate) use segments::{Segment, parse_segments};
pub(crate) use wrap::{char_chunks, wrap_lines};

/// Normalize Unicode comparison symbols to ASCII in code blocks.
/// Generated SQL sometimes contains ≠, ≥, ≤ instead of !=, >=, <=.
pub(crate) fn normalize_code_operators(s: &str) -> String {
    s.replace('\u{2260}', "!=")
        .replace('\u{2265}', ">=")
        .replace('\u{2264}', "<=")
}
