//! Answer segmentation: split content into prose and fenced code blocks.

/// Segment of an answer: either markdown prose or a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    CodeBlock { lang: String, code: String },
}

const FENCES: [&str; 2] = ["```", "~~~"];

/// Fence opening a code block on this line (``` or ~~~), with the language after it.
fn fence_open(line: &str) -> Option<(&'static str, &str)> {
    let trimmed = line.trim_start();
    FENCES.iter().find_map(|&fence| {
        let info = trimmed.strip_prefix(fence)?;
        let marker = fence.chars().next()?;
        Some((fence, info.trim_start_matches(marker).trim()))
    })
}

fn flush_text(segments: &mut Vec<Segment>, text: &mut Vec<&str>) {
    let joined = text.join("\n");
    text.clear();
    if !joined.trim().is_empty() {
        segments.push(Segment::Text(joined));
    }
}

/// Split content line by line into text and code block segments.
///
/// A fence opens on a line starting with ``` or ~~~ and closes on the next line
/// starting with the same fence. An unclosed block runs to the end of the content.
/// Whitespace-only prose between blocks is dropped.
pub(crate) fn parse_segments(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text: Vec<&str> = Vec::new();
    let mut code: Vec<&str> = Vec::new();
    let mut open: Option<(&'static str, String)> = None;

    for line in content.split('\n') {
        if let Some((fence, lang)) = &open {
            if line.trim_start().starts_with(*fence) {
                segments.push(Segment::CodeBlock {
                    lang: lang.clone(),
                    code: code.join("\n"),
                });
                code.clear();
                open = None;
            } else {
                code.push(line);
            }
            continue;
        }
        match fence_open(line) {
            Some((fence, lang)) => {
                flush_text(&mut segments, &mut text);
                open = Some((fence, lang.to_string()));
            }
            None => text.push(line),
        }
    }

    match open {
        Some((_, lang)) => segments.push(Segment::CodeBlock {
            lang,
            code: code.join("\n"),
        }),
        None => flush_text(&mut segments, &mut text),
    }
    segments
}
