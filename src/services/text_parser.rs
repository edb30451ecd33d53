//! Session text parser.
//!
//! Turns loosely structured, hand-edited text into window groups in a single
//! forward pass. Each trimmed line is classified as a window marker, a line
//! carrying URLs, or noise:
//!
//! ```text
//! /* Window 1 |left:0|top:23|width:1200|height:800|state:normal| */
//! https://github.com [pinned]
//! [Docs](https://docs.rs) [active]
//! ```
//!
//! A marker always opens a new group. URL lines join the current group, or open
//! a bare group when no marker has been seen yet. Parsing never fails.

use crate::services::url_scanner::{scan_tags, scan_urls, LineTags};
use crate::types::window::{TabEntry, WindowGroup, WindowProperties};

/// Classification of one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// A `/* ... */` window marker with its properties.
    Marker(WindowProperties),
    /// A line with at least one URL, plus the tags found on it.
    Content { urls: Vec<&'a str>, tags: LineTags },
    /// Blank lines and lines without URLs.
    Skip,
}

/// Classifies a single line. Leading and trailing whitespace is ignored.
pub fn classify_line(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Skip;
    }

    if is_marker_line(trimmed) {
        return LineKind::Marker(parse_marker_properties(trimmed));
    }

    let urls = scan_urls(trimmed);
    if urls.is_empty() {
        return LineKind::Skip;
    }

    LineKind::Content {
        urls,
        tags: scan_tags(trimmed),
    }
}

/// True when the whole trimmed line is wrapped in `/*` and `*/`.
pub fn is_marker_line(trimmed: &str) -> bool {
    trimmed.len() >= 4 && trimmed.starts_with("/*") && trimmed.ends_with("*/")
}

/// Extracts `key:value` pairs from a marker line.
///
/// A key is a run of ASCII word characters directly followed by `:`. The value
/// runs up to the next `|` or `*` (or the end of the line) and is trimmed; it
/// must contain at least one character before trimming. A repeated key keeps
/// its last value.
pub fn parse_marker_properties(line: &str) -> WindowProperties {
    let mut props = WindowProperties::new();
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        if !is_word_byte(bytes[pos]) {
            pos += 1;
            continue;
        }

        let key_start = pos;
        while pos < bytes.len() && is_word_byte(bytes[pos]) {
            pos += 1;
        }
        let key_end = pos;

        if bytes.get(key_end) != Some(&b':') {
            continue;
        }

        let value_start = key_end + 1;
        let value_end = line[value_start..]
            .find(['|', '*'])
            .map_or(line.len(), |i| value_start + i);

        if value_end > value_start {
            props.insert(
                line[key_start..key_end].to_string(),
                line[value_start..value_end].trim().to_string(),
            );
            pos = value_end;
        }
    }

    props
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Parses session text into window groups.
///
/// Blank lines and lines without URLs contribute nothing. Tags on a line apply
/// only to the last URL of that line; earlier URLs on the same line are never
/// pinned or active. Groups are returned in source order, including marker
/// groups that ended up with no entries.
pub fn parse(text: &str) -> Vec<WindowGroup> {
    let mut groups: Vec<WindowGroup> = Vec::new();

    for line in text.split('\n') {
        match classify_line(line) {
            LineKind::Skip => {}
            LineKind::Marker(props) => groups.push(WindowGroup::with_properties(props)),
            LineKind::Content { urls, tags } => {
                if groups.is_empty() {
                    groups.push(WindowGroup::bare());
                }
                let Some(current) = groups.last_mut() else {
                    continue;
                };

                let last = urls.len() - 1;
                current
                    .entries
                    .extend(urls.into_iter().enumerate().map(|(i, url)| {
                        let tagged = i == last;
                        TabEntry::new(url, tagged && tags.pinned, tagged && tags.active)
                    }));
            }
        }
    }

    groups
}
