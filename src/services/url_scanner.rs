//! URL and tag scanner for single lines of session text.
//!
//! Two URL forms are recognised, in any mixture and any number per line:
//!
//! - bare: `http://` or `https://` followed by one or more characters that are
//!   neither whitespace nor one of `"`, `'`, `<`, `>`;
//! - markdown: `[label](URL)`, where only the URL is kept. The label is skipped,
//!   so a URL written inside a label is not reported twice.
//!
//! Tags are the literal substrings `[pinned]` and `[active]`, detected anywhere on
//! the line.

const SCHEMES: [&str; 2] = ["https://", "http://"];

const PINNED_TAG: &str = "[pinned]";
const ACTIVE_TAG: &str = "[active]";

/// Inline tags found on a line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTags {
    pub pinned: bool,
    pub active: bool,
}

impl LineTags {
    pub fn is_empty(&self) -> bool {
        !self.pinned && !self.active
    }
}

/// Detects the `[pinned]` and `[active]` tags on a line.
pub fn scan_tags(line: &str) -> LineTags {
    LineTags {
        pinned: line.contains(PINNED_TAG),
        active: line.contains(ACTIVE_TAG),
    }
}

/// Returns every URL on the line, left to right.
pub fn scan_urls(line: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    let bytes = line.as_bytes();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        if bytes[pos] == b'[' {
            if let Some((url, next)) = markdown_link(line, pos) {
                urls.push(url);
                pos = next;
                continue;
            }
        } else if rest.starts_with("](") {
            // Link target whose opening bracket was not matched, e.g. nested labels.
            if let Some((url, next)) = link_target(line, pos + 2) {
                urls.push(url);
                pos = next;
                continue;
            }
        } else if let Some(end) = bare_url_end(line, pos) {
            urls.push(&line[pos..end]);
            pos = end;
            continue;
        }

        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    urls
}

fn is_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>')
}

fn scheme_len(rest: &str) -> Option<usize> {
    SCHEMES
        .iter()
        .find(|scheme| rest.starts_with(*scheme))
        .map(|scheme| scheme.len())
}

/// End offset of a bare URL starting at `start`, if one starts there.
fn bare_url_end(line: &str, start: usize) -> Option<usize> {
    let body = start + scheme_len(&line[start..])?;
    let len = line[body..]
        .char_indices()
        .find(|&(_, c)| is_terminator(c))
        .map_or(line.len() - body, |(i, _)| i);
    (len > 0).then_some(body + len)
}

/// Parses `[label](URL)` starting at the `[` at `open`.
///
/// The label ends at the `]` that balances `open`; an unbalanced `[` is not a
/// link. Returns the URL and the offset just past the link.
fn markdown_link(line: &str, open: usize) -> Option<(&str, usize)> {
    let close = label_end(line, open)?;
    if !line[close + 1..].starts_with('(') {
        return None;
    }
    link_target(line, close + 2)
}

/// Offset of the `]` closing the label opened at `open`.
fn label_end(line: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in line.bytes().enumerate().skip(open + 1) {
        match b {
            b'[' => depth += 1,
            b']' if depth == 0 => return Some(i),
            b']' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Reads a link target starting right after `(`.
///
/// The target ends at the `)` that balances the opening paren, or at a bare-URL
/// terminator when the link is left unclosed.
fn link_target(line: &str, start: usize) -> Option<(&str, usize)> {
    let body = start + scheme_len(&line[start..])?;
    let mut depth = 0usize;

    for (i, c) in line[body..].char_indices() {
        let at = body + i;
        match c {
            ')' if depth == 0 => {
                return (at > body).then(|| (&line[start..at], at + 1));
            }
            ')' => depth -= 1,
            '(' => depth += 1,
            c if is_terminator(c) => {
                return (at > body).then(|| (&line[start..at], at));
            }
            _ => {}
        }
    }

    (line.len() > body).then(|| (&line[start..], line.len()))
}
