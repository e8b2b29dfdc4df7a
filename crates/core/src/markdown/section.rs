//! Heading-scoped section extraction.

/// Deepest heading level recognized; longer `#` runs are capped.
const MAX_HEADING_LEVEL: usize = 6;

/// A heading line found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingInfo {
    /// Heading text with `#` markers stripped (not normalized).
    pub title: String,
    /// Heading level (1-6).
    pub level: usize,
    /// Zero-based line index.
    pub line: usize,
}

/// Normalize heading text for comparison.
///
/// Lowercases, turns `:`, `_` and `-` into spaces, collapses whitespace runs
/// and trims.
pub fn normalize_heading(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, ':' | '_' | '-') { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a heading line: any line whose trimmed form starts with `#`.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let stripped = line.trim();
    if !stripped.starts_with('#') {
        return None;
    }
    let hashes = stripped.len() - stripped.trim_start_matches('#').len();
    let level = hashes.min(MAX_HEADING_LEVEL);
    // "### Title ###" style closings are decoration.
    let title = stripped[hashes..].trim().trim_end_matches('#').trim();
    Some((level, title))
}

/// All heading lines in document order.
pub fn find_headings(content: &str) -> Vec<HeadingInfo> {
    content
        .lines()
        .enumerate()
        .filter_map(|(line, text)| {
            parse_heading(text).map(|(level, title)| HeadingInfo {
                title: title.to_string(),
                level,
                line,
            })
        })
        .collect()
}

/// Extract the section under `heading`, heading line included.
///
/// The first heading whose normalized text equals the normalized target is
/// matched. The section runs until the next heading of the same or a
/// shallower level; deeper sub-headings belong to it. Returns `None` when no
/// heading matches.
pub fn extract_section(content: &str, heading: &str) -> Option<String> {
    let target = normalize_heading(heading);
    let lines: Vec<&str> = content.lines().collect();
    let headings = find_headings(content);

    let (index, matched) = headings
        .iter()
        .enumerate()
        .find(|(_, h)| normalize_heading(&h.title) == target)?;

    let end = headings[index + 1..]
        .iter()
        .find(|h| h.level <= matched.level)
        .map_or(lines.len(), |h| h.line);

    Some(lines[matched.line..end].join("\n"))
}
