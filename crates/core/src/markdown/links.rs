//! Wiki-link extraction with per-target grouping.

use std::sync::LazyLock;

use regex::Regex;

/// A `[[target#heading]]` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    /// Link target as written (file name, with or without extension or sigil).
    pub target: String,
    /// Heading the link points into, `None` for a whole-file link.
    pub heading: Option<String>,
}

impl WikiLink {
    pub fn new(target: impl Into<String>, heading: Option<&str>) -> Self {
        Self { target: target.into(), heading: heading.map(ToOwned::to_owned) }
    }
}

// Matches [[target]], [[target#heading]], [[target|alias]], [[target#heading|alias]],
// with an optional leading ! for embeds.
static WIKILINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[\[([^\[\]|#]*)(?:#([^\[\]|]*))?(?:\|[^\[\]]*)?\]\]").unwrap()
});

/// Every wiki-link occurrence in document order, without grouping.
///
/// Targets and headings are trimmed. An empty heading (`[[Note#]]`) counts as a
/// whole-file link, and nested headings (`[[Note#Part#Detail]]`) keep only the
/// innermost one. Self-references with an empty target are dropped.
pub fn scan_links(text: &str) -> Vec<WikiLink> {
    WIKILINK_RE
        .captures_iter(text)
        .filter_map(|cap| {
            let target = cap.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if target.is_empty() {
                return None;
            }
            let heading = cap
                .get(2)
                .and_then(|m| m.as_str().rsplit('#').next())
                .map(str::trim)
                .filter(|h| !h.is_empty());
            Some(WikiLink::new(target, heading))
        })
        .collect()
}

/// Links to expand from a note, grouped by target.
///
/// A target linked at least once without a heading yields a single
/// whole-file link, since the whole file already includes every section.
/// Otherwise each distinct heading yields one link. Targets keep their
/// first-appearance order, as do headings within a target.
pub fn extract_links(text: &str) -> Vec<WikiLink> {
    let mut groups: Vec<(String, bool, Vec<String>)> = Vec::new();

    for link in scan_links(text) {
        let index = match groups.iter().position(|(target, _, _)| *target == link.target) {
            Some(index) => index,
            None => {
                groups.push((link.target, false, Vec::new()));
                groups.len() - 1
            }
        };

        let (_, bare, headings) = &mut groups[index];
        match link.heading {
            None => *bare = true,
            Some(heading) if !headings.contains(&heading) => headings.push(heading),
            Some(_) => {}
        }
    }

    groups
        .into_iter()
        .flat_map(|(target, bare, headings)| {
            if bare {
                vec![WikiLink { target, heading: None }]
            } else {
                headings
                    .into_iter()
                    .map(|heading| WikiLink { target: target.clone(), heading: Some(heading) })
                    .collect()
            }
        })
        .collect()
}
