//! Rendering of an aggregate into a single Markdown-flavored document.
//!
//! Section order is fixed: header, file tree, content, statistics.

use chrono::NaiveDateTime;

use super::types::Aggregate;

const TREE_BRANCH: &str = "├── ";
const TREE_CORNER: &str = "└── ";

impl Aggregate {
    /// Render the aggregate document.
    ///
    /// The generation time is supplied by the caller; everything else depends
    /// only on the collected entries, so equal inputs render identically.
    pub fn render(&self, generated_at: NaiveDateTime) -> String {
        let stats = self.statistics();
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!("# Content from {}\n", self.start));
        parts.push(format!("- Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")));
        parts.push(format!("- Depth: {}", self.max_depth));
        parts.push(format!("- Files collected: {}\n", self.entries.len()));

        parts.push("## File Structure\n".to_string());
        parts.push(self.file_tree().join("\n"));
        parts.push("\n".to_string());

        parts.push("## Content\n".to_string());
        for entry in &self.entries {
            let name = entry
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            parts.push(format!("### {name}"));
            parts.push(format!("Path: `{}`\n", self.relative_path(&entry.path).display()));
            parts.push(entry.content.clone());
            parts.push("\n---\n".to_string());
        }

        parts.push("## File Statistics\n".to_string());
        parts.push(format!("- Total Files: {}", stats.file_count));
        parts.push(format!("- Total Lines: {}", stats.total_lines));
        parts.push(format!("- Total Size: {}", stats.total_size()));
        parts.push(format!("- Total Tokens: {}", stats.total_tokens));

        parts.join("\n")
    }

    /// Sorted tree listing of collected paths; sliced entries name their heading.
    pub fn file_tree(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| {
                let rel = self.relative_path(&entry.path).display().to_string();
                match &entry.heading {
                    Some(heading) => format!("{rel} (heading: {heading})"),
                    None => rel,
                }
            })
            .collect();
        lines.sort();

        let last = lines.len().saturating_sub(1);
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let glyph = if i == last { TREE_CORNER } else { TREE_BRANCH };
                format!("{glyph}{line}")
            })
            .collect()
    }
}
