//! Aggregate statistics.

use serde::Serialize;

use super::types::CollectedEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub file_count: usize,
    /// Sum of line counts across collected contents.
    pub total_lines: usize,
    /// UTF-8 byte length of collected contents.
    pub total_bytes: u64,
    /// Whitespace-delimited word count, a cheap stand-in for tokenizer output.
    pub total_tokens: usize,
}

impl Statistics {
    pub fn from_entries(entries: &[CollectedEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut stats, entry| {
            stats.file_count += 1;
            stats.total_lines += entry.content.lines().count();
            stats.total_bytes += entry.content.len() as u64;
            stats.total_tokens += estimate_tokens(&entry.content);
            stats
        })
    }

    pub fn total_size(&self) -> String {
        format_size(self.total_bytes)
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Human-readable size, 1024-based with one decimal place.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}
