//! Summary printing for the aggregate command.

use std::path::Path;

use obs2prompt_core::Statistics;
use serde::Serialize;

/// Summary for JSON output.
#[derive(Debug, Serialize)]
pub struct SummaryOutput {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub statistics: Statistics,
    pub total_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl SummaryOutput {
    pub fn new(statistics: Statistics, output_path: Option<&Path>) -> Self {
        Self {
            found: true,
            message: None,
            total_size: statistics.total_size(),
            statistics,
            output_path: output_path.map(|p| p.display().to_string()),
        }
    }

    pub fn not_found(message: String, output_path: &Path) -> Self {
        Self {
            found: false,
            message: Some(message),
            ..Self::new(Statistics::default(), Some(output_path))
        }
    }
}

/// Print the statistics block.
pub fn print_statistics(stats: &Statistics) {
    println!();
    println!("File Statistics:");
    println!("- Total Files: {}", stats.file_count);
    println!("- Total Lines: {}", stats.total_lines);
    println!("- Total Size: {}", stats.total_size());
    println!("- Total Tokens: {}", stats.total_tokens);
}

/// Print the summary as JSON.
pub fn print_summary_json(summary: &SummaryOutput) {
    println!("{}", serde_json::to_string_pretty(summary).unwrap_or_default());
}
