use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::vault::SearchLimits;

/// Traversal depth used when neither the command line nor the profile sets one.
pub const DEFAULT_DEPTH: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    pub vault_root: String,
    /// Directory for aggregate files; `{{vault_root}}` is substituted.
    pub output_dir: Option<String>,
    /// Default link-following depth for this vault.
    pub depth: Option<usize>,
    /// Folders skipped by the filename search (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
}

/// Limits for the recursive filename search.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct SearchConfig {
    #[serde(default = "default_search_depth")]
    pub max_depth: usize,
    #[serde(default = "default_search_timeout")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: default_search_depth(), timeout_secs: default_search_timeout() }
    }
}

impl SearchConfig {
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_depth: self.max_depth,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

fn default_search_depth() -> usize {
    SearchLimits::default().max_depth
}

fn default_search_timeout() -> u64 {
    SearchLimits::default().timeout.as_secs()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub vault_path: Option<PathBuf>,
    pub depth: Option<usize>,
    pub profile: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Profile the values came from, if a config file was read.
    pub active_profile: Option<String>,
    /// Canonical vault root, verified to be a directory.
    pub vault_root: PathBuf,
    pub output_dir: PathBuf,
    pub depth: usize,
    /// Folders excluded from the filename search (relative to vault_root).
    pub excluded_folders: Vec<PathBuf>,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Default aggregate path for a start token: `<output_dir>/aggregate_<basename>.txt`.
    pub fn default_output_path(&self, start_token: &str) -> PathBuf {
        let name = Path::new(start_token)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| start_token.to_string());
        let base = name.strip_suffix(".md").unwrap_or(&name);
        self.output_dir.join(format!("aggregate_{base}.txt"))
    }
}
