use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::ResolvedConfig;
use crate::vault::SearchLimits;

use super::stats::Statistics;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("vault root does not exist or is not a directory: {0}")]
    MissingVaultRoot(String),
}

/// Everything a traversal needs, fixed at construction time.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub vault_root: PathBuf,
    /// Link-following depth; 0 collects only the start file.
    pub max_depth: usize,
    pub search: SearchLimits,
    pub excluded_folders: Vec<PathBuf>,
}

impl AggregateOptions {
    pub fn new(vault_root: impl Into<PathBuf>, max_depth: usize) -> Self {
        Self {
            vault_root: vault_root.into(),
            max_depth,
            search: SearchLimits::default(),
            excluded_folders: Vec::new(),
        }
    }
}

impl From<&ResolvedConfig> for AggregateOptions {
    fn from(rc: &ResolvedConfig) -> Self {
        Self {
            vault_root: rc.vault_root.clone(),
            max_depth: rc.depth,
            search: rc.search.limits(),
            excluded_folders: rc.excluded_folders.clone(),
        }
    }
}

/// A (file, heading) pair processed at most once per traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisitedKey {
    pub path: PathBuf,
    pub heading: Option<String>,
}

/// Content collected from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedEntry {
    pub path: PathBuf,
    /// Section that was sliced out, `None` when the whole file was taken
    /// (including when a requested heading was missing).
    pub heading: Option<String>,
    pub content: String,
}

/// Result of one traversal: entries in depth-first pre-order.
#[derive(Debug, Clone)]
pub struct Aggregate {
    /// Start token as given by the caller.
    pub start: String,
    pub vault_root: PathBuf,
    pub max_depth: usize,
    pub entries: Vec<CollectedEntry>,
}

impl Aggregate {
    pub fn statistics(&self) -> Statistics {
        Statistics::from_entries(&self.entries)
    }

    /// Path relative to the vault root, or the path itself when outside it.
    pub fn relative_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.vault_root).unwrap_or(path)
    }
}

#[derive(Debug, Clone)]
pub enum AggregateOutcome {
    Collected(Aggregate),
    /// The start token did not resolve; nothing was traversed.
    NotFound { token: String },
}

impl AggregateOutcome {
    pub fn aggregate(&self) -> Option<&Aggregate> {
        match self {
            Self::Collected(aggregate) => Some(aggregate),
            Self::NotFound { .. } => None,
        }
    }

    pub fn statistics(&self) -> Statistics {
        self.aggregate().map(Aggregate::statistics).unwrap_or_default()
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Collected(_))
    }
}

impl std::fmt::Display for AggregateOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collected(aggregate) => {
                write!(f, "Collected {} files from {}", aggregate.entries.len(), aggregate.start)
            }
            Self::NotFound { token } => write!(f, "File not found: {token}"),
        }
    }
}
