//! Traversal of the note link graph from a start file.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::markdown::{extract_links, extract_section};
use crate::vault::FilenameResolver;

use super::types::{
    Aggregate, AggregateError, AggregateOptions, AggregateOutcome, CollectedEntry, VisitedKey,
};

/// Collects a start note and the notes it links to, up to a depth bound.
#[derive(Debug, Clone)]
pub struct LinkAggregator {
    resolver: FilenameResolver,
    max_depth: usize,
}

impl LinkAggregator {
    pub fn new(options: AggregateOptions) -> Result<Self, AggregateError> {
        if !options.vault_root.is_dir() {
            return Err(AggregateError::MissingVaultRoot(
                options.vault_root.display().to_string(),
            ));
        }

        let resolver = FilenameResolver::new(options.vault_root)
            .with_limits(options.search)
            .with_exclusions(options.excluded_folders);

        Ok(Self { resolver, max_depth: options.max_depth })
    }

    /// Resolve `start` and collect it together with everything reachable
    /// within the depth bound.
    ///
    /// `start` may carry a `#heading` suffix, which is honored when the whole
    /// token does not name a file by itself.
    pub fn process(&self, start: &str) -> AggregateOutcome {
        let Some((path, heading)) = self.resolve_start(start) else {
            debug!(start, "could not find start file");
            return AggregateOutcome::NotFound { token: start.to_string() };
        };

        debug!(path = %path.display(), "starting from resolved file");

        let mut traversal = Traversal::new(&self.resolver, self.max_depth);
        traversal.visit(&path, 0, heading.as_deref());

        AggregateOutcome::Collected(Aggregate {
            start: start.to_string(),
            vault_root: self.resolver.root().to_path_buf(),
            max_depth: self.max_depth,
            entries: traversal.collected,
        })
    }

    fn resolve_start(&self, start: &str) -> Option<(PathBuf, Option<String>)> {
        if let Some(path) = self.resolver.resolve(start) {
            return Some((path, None));
        }

        let (file, heading) = start.split_once('#')?;
        let heading = heading.trim();
        if heading.is_empty() {
            return None;
        }
        self.resolver.resolve(file).map(|path| (path, Some(heading.to_string())))
    }
}

/// Per-run state: visited keys and collected entries, discarded afterwards.
struct Traversal<'a> {
    resolver: &'a FilenameResolver,
    max_depth: usize,
    visited: HashSet<VisitedKey>,
    collected: Vec<CollectedEntry>,
}

impl<'a> Traversal<'a> {
    fn new(resolver: &'a FilenameResolver, max_depth: usize) -> Self {
        Self { resolver, max_depth, visited: HashSet::new(), collected: Vec::new() }
    }

    fn visit(&mut self, path: &Path, depth: usize, heading: Option<&str>) {
        let key = VisitedKey { path: path.to_path_buf(), heading: heading.map(ToOwned::to_owned) };
        if !self.visited.insert(key) {
            debug!(path = %path.display(), ?heading, "skipping already processed file");
            return;
        }

        debug!(path = %path.display(), depth, ?heading, "processing file");

        let full_content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file, skipping");
                return;
            }
        };

        // A slice still expands every link in its file.
        let links =
            if depth < self.max_depth { extract_links(&full_content) } else { Vec::new() };

        let (content, sliced) = match heading {
            Some(heading) => match extract_section(&full_content, heading) {
                Some(section) => (section, Some(heading.to_string())),
                None => {
                    debug!(path = %path.display(), heading, "heading not found, using full file");
                    (full_content, None)
                }
            },
            None => (full_content, None),
        };

        self.collected.push(CollectedEntry { path: path.to_path_buf(), heading: sliced, content });

        if depth >= self.max_depth {
            return;
        }

        debug!(path = %path.display(), count = links.len(), "following links");

        for link in links {
            let Some(target) = self.resolver.resolve(&link.target) else {
                debug!(target = %link.target, "skipping unresolved link");
                continue;
            };
            self.visit(&target, depth + 1, link.heading.as_deref());
        }
    }
}
