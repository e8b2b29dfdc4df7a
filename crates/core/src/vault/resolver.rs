//! Resolution of wiki-link tokens to files inside the vault.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::identity::{DirIdentity, VisitedDirs};

/// Decoration some notes carry right before the extension.
const DECORATIVE_SUFFIX: &str = "🌳";

/// Category sigils, tried as `<sigil><base>.md` after the fixed variants.
const EXTRA_SIGILS: &[char] = &['+', '%', '&', '{', '('];

/// Prefix used by map-of-content notes.
const MOC_PREFIX: &str = "MOC-";

/// Directory names never entered by the search (besides hidden ones).
const SKIPPED_DIRS: &[&str] = &["temp"];

/// Bounds for the recursive filename search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Deepest directory level below the vault root that is listed.
    pub max_depth: usize,
    /// Soft wall-clock ceiling, checked between directories.
    pub timeout: Duration,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self { max_depth: 15, timeout: Duration::from_secs(20) }
    }
}

/// Maps link tokens such as `"MyNote"` or `"$ Zettelkasten.md"` to files under a vault root.
#[derive(Debug, Clone)]
pub struct FilenameResolver {
    root: PathBuf,
    limits: SearchLimits,
    /// Folders skipped by the search (relative paths from vault root).
    excluded_folders: Vec<PathBuf>,
}

impl FilenameResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), limits: SearchLimits::default(), excluded_folders: Vec::new() }
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Exclude folders from the search. Absolute paths are made relative to the root.
    pub fn with_exclusions(mut self, excluded_folders: Vec<PathBuf>) -> Self {
        self.excluded_folders = excluded_folders
            .into_iter()
            .map(|p| {
                if p.is_absolute() {
                    p.strip_prefix(&self.root).unwrap_or(&p).to_path_buf()
                } else {
                    p
                }
            })
            .collect();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Resolve a link token to an existing file.
    ///
    /// Tries, in order: the token joined to the root, every naming variant in
    /// the root, then a breadth-first search of the vault. `None` is a normal
    /// miss, not an error.
    pub fn resolve(&self, token: &str) -> Option<PathBuf> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        let direct = self.root.join(token);
        if direct.is_file() {
            debug!(path = %direct.display(), "resolved directly");
            return Some(direct);
        }

        let candidates = candidate_names(token);
        debug!(?candidates, "trying variants");

        if let Some(found) = find_candidate(&self.root, &candidates) {
            debug!(path = %found.display(), "found in vault root");
            return Some(found);
        }

        debug!(token, "not found in root, searching subdirectories");
        let found = self.search(token, &candidates);
        if found.is_none() {
            debug!(token, "could not resolve link token");
        }
        found
    }

    /// Breadth-first search with children in file-name order.
    ///
    /// The first directory yielding a match holds the shallowest and, among
    /// equally shallow ones, lexicographically smallest path, because paths
    /// compare component by component.
    fn search(&self, token: &str, candidates: &[String]) -> Option<PathBuf> {
        let deadline = Instant::now() + self.limits.timeout;
        let needle = basename_needle(token);
        let mut visited = VisitedDirs::new();
        let mut queue = VecDeque::from([(self.root.clone(), 0usize)]);

        while let Some((dir, depth)) = queue.pop_front() {
            if Instant::now() >= deadline {
                warn!(
                    token,
                    timeout_secs = self.limits.timeout.as_secs(),
                    "filename search timed out"
                );
                return None;
            }

            let Some(identity) = DirIdentity::of(&dir) else {
                debug!(dir = %dir.display(), "skipping unreadable directory");
                continue;
            };
            if !visited.track(identity) {
                debug!(dir = %dir.display(), "skipping already visited directory");
                continue;
            }

            // The root was already checked for exact variants.
            if depth > 0
                && let Some(found) = find_candidate(&dir, candidates)
            {
                debug!(path = %found.display(), depth, "found variant in subdirectory");
                return Some(found);
            }

            let listing = list_dir(&dir);

            if let Some(needle) = needle.as_deref()
                && let Some(found) = listing.files.iter().find(|f| is_partial_match(f, needle))
            {
                debug!(path = %found.display(), depth, "found partial match");
                return Some(found.clone());
            }

            if depth < self.limits.max_depth {
                queue.extend(
                    listing
                        .dirs
                        .into_iter()
                        .filter(|d| !self.is_skipped(d))
                        .map(|d| (d, depth + 1)),
                );
            }
        }

        None
    }

    fn is_skipped(&self, dir: &Path) -> bool {
        let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

        if name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) {
            return true;
        }

        if !self.excluded_folders.is_empty()
            && let Ok(relative) = dir.strip_prefix(&self.root)
        {
            return self.excluded_folders.iter().any(|excluded| relative.starts_with(excluded));
        }

        false
    }
}

/// File names tried for a token, in priority order.
pub fn candidate_names(token: &str) -> Vec<String> {
    let base = token.strip_suffix(".md").unwrap_or(token);

    let mut names = vec![
        base.to_string(),
        format!("{base}.md"),
        format!("{base}{DECORATIVE_SUFFIX}.md"),
        format!("${base}.md"),
        format!("@{base}.md"),
        format!("={base}.md"),
        format!("$.{base}.md"),
        format!("$ {base}.md"),
        format!("$. {base}.md"),
    ];
    names.extend(EXTRA_SIGILS.iter().map(|sigil| format!("{sigil}{base}.md")));
    if !base.starts_with(MOC_PREFIX) {
        names.push(format!("{MOC_PREFIX}{base}.md"));
    }
    names
}

fn find_candidate(dir: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates.iter().map(|name| dir.join(name)).find(|path| path.is_file())
}

/// Lowercased final path component of the token without `.md`, used for
/// case-insensitive containment matching.
fn basename_needle(token: &str) -> Option<String> {
    let base = token.strip_suffix(".md").unwrap_or(token);
    let name = base.rsplit(['/', '\\']).next().unwrap_or(base).trim();
    if name.is_empty() { None } else { Some(name.to_lowercase()) }
}

fn is_partial_match(path: &Path, needle: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".md") && name.to_lowercase().contains(needle)
}

#[derive(Debug, Default)]
struct Listing {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

/// One-level listing in file-name order, following symlinks.
///
/// Entries that cannot be read (permissions, broken links) are skipped.
fn list_dir(dir: &Path) -> Listing {
    let mut listing = Listing::default();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                listing.dirs.push(entry.into_path());
            }
            Ok(entry) if entry.file_type().is_file() => {
                listing.files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(e) => debug!(dir = %dir.display(), error = %e, "skipping entry"),
        }
    }

    listing
}
