//! Directory identity tracking for symlink-cycle detection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Stable identity of a directory, independent of the path used to reach it.
///
/// On Unix this is the `(device, inode)` pair of the symlink target; elsewhere
/// the canonicalized path stands in for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DirIdentity {
    Inode { device: u64, inode: u64 },
    Path(PathBuf),
}

impl DirIdentity {
    /// Identity of the directory at `path`, following symlinks.
    ///
    /// Returns `None` when the directory cannot be stat'ed.
    #[cfg(unix)]
    pub fn of(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Some(Self::Inode { device: metadata.dev(), inode: metadata.ino() })
    }

    #[cfg(not(unix))]
    pub fn of(path: &Path) -> Option<Self> {
        path.canonicalize().ok().map(Self::Path)
    }
}

/// Set of directories already entered during one search.
#[derive(Debug, Default)]
pub struct VisitedDirs {
    seen: HashSet<DirIdentity>,
}

impl VisitedDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a directory. Returns `true` the first time it is seen.
    pub fn track(&mut self, identity: DirIdentity) -> bool {
        self.seen.insert(identity)
    }
}
