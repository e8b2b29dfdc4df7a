//! Vault filesystem access: link-token resolution and cycle-safe directory walking.
//!
//! This module maps the loose tokens written inside `[[...]]` links to real
//! files under the vault root, trying naming-convention variants before
//! falling back to a bounded breadth-first search.

pub mod identity;
pub mod resolver;

pub use identity::{DirIdentity, VisitedDirs};
pub use resolver::{FilenameResolver, SearchLimits, candidate_names};
