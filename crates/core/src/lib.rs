//! Core library for obs2prompt.
//!
//! Resolves Obsidian wiki-link tokens to files inside a vault, follows the
//! link graph from a starting note up to a depth bound, and renders every
//! collected note into a single aggregate document.

pub mod aggregate;
pub mod config;
pub mod markdown;
pub mod tokens;
pub mod vault;

pub use aggregate::{
    Aggregate, AggregateError, AggregateOptions, AggregateOutcome, CollectedEntry,
    LinkAggregator, Statistics,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
