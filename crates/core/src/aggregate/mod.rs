//! Depth-bounded link traversal and aggregate document rendering.

pub mod collector;
pub mod render;
pub mod stats;
pub mod types;

pub use collector::LinkAggregator;
pub use stats::{Statistics, estimate_tokens, format_size};
pub use types::{
    Aggregate, AggregateError, AggregateOptions, AggregateOutcome, CollectedEntry, VisitedKey,
};
