//! Dependency-graph pattern mining

pub mod aggregate;
pub mod graph;
pub mod patterns;

pub use aggregate::PatternAggregator;
pub use graph::DependencyGraph;
pub use patterns::{PatternExtractor, PatternKind, PatternMatch};
