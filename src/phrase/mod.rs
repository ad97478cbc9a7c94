//! Phrase building blocks
//!
//! N-gram windows over annotated tokens and the ordered tallies that every
//! corpus-level aggregator folds them into.

pub mod ngram;
pub mod tally;
