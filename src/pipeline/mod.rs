//! Corpus orchestration
//!
//! Configuration, its validation, stage observation, and the runner that
//! drives every extractor over a corpus.

pub mod errors;
pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
