//! Token-level language helpers
//!
//! Normalized-form computation and stopword lists for annotators that do not
//! flag stop words themselves.

pub mod normalize;
pub mod stopwords;
