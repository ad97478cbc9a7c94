//! Error types for the crate boundaries
//!
//! The extractors themselves are infallible; errors only arise when parsing
//! configuration, loading a corpus, or building a dependency graph.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("document {document:?}: token {index} points at head {head}, but the parse has {len} tokens")]
    InvalidGraph {
        document: String,
        index: usize,
        head: usize,
        len: usize,
    },

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzeError {
    /// Attach a document id to a graph error
    pub fn in_document(self, id: &str) -> Self {
        match self {
            AnalyzeError::InvalidGraph {
                index, head, len, ..
            } => AnalyzeError::InvalidGraph {
                document: id.to_string(),
                index,
                head,
                len,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzeError>;
