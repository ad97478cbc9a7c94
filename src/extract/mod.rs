//! Token-stream extractors
//!
//! Each extractor maps every document to a local partial result, then folds
//! the partials in document order on a single owner. The map step may run on
//! the rayon pool; the fold never does, so output is identical either way.

pub mod collocation;
pub mod idiom;
pub mod vocabulary;

use rayon::prelude::*;

use crate::types::Document;

pub use collocation::CollocationMiner;
pub use idiom::IdiomMatcher;
pub use vocabulary::VocabularyExtractor;

/// Apply `f` to every document, preserving document order in the output
pub(crate) fn map_documents<T, F>(documents: &[Document], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(&Document) -> T + Sync + Send,
{
    if parallel && documents.len() > 1 {
        documents.par_iter().map(f).collect()
    } else {
        documents.iter().map(f).collect()
    }
}
