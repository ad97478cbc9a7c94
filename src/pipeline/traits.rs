//! Stage trait definitions for the pipeline.
//!
//! Extraction stages are fixed; the one pluggable boundary is preprocessing,
//! which lets callers correct annotator output before anything is counted.
//! Implementations are statically dispatched.

use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::spec::AnalysisConfig;
use crate::types::Document;

// ============================================================================
// Preprocessor: optional token correction (stage 0)
// ============================================================================

/// Optional preprocessing stage.
///
/// Runs once per document, before any extractor sees it.
///
/// # Contract
///
/// - **Input**: a mutable [`Document`] (modify tokens in place).
/// - **Idempotent**: calling `preprocess` twice should produce the same
///   result as calling it once.
///
/// A concrete preprocessor might mark extra stop words, override POS tags for
/// known domain terms, or re-lemmatize tokens with a different strategy.
pub trait Preprocessor {
    fn preprocess(&self, doc: &mut Document, cfg: &AnalysisConfig);
}

/// Passes documents through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPreprocessor;

impl Preprocessor for NoopPreprocessor {
    #[inline]
    fn preprocess(&self, _doc: &mut Document, _cfg: &AnalysisConfig) {}
}

/// Flags tokens whose lemma or lowercased text is a stop word
///
/// For annotators that leave `is_stop` unset. Only ever sets the flag, so
/// annotator decisions are kept.
#[derive(Debug, Clone)]
pub struct StopwordPreprocessor {
    filter: StopwordFilter,
}

impl Default for StopwordPreprocessor {
    fn default() -> Self {
        Self::new(StopwordFilter::new("en"))
    }
}

impl StopwordPreprocessor {
    pub fn new(filter: StopwordFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &StopwordFilter {
        &self.filter
    }
}

impl Preprocessor for StopwordPreprocessor {
    fn preprocess(&self, doc: &mut Document, _cfg: &AnalysisConfig) {
        for token in doc.tokens.iter_mut().filter(|t| !t.is_stop) {
            token.is_stop =
                self.filter.is_stopword(&token.lemma) || self.filter.is_stopword(&token.text);
        }
    }
}
