//! Speech-signature mining over annotated transcripts
//!
//! Given a corpus of documents whose tokens have already been lemmatized,
//! tagged, and (optionally) dependency-parsed, this crate finds what makes a
//! speaker's language distinctive:
//!
//! - rare **vocabulary**, ranked by rarity tier and frequency
//! - **learning phrases**: n-gram collocations scored by spread and PMI
//! - **signature phrases**: occurrences of known idioms
//! - **pattern phrases**: verb/noun dependency patterns
//!
//! ```
//! use speech_signature::{analyze_corpus, AnnotatedToken, Corpus, DepRel, Document, PosTag};
//!
//! let tokens = vec![
//!     AnnotatedToken::new("folks", "folk", PosTag::Noun, DepRel::Other, false),
//!     AnnotatedToken::new("reckon", "reckon", PosTag::Verb, DepRel::Other, false),
//! ];
//! let corpus: Corpus = vec![Document::new("a", tokens)].into_iter().collect();
//! let result = analyze_corpus(corpus);
//! assert_eq!(result.corpus_stats.doc_count, 1);
//! ```

pub mod error;
pub mod extract;
pub mod lexicon;
pub mod nlp;
pub mod phrase;
pub mod pipeline;
pub mod result;
pub mod syntax;
pub mod types;

pub use error::{AnalyzeError, Result};
pub use extract::{CollocationMiner, IdiomMatcher, VocabularyExtractor};
pub use lexicon::{classify, IdiomLexicon, LexicalTier};
pub use pipeline::observer::{NoopObserver, PipelineObserver, StageTimings};
pub use pipeline::runner::SignaturePipeline;
pub use pipeline::spec::AnalysisConfig;
pub use pipeline::traits::{NoopPreprocessor, Preprocessor, StopwordPreprocessor};
pub use result::{
    AnalysisResult, CorpusStats, IdiomPhrase, LearningPhrase, PatternPhrase, VocabularyEntry,
};
pub use syntax::{DependencyGraph, PatternAggregator, PatternExtractor, PatternKind};
pub use types::{AnnotatedToken, Corpus, DepRel, Document, ParsedToken, PosTag};

/// Analyze a corpus with the default configuration and built-in idiom table
pub fn analyze_corpus(corpus: Corpus) -> AnalysisResult {
    SignaturePipeline::new().run(corpus, &mut NoopObserver)
}
