//! Output records
//!
//! Everything here is produced by the pipeline and handed to a persistence
//! sink. Field names serialize to the compact keys downstream stores expect
//! (`t`, `c`, `df`, ...); empty surface lists are omitted.

use serde::Serialize;

use crate::lexicon::LexicalTier;
use crate::syntax::patterns::PatternKind;

/// Tag identifying the scoring method that produced a result set
pub const METHOD_VERSION: &str = "1.0";

/// One distinctive lemma
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyEntry {
    #[serde(rename = "t")]
    pub lemma: String,
    #[serde(rename = "c")]
    pub count: u32,
    /// Occurrences per 10,000 tokens of running text, two decimals
    #[serde(rename = "p10k")]
    pub per_ten_thousand: f64,
    #[serde(rename = "r")]
    pub tier: LexicalTier,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<String>,
}

/// A collocation worth learning
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningPhrase {
    #[serde(rename = "t")]
    pub phrase: String,
    #[serde(rename = "c")]
    pub count: u32,
    #[serde(rename = "df")]
    pub doc_freq: u32,
    /// `count * ln(1 + doc_freq)`, two decimals
    #[serde(rename = "s")]
    pub score: f64,
    pub pmi: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<String>,
}

/// A matched idiom
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdiomPhrase {
    #[serde(rename = "t")]
    pub phrase: String,
    #[serde(rename = "c")]
    pub count: u32,
    #[serde(rename = "df")]
    pub doc_freq: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<String>,
}

/// A syntactic usage pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternPhrase {
    #[serde(rename = "t")]
    pub pattern: String,
    pub kind: PatternKind,
    #[serde(rename = "c")]
    pub count: u32,
    #[serde(rename = "df")]
    pub doc_freq: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    /// Documents actually analyzed
    pub doc_count: usize,
    /// Annotated tokens across all documents
    pub token_count: usize,
    pub method_version: &'static str,
}

/// The four ranked, capped lists plus corpus statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub vocabulary: Vec<VocabularyEntry>,
    pub learning_phrases: Vec<LearningPhrase>,
    /// Idiom matches
    pub signature_phrases: Vec<IdiomPhrase>,
    pub pattern_phrases: Vec<PatternPhrase>,
    pub corpus_stats: CorpusStats,
}

impl AnalysisResult {
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
            && self.learning_phrases.is_empty()
            && self.signature_phrases.is_empty()
            && self.pattern_phrases.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
