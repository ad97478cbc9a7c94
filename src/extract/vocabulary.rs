//! Vocabulary extraction
//!
//! Counts content lemmas that are neither stop words nor in the common tier,
//! and ranks them rarest first. Rates are per 10,000 tokens of running text,
//! where every token counts towards the denominator.

use crate::extract::map_documents;
use crate::lexicon::{classify, LexicalTier};
use crate::phrase::tally::{round2, TallyTable, DEFAULT_SURFACE_CAP};
use crate::pipeline::spec::AnalysisConfig;
use crate::result::VocabularyEntry;
use crate::types::{AnnotatedToken, Corpus};

/// Default cap on emitted entries
pub const DEFAULT_VOCABULARY_CAP: usize = 1000;

/// Lemma counts for one slice of tokens
#[derive(Debug, Clone)]
pub struct VocabularyCounts {
    lemmas: TallyTable<LexicalTier>,
    total_tokens: usize,
}

impl VocabularyCounts {
    pub fn new(surface_cap: usize) -> Self {
        Self {
            lemmas: TallyTable::new(surface_cap),
            total_tokens: 0,
        }
    }

    pub fn add<'a>(&mut self, tokens: impl IntoIterator<Item = &'a AnnotatedToken>) {
        for token in tokens {
            self.total_tokens += 1;
            if !token.is_vocabulary_candidate() {
                continue;
            }
            let tier = classify(&token.lemma);
            if tier == LexicalTier::Common {
                continue;
            }
            self.lemmas.record(&token.lemma, &token.text, tier);
        }
    }

    pub fn merge(&mut self, other: VocabularyCounts) {
        self.total_tokens += other.total_tokens;
        self.lemmas.merge(other.lemmas);
    }
}

/// Rarity-ranked lemma frequency extractor
#[derive(Debug, Clone)]
pub struct VocabularyExtractor {
    cap: usize,
    surface_cap: usize,
    parallel: bool,
}

impl Default for VocabularyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabularyExtractor {
    pub fn new() -> Self {
        Self {
            cap: DEFAULT_VOCABULARY_CAP,
            surface_cap: DEFAULT_SURFACE_CAP,
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            cap: config.limits.vocabulary,
            surface_cap: config.limits.surfaces,
            parallel: config.parallel,
        }
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Rank the vocabulary of a flat token sequence
    pub fn extract<'a>(&self, tokens: impl IntoIterator<Item = &'a AnnotatedToken>) -> Vec<VocabularyEntry> {
        let mut counts = VocabularyCounts::new(self.surface_cap);
        counts.add(tokens);
        self.rank(counts)
    }

    /// Rank the vocabulary of a whole corpus, counting documents independently
    pub fn extract_corpus(&self, corpus: &Corpus) -> Vec<VocabularyEntry> {
        let partials = map_documents(corpus.documents(), self.parallel, |doc| {
            let mut counts = VocabularyCounts::new(self.surface_cap);
            counts.add(&doc.tokens);
            counts
        });

        let mut counts = VocabularyCounts::new(self.surface_cap);
        for partial in partials {
            counts.merge(partial);
        }
        self.rank(counts)
    }

    /// Sort by tier then count, both descending; equal keys keep first-seen order
    pub fn rank(&self, counts: VocabularyCounts) -> Vec<VocabularyEntry> {
        if counts.total_tokens == 0 {
            return Vec::new();
        }
        let total = counts.total_tokens as f64;

        let mut entries: Vec<VocabularyEntry> = counts
            .lemmas
            .into_entries()
            .into_iter()
            .map(|t| VocabularyEntry {
                per_ten_thousand: round2(t.count as f64 / total * 10_000.0),
                lemma: t.key,
                count: t.count,
                tier: t.meta,
                surfaces: t.surfaces,
            })
            .collect();

        entries.sort_by(|a, b| b.tier.cmp(&a.tier).then(b.count.cmp(&a.count)));
        entries.truncate(self.cap);
        entries
    }
}
