//! Idiom matching
//!
//! Generates n-grams (n = 2..=7 by default) and keeps only keys that are
//! exact members of an [`IdiomLexicon`]. No scoring: idioms rank by raw count.

use crate::extract::map_documents;
use crate::lexicon::IdiomLexicon;
use crate::phrase::ngram::{NGrams, DEFAULT_MAX_STOP_RATIO};
use crate::phrase::tally::{sort_by_count, TallyTable, DEFAULT_SURFACE_CAP};
use crate::pipeline::spec::AnalysisConfig;
use crate::result::IdiomPhrase;
use crate::types::{Corpus, Document};

/// Default cap on emitted idioms
pub const DEFAULT_IDIOM_CAP: usize = 500;

#[derive(Debug, Clone)]
pub struct IdiomMatcher {
    min_n: usize,
    max_n: usize,
    max_stop_ratio: f64,
    cap: usize,
    surface_cap: usize,
    parallel: bool,
}

impl Default for IdiomMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl IdiomMatcher {
    pub fn new() -> Self {
        Self {
            min_n: 2,
            max_n: 7,
            max_stop_ratio: DEFAULT_MAX_STOP_RATIO,
            cap: DEFAULT_IDIOM_CAP,
            surface_cap: DEFAULT_SURFACE_CAP,
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            min_n: config.ngrams.idiom_min,
            max_n: config.ngrams.idiom_max,
            max_stop_ratio: config.ngrams.max_stop_ratio,
            cap: config.limits.idioms,
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

    fn document_matches(&self, doc: &Document, lexicon: &IdiomLexicon) -> TallyTable<()> {
        let mut matches = TallyTable::new(self.surface_cap);
        if lexicon.is_empty() {
            return matches;
        }
        // no idiom is longer than the longest lexicon entry
        let max_n = self.max_n.min(lexicon.max_words());
        for n in self.min_n..=max_n {
            let ngrams = NGrams::new(&doc.tokens, n).with_max_stop_ratio(self.max_stop_ratio);
            for gram in ngrams.filter(|g| lexicon.contains(&g.key)) {
                matches.record(&gram.key, &gram.surface, ());
            }
        }
        matches
    }

    /// Count idiom occurrences across the corpus, most frequent first
    pub fn find(&self, corpus: &Corpus, lexicon: &IdiomLexicon) -> Vec<IdiomPhrase> {
        let partials = map_documents(corpus.documents(), self.parallel, |doc| {
            self.document_matches(doc, lexicon)
        });

        let mut table = TallyTable::new(self.surface_cap);
        for partial in partials {
            table.merge(partial);
        }

        let mut entries = table.into_entries();
        sort_by_count(&mut entries);
        entries.truncate(self.cap);
        entries
            .into_iter()
            .map(|t| IdiomPhrase {
                phrase: t.key,
                count: t.count,
                doc_freq: t.doc_freq,
                surfaces: t.surfaces,
            })
            .collect()
    }
}
