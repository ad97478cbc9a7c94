//! Corpus-level pattern ranking

use crate::extract::map_documents;
use crate::lexicon::is_pattern_head_common;
use crate::phrase::tally::{sort_by_count, TallyTable, DEFAULT_SURFACE_CAP};
use crate::pipeline::spec::AnalysisConfig;
use crate::result::PatternPhrase;
use crate::syntax::patterns::{PatternExtractor, PatternKind, PatternMatch};
use crate::types::Corpus;

/// Default cap on emitted patterns
pub const DEFAULT_PATTERN_CAP: usize = 1000;

#[derive(Debug, Clone)]
pub struct PatternAggregator {
    cap: usize,
    surface_cap: usize,
    parallel: bool,
}

impl Default for PatternAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternAggregator {
    pub fn new() -> Self {
        Self {
            cap: DEFAULT_PATTERN_CAP,
            surface_cap: DEFAULT_SURFACE_CAP,
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            cap: config.limits.patterns,
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

    fn tally(&self, matches: Vec<PatternMatch>) -> TallyTable<PatternKind> {
        let mut table = TallyTable::new(self.surface_cap);
        for m in matches {
            table.record(&m.key, &m.surface, m.kind);
        }
        table
    }

    /// Merge per-document matches (one item per document, in document order)
    ///
    /// A key keeps the kind it was first seen with. Keys headed by a common
    /// lemma are dropped before the cap applies.
    pub fn aggregate<I>(&self, per_document: I) -> Vec<PatternPhrase>
    where
        I: IntoIterator<Item = Vec<PatternMatch>>,
    {
        let mut table = TallyTable::new(self.surface_cap);
        for matches in per_document {
            table.merge(self.tally(matches));
        }

        let mut entries: Vec<_> = table
            .into_entries()
            .into_iter()
            .filter(|t| !is_pattern_head_common(&t.key))
            .collect();
        sort_by_count(&mut entries);
        entries.truncate(self.cap);
        entries
            .into_iter()
            .map(|t| PatternPhrase {
                pattern: t.key,
                kind: t.meta,
                count: t.count,
                doc_freq: t.doc_freq,
                surfaces: t.surfaces,
            })
            .collect()
    }

    /// Extract and aggregate patterns for every document carrying a graph
    pub fn aggregate_corpus(&self, corpus: &Corpus) -> Vec<PatternPhrase> {
        let extractor = PatternExtractor::new();
        let per_document = map_documents(corpus.documents(), self.parallel, |doc| {
            doc.graph
                .as_ref()
                .map(|graph| extractor.extract(graph))
                .unwrap_or_default()
        });
        self.aggregate(per_document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DepRel, Document, ParsedToken, PosTag};

    fn occurrence(key: &str, kind: PatternKind, surface: &str) -> PatternMatch {
        PatternMatch {
            key: key.to_string(),
            kind,
            surface: surface.to_string(),
        }
    }

    #[test]
    fn test_counts_and_doc_freq() {
        let doc_a = vec![
            occurrence("wrap up", PatternKind::Phrasal, "wrapped up"),
            occurrence("bizarre policy", PatternKind::AdjectiveNoun, "bizarre policy"),
            occurrence("wrap up", PatternKind::Phrasal, "wrap up"),
        ];
        let doc_b = vec![occurrence("wrap up", PatternKind::Phrasal, "wrapped up")];

        let patterns = PatternAggregator::new().aggregate(vec![doc_a, doc_b]);
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].pattern, "wrap up");
        assert_eq!(patterns[0].count, 3);
        assert_eq!(patterns[0].doc_freq, 2);
        assert_eq!(patterns[0].surfaces, vec!["wrapped up", "wrap up"]);
        assert_eq!(patterns[1].doc_freq, 1);
    }

    #[test]
    fn test_first_kind_wins() {
        let patterns = PatternAggregator::new().aggregate(vec![
            vec![occurrence("payroll levy", PatternKind::NounCompound, "payroll levy")],
            vec![occurrence("payroll levy", PatternKind::VerbObject, "payroll the levy")],
        ]);
        assert_eq!(patterns[0].kind, PatternKind::NounCompound);
        assert_eq!(patterns[0].count, 2);
    }

    #[test]
    fn test_common_head_dropped_regardless_of_count() {
        let mut doc = vec![occurrence("think SB", PatternKind::VerbObject, "think it"); 50];
        doc.push(occurrence("reckon SB", PatternKind::VerbObject, "reckon it"));

        let patterns = PatternAggregator::new().aggregate(vec![doc]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern, "reckon SB");
    }

    #[test]
    fn test_cap_after_filter() {
        let doc = vec![
            occurrence("think SB", PatternKind::VerbObject, "think it"),
            occurrence("reckon SB", PatternKind::VerbObject, "reckon it"),
            occurrence("bizarre policy", PatternKind::AdjectiveNoun, "bizarre policy"),
        ];
        let patterns = PatternAggregator::new().with_cap(1).aggregate(vec![doc]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].pattern, "reckon SB");
    }

    #[test]
    fn test_corpus_without_graphs() {
        let corpus: Corpus = vec![Document::new("a", Vec::new())].into_iter().collect();
        assert!(PatternAggregator::new().aggregate_corpus(&corpus).is_empty());
        assert!(PatternAggregator::new().aggregate_corpus(&Corpus::new()).is_empty());
    }

    #[test]
    fn test_aggregate_corpus_from_parse() {
        // "folks reckon it" in two documents
        let parse = || {
            vec![
                ParsedToken::new("folks", "folk", PosTag::Noun, DepRel::Other, Some(1)),
                ParsedToken::new("reckon", "reckon", PosTag::Verb, DepRel::Other, None),
                ParsedToken::new("it", "it", PosTag::Pronoun, DepRel::Dobj, Some(1)),
            ]
        };
        let corpus: Corpus = vec![
            Document::from_parsed("a", parse()).unwrap(),
            Document::from_parsed("b", parse()).unwrap(),
        ]
        .into_iter()
        .collect();

        for parallel in [false, true] {
            let patterns = PatternAggregator::new()
                .with_parallel(parallel)
                .aggregate_corpus(&corpus);
            assert_eq!(patterns.len(), 1);
            assert_eq!(patterns[0].pattern, "reckon it");
            assert_eq!(patterns[0].count, 2);
            assert_eq!(patterns[0].doc_freq, 2);
        }
    }
}
