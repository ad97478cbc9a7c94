//! Collocation mining
//!
//! Counts n-grams (n = 2..=5 by default) across the corpus and keeps those
//! that are frequent, spread over enough documents, and contain at least one
//! non-common word. Survivors are scored by
//!
//! ```text
//! score = count * ln(1 + doc_freq)
//! pmi   = log2( (c + 0.01) * (T + 0.01)^(n-1) / (Π (c_i + 0.01) + 1e-10) )
//! ```
//!
//! where `T` is the corpus token count and `c_i` the unigram count of each
//! word. `T` stands in for the number of n-grams of each length; downstream
//! consumers rely on these exact values, so the approximation stays.
//!
//! Ranking is PMI descending, then score descending.

use rustc_hash::FxHashMap;

use crate::extract::map_documents;
use crate::lexicon::is_phrase_distinctive;
use crate::phrase::ngram::{NGrams, DEFAULT_MAX_STOP_RATIO};
use crate::phrase::tally::{round2, TallyTable, DEFAULT_SURFACE_CAP};
use crate::pipeline::spec::{AnalysisConfig, Thresholds};
use crate::result::LearningPhrase;
use crate::types::{Corpus, Document};

/// Default cap on emitted phrases
pub const DEFAULT_PHRASE_CAP: usize = 1000;

const SMOOTHING: f64 = 0.01;
const EPSILON: f64 = 1e-10;

/// Unigram counts over normalized forms
#[derive(Debug, Clone, Default)]
pub struct UnigramCounts {
    counts: FxHashMap<String, u64>,
    total: u64,
}

impl UnigramCounts {
    pub fn from_document(doc: &Document) -> Self {
        let mut unigrams = Self::default();
        for token in &doc.tokens {
            let norm = token.norm.trim();
            if norm.is_empty() {
                continue;
            }
            *unigrams.counts.entry(norm.to_string()).or_insert(0) += 1;
            unigrams.total += 1;
        }
        unigrams
    }

    pub fn merge(&mut self, other: UnigramCounts) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
        self.total += other.total;
    }

    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Non-blank tokens seen
    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Pointwise mutual information of an `n`-word phrase, two decimals
///
/// Returns 0.0 when `n < 2`, the corpus or phrase count is empty, or the
/// phrase does not have exactly `n` words.
pub fn pmi(phrase: &str, phrase_count: u32, unigrams: &UnigramCounts, n: usize) -> f64 {
    let total = unigrams.total();
    if total == 0 || phrase_count == 0 || n < 2 {
        return 0.0;
    }
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if words.len() != n {
        return 0.0;
    }

    let independent: f64 = words
        .iter()
        .map(|w| unigrams.get(w) as f64 + SMOOTHING)
        .product();
    let joint = (phrase_count as f64 + SMOOTHING) * (total as f64 + SMOOTHING).powi(n as i32 - 1);

    round2((joint / (independent + EPSILON)).log2())
}

/// Per-document n-gram counts plus unigram statistics
#[derive(Debug, Clone)]
struct CollocationPartial {
    phrases: TallyTable<usize>,
    unigrams: UnigramCounts,
}

/// N-gram collocation miner
#[derive(Debug, Clone)]
pub struct CollocationMiner {
    min_n: usize,
    max_n: usize,
    max_stop_ratio: f64,
    thresholds: Thresholds,
    cap: usize,
    surface_cap: usize,
    parallel: bool,
}

impl Default for CollocationMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl CollocationMiner {
    pub fn new() -> Self {
        Self {
            min_n: 2,
            max_n: 5,
            max_stop_ratio: DEFAULT_MAX_STOP_RATIO,
            thresholds: Thresholds::default(),
            cap: DEFAULT_PHRASE_CAP,
            surface_cap: DEFAULT_SURFACE_CAP,
            parallel: false,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            min_n: config.ngrams.collocation_min,
            max_n: config.ngrams.collocation_max,
            max_stop_ratio: config.ngrams.max_stop_ratio,
            thresholds: config.thresholds.clone(),
            cap: config.limits.learning_phrases,
            surface_cap: config.limits.surfaces,
            parallel: config.parallel,
        }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.min_n = min_n;
        self.max_n = max_n;
        self
    }

    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn document_partial(&self, doc: &Document) -> CollocationPartial {
        let mut phrases = TallyTable::new(self.surface_cap);
        for n in self.min_n..=self.max_n {
            let ngrams = NGrams::new(&doc.tokens, n).with_max_stop_ratio(self.max_stop_ratio);
            for gram in ngrams {
                phrases.record(&gram.key, &gram.surface, n);
            }
        }
        CollocationPartial {
            phrases,
            unigrams: UnigramCounts::from_document(doc),
        }
    }

    /// Mine ranked learning phrases from the corpus
    ///
    /// Thresholds are chosen from the number of documents actually present.
    pub fn mine(&self, corpus: &Corpus) -> Vec<LearningPhrase> {
        let partials = map_documents(corpus.documents(), self.parallel, |doc| {
            self.document_partial(doc)
        });

        let mut phrases = TallyTable::new(self.surface_cap);
        let mut unigrams = UnigramCounts::default();
        for partial in partials {
            phrases.merge(partial.phrases);
            unigrams.merge(partial.unigrams);
        }

        let (min_count, min_doc_freq) = self.thresholds.for_corpus(corpus.len());

        let mut results: Vec<LearningPhrase> = phrases
            .into_entries()
            .into_iter()
            .filter(|t| t.count >= min_count && t.doc_freq >= min_doc_freq)
            .filter(|t| is_phrase_distinctive(&t.key))
            .map(|t| LearningPhrase {
                score: round2(t.count as f64 * (1.0 + t.doc_freq as f64).ln()),
                pmi: pmi(&t.key, t.count, &unigrams, t.meta),
                count: t.count,
                doc_freq: t.doc_freq,
                phrase: t.key,
                surfaces: t.surfaces,
            })
            .collect();

        results.sort_by(|a, b| b.pmi.total_cmp(&a.pmi).then(b.score.total_cmp(&a.score)));
        results.truncate(self.cap);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnnotatedToken, DepRel, PosTag};

    fn tok(text: &str, lemma: &str, pos: PosTag, is_stop: bool) -> AnnotatedToken {
        AnnotatedToken::new(text, lemma, pos, DepRel::Other, is_stop)
    }

    /// `times` repetitions of "folks reckon", separated by a stop pronoun
    fn folks_reckon(times: usize) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();
        for _ in 0..times {
            tokens.push(tok("folks", "folk", PosTag::Noun, false));
            tokens.push(tok("reckon", "reckon", PosTag::Verb, false));
            tokens.push(tok("it", "it", PosTag::Pronoun, true));
        }
        tokens
    }

    fn corpus(docs: Vec<Vec<AnnotatedToken>>) -> Corpus {
        docs.into_iter()
            .enumerate()
            .map(|(i, tokens)| Document::new(format!("doc{i}"), tokens))
            .collect()
    }

    fn find<'a>(phrases: &'a [LearningPhrase], key: &str) -> Option<&'a LearningPhrase> {
        phrases.iter().find(|p| p.phrase == key)
    }

    #[test]
    fn test_empty_corpus() {
        assert!(CollocationMiner::new().mine(&Corpus::new()).is_empty());
        assert!(CollocationMiner::new().mine(&corpus(vec![vec![]])).is_empty());
    }

    #[test]
    fn test_multi_doc_threshold_boundary() {
        let miner = CollocationMiner::new();

        let included = miner.mine(&corpus(vec![folks_reckon(3), folks_reckon(2)]));
        let phrase = find(&included, "folk reckon").expect("5 occurrences over 2 docs");
        assert_eq!((phrase.count, phrase.doc_freq), (5, 2));

        let excluded = miner.mine(&corpus(vec![folks_reckon(2), folks_reckon(2)]));
        assert!(find(&excluded, "folk reckon").is_none());
    }

    #[test]
    fn test_multi_doc_requires_two_documents() {
        // 6 occurrences, but all in one of the two documents
        let phrases = CollocationMiner::new().mine(&corpus(vec![folks_reckon(6), vec![]]));
        assert!(find(&phrases, "folk reckon").is_none());
    }

    #[test]
    fn test_single_doc_threshold_boundary() {
        let miner = CollocationMiner::new();

        let included = miner.mine(&corpus(vec![folks_reckon(2)]));
        let phrase = find(&included, "folk reckon").expect("2 occurrences in a single doc");
        assert_eq!((phrase.count, phrase.doc_freq), (2, 1));
        assert_eq!(phrase.score, round2(2.0 * 2f64.ln()));

        let excluded = miner.mine(&corpus(vec![folks_reckon(1)]));
        assert!(find(&excluded, "folk reckon").is_none());
    }

    #[test]
    fn test_common_only_phrases_dropped() {
        let mut tokens = Vec::new();
        for _ in 0..3 {
            tokens.push(tok("go", "go", PosTag::Verb, false));
            tokens.push(tok("on", "on", PosTag::Adverb, false));
        }
        let phrases = CollocationMiner::new().mine(&corpus(vec![tokens]));
        assert!(find(&phrases, "go on").is_none());
        assert!(find(&phrases, "on go").is_none());
    }

    #[test]
    fn test_pmi_guards() {
        let mut unigrams = UnigramCounts::default();
        assert_eq!(pmi("a b", 3, &unigrams, 2), 0.0);

        unigrams.counts.insert("a".to_string(), 3);
        unigrams.counts.insert("b".to_string(), 3);
        unigrams.total = 10;
        assert_eq!(pmi("a b", 0, &unigrams, 2), 0.0);
        assert_eq!(pmi("a", 3, &unigrams, 1), 0.0);
        assert_eq!(pmi("a b", 3, &unigrams, 3), 0.0);
        assert!(pmi("a b", 3, &unigrams, 2) > 0.0);
    }

    #[test]
    fn test_pmi_value() {
        let mut unigrams = UnigramCounts::default();
        unigrams.counts.insert("folk".to_string(), 5);
        unigrams.counts.insert("reckon".to_string(), 5);
        unigrams.total = 28;

        let expected = ((5.01_f64 * 28.01) / (5.01 * 5.01 + 1e-10)).log2();
        assert_eq!(pmi("folk reckon", 5, &unigrams, 2), round2(expected));
    }

    #[test]
    fn test_pmi_decreases_with_unigram_counts() {
        let mut unigrams = UnigramCounts::default();
        unigrams.total = 1000;
        unigrams.counts.insert("w1".to_string(), 10);
        unigrams.counts.insert("w2".to_string(), 10);
        let base = pmi("w1 w2", 5, &unigrams, 2);

        unigrams.counts.insert("w1".to_string(), 20);
        let more_w1 = pmi("w1 w2", 5, &unigrams, 2);
        assert!(more_w1 < base);

        unigrams.counts.insert("w2".to_string(), 40);
        assert!(pmi("w1 w2", 5, &unigrams, 2) < more_w1);
    }

    #[test]
    fn test_sorted_by_pmi_then_score() {
        let phrases = CollocationMiner::new().mine(&corpus(vec![folks_reckon(3), folks_reckon(3)]));
        assert!(!phrases.is_empty());
        for pair in phrases.windows(2) {
            let ordered = pair[0].pmi > pair[1].pmi
                || (pair[0].pmi == pair[1].pmi && pair[0].score >= pair[1].score);
            assert!(ordered, "{:?} before {:?}", pair[0], pair[1]);
        }
    }

    /// `words` followed by a stop filler token, repeated `times` times
    fn with_filler(words: &[&str], times: usize) -> Vec<AnnotatedToken> {
        let mut tokens = Vec::new();
        for _ in 0..times {
            for word in words {
                tokens.push(tok(word, word, PosTag::Noun, false));
            }
            tokens.push(tok("um", "um", PosTag::Other, true));
        }
        tokens
    }

    #[test]
    fn test_zero_pmi_ties_break_on_score() {
        // xenon 24, yurt 25, umbra 19, vortex 21, T = 199:
        // "xenon yurt" pmi rounds up from -0.0035, "umbra vortex" down from 0.0022
        let mut tokens = with_filler(&["xenon", "yurt"], 3);
        tokens.extend(with_filler(&["umbra", "vortex"], 2));
        tokens.extend(with_filler(&["xenon"], 21));
        tokens.extend(with_filler(&["yurt"], 22));
        tokens.extend(with_filler(&["umbra"], 17));
        tokens.extend(with_filler(&["vortex"], 19));
        tokens.extend(with_filler(&[], 26));
        assert_eq!(tokens.len(), 199);

        let phrases = CollocationMiner::new().mine(&corpus(vec![tokens]));
        let position = |key: &str| phrases.iter().position(|p| p.phrase == key).unwrap();
        let (xenon, umbra) = (position("xenon yurt"), position("umbra vortex"));

        assert_eq!(phrases[xenon].pmi, 0.0);
        assert_eq!(phrases[umbra].pmi, 0.0);
        assert!(phrases[xenon].pmi.is_sign_positive());
        assert!(phrases[xenon].score > phrases[umbra].score);
        assert!(xenon < umbra);

        let json = serde_json::to_string(&phrases[xenon]).unwrap();
        assert!(json.contains("\"pmi\":0.0"), "{json}");
    }

    #[test]
    fn test_idempotent_and_parallel_agnostic() {
        let c = corpus(vec![folks_reckon(4), folks_reckon(3), folks_reckon(2)]);
        let sequential = CollocationMiner::new().mine(&c);
        let again = CollocationMiner::new().mine(&c);
        let parallel = CollocationMiner::new().with_parallel(true).mine(&c);

        assert_eq!(sequential, again);
        assert_eq!(sequential, parallel);
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.pmi.to_bits(), b.pmi.to_bits());
            assert_eq!(a.score.to_bits(), b.score.to_bits());
        }
    }

    #[test]
    fn test_cap() {
        let phrases = CollocationMiner::new()
            .with_cap(1)
            .mine(&corpus(vec![folks_reckon(3), folks_reckon(3)]));
        assert_eq!(phrases.len(), 1);
    }
}
