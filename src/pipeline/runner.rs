//! Pipeline runner: the corpus orchestrator.
//!
//! [`SignaturePipeline::run`] pushes a corpus through every extractor in a
//! fixed order, notifying a [`PipelineObserver`] at each stage boundary:
//!
//! 1. Preprocess (mutate documents in place)
//! 2. Vocabulary
//! 3. Collocations
//! 4. Idioms
//! 5. Patterns
//!
//! Each extractor maps documents to partial tallies (optionally on the rayon
//! pool) and folds them in document order, so the result depends only on the
//! corpus contents and order.
//!
//! # Static dispatch
//!
//! `SignaturePipeline` is generic over its [`Preprocessor`]; the zero-sized
//! [`NoopPreprocessor`] default adds no cost.

use crate::extract::{CollocationMiner, IdiomMatcher, VocabularyExtractor};
use crate::lexicon::IdiomLexicon;
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReport, STAGE_COLLOCATIONS, STAGE_IDIOMS, STAGE_PATTERNS,
    STAGE_PREPROCESS, STAGE_VOCABULARY,
};
use crate::pipeline::spec::AnalysisConfig;
use crate::pipeline::traits::{NoopPreprocessor, Preprocessor};
use crate::result::{AnalysisResult, CorpusStats, METHOD_VERSION};
use crate::syntax::PatternAggregator;
use crate::types::Corpus;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Emit a per-stage summary event (tracing feature only).
macro_rules! trace_items {
    ($name:expr, $items:expr) => {
        #[cfg(feature = "tracing")]
        tracing::debug!(stage = $name, items = $items, "stage complete");
    };
}

// ============================================================================
// SignaturePipeline
// ============================================================================

/// The full analysis: configuration, idiom lexicon, and a preprocessor.
#[derive(Debug, Clone)]
pub struct SignaturePipeline<Pre = NoopPreprocessor> {
    pub preprocessor: Pre,
    config: AnalysisConfig,
    idioms: IdiomLexicon,
}

impl Default for SignaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl SignaturePipeline {
    /// Default configuration, built-in idiom table, no preprocessing.
    pub fn new() -> Self {
        Self {
            preprocessor: NoopPreprocessor,
            config: AnalysisConfig::default(),
            idioms: IdiomLexicon::builtin(),
        }
    }
}

impl<Pre: Preprocessor> SignaturePipeline<Pre> {
    /// Replace the configuration. Use [`AnalysisConfig::from_json`] or
    /// [`AnalysisConfig::validated`] to check it first.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_idioms(mut self, idioms: IdiomLexicon) -> Self {
        self.idioms = idioms;
        self
    }

    pub fn with_preprocessor<P: Preprocessor>(self, preprocessor: P) -> SignaturePipeline<P> {
        SignaturePipeline {
            preprocessor,
            config: self.config,
            idioms: self.idioms,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn idioms(&self) -> &IdiomLexicon {
        &self.idioms
    }

    /// Execute every stage, producing an [`AnalysisResult`].
    ///
    /// Document-count-sensitive thresholds use `corpus.len()`, so a partial
    /// corpus is analyzed as exactly what it is. Pass
    /// [`NoopObserver`](crate::pipeline::observer::NoopObserver) when stage
    /// reports are not needed.
    pub fn run(&self, mut corpus: Corpus, observer: &mut impl PipelineObserver) -> AnalysisResult {
        let cfg = &self.config;

        // Stage 0: Preprocess
        {
            trace_stage!(STAGE_PREPROCESS);
            observer.on_stage_start(STAGE_PREPROCESS);
            let clock = StageClock::start();
            for doc in corpus.documents_mut() {
                self.preprocessor.preprocess(doc, cfg);
            }
            let report = StageReport::new(clock.elapsed());
            observer.on_stage_end(STAGE_PREPROCESS, &report);
        }

        // Stage 1: Vocabulary
        let vocabulary = {
            trace_stage!(STAGE_VOCABULARY);
            observer.on_stage_start(STAGE_VOCABULARY);
            let clock = StageClock::start();
            let vocabulary = VocabularyExtractor::from_config(cfg).extract_corpus(&corpus);
            let report = StageReport::new(clock.elapsed()).with_items(vocabulary.len());
            trace_items!(STAGE_VOCABULARY, vocabulary.len());
            observer.on_stage_end(STAGE_VOCABULARY, &report);
            vocabulary
        };

        // Stage 2: Collocations
        let learning_phrases = {
            trace_stage!(STAGE_COLLOCATIONS);
            observer.on_stage_start(STAGE_COLLOCATIONS);
            let clock = StageClock::start();
            let phrases = CollocationMiner::from_config(cfg).mine(&corpus);
            let report = StageReport::new(clock.elapsed()).with_items(phrases.len());
            trace_items!(STAGE_COLLOCATIONS, phrases.len());
            observer.on_stage_end(STAGE_COLLOCATIONS, &report);
            phrases
        };

        // Stage 3: Idioms
        let signature_phrases = {
            trace_stage!(STAGE_IDIOMS);
            observer.on_stage_start(STAGE_IDIOMS);
            let clock = StageClock::start();
            let idioms = IdiomMatcher::from_config(cfg).find(&corpus, &self.idioms);
            let report = StageReport::new(clock.elapsed()).with_items(idioms.len());
            trace_items!(STAGE_IDIOMS, idioms.len());
            observer.on_stage_end(STAGE_IDIOMS, &report);
            idioms
        };

        // Stage 4: Patterns
        let pattern_phrases = {
            trace_stage!(STAGE_PATTERNS);
            observer.on_stage_start(STAGE_PATTERNS);
            let clock = StageClock::start();
            let patterns = PatternAggregator::from_config(cfg).aggregate_corpus(&corpus);
            let report = StageReport::new(clock.elapsed()).with_items(patterns.len());
            trace_items!(STAGE_PATTERNS, patterns.len());
            observer.on_stage_end(STAGE_PATTERNS, &report);
            patterns
        };

        AnalysisResult {
            vocabulary,
            learning_phrases,
            signature_phrases,
            pattern_phrases,
            corpus_stats: CorpusStats {
                doc_count: corpus.len(),
                token_count: corpus.token_count(),
                method_version: METHOD_VERSION,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::tiers::is_common;
    use crate::lexicon::LexicalTier;
    use crate::nlp::stopwords::StopwordFilter;
    use crate::pipeline::observer::{NoopObserver, StageTimings};
    use crate::pipeline::traits::StopwordPreprocessor;
    use crate::types::{AnnotatedToken, DepRel, Document, ParsedToken, PosTag};

    fn tok(text: &str, lemma: &str, pos: PosTag, is_stop: bool) -> AnnotatedToken {
        AnnotatedToken::new(text, lemma, pos, DepRel::Other, is_stop)
    }

    /// "the speaker said folks reckon it's bizarre", determiner and
    /// auxiliary already dropped by the annotator
    fn speaker_sentence() -> Vec<AnnotatedToken> {
        vec![
            tok("speaker", "speaker", PosTag::Noun, false),
            tok("said", "say", PosTag::Verb, false),
            tok("folks", "folk", PosTag::Noun, false),
            tok("reckon", "reckon", PosTag::Verb, false),
            tok("it", "it", PosTag::Pronoun, true),
            tok("bizarre", "bizarre", PosTag::Adjective, false),
        ]
    }

    /// "folks reckon things are bizarre again"
    fn things_sentence() -> Vec<AnnotatedToken> {
        vec![
            tok("folks", "folk", PosTag::Noun, false),
            tok("reckon", "reckon", PosTag::Verb, false),
            tok("things", "thing", PosTag::Noun, false),
            tok("bizarre", "bizarre", PosTag::Adjective, false),
            tok("again", "again", PosTag::Adverb, false),
        ]
    }

    fn repeat(sentence: fn() -> Vec<AnnotatedToken>, times: usize) -> Vec<AnnotatedToken> {
        (0..times).flat_map(|_| sentence()).collect()
    }

    /// "folks reckon" five times across two documents
    fn two_speech_corpus() -> Corpus {
        vec![
            Document::new("a", repeat(speaker_sentence, 3)),
            Document::new("b", repeat(things_sentence, 2)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_end_to_end_learning_phrase() {
        let result = SignaturePipeline::new().run(two_speech_corpus(), &mut NoopObserver);

        let phrase = result
            .learning_phrases
            .iter()
            .find(|p| p.phrase == "folk reckon")
            .expect("folk reckon is mined");
        assert_eq!(phrase.count, 5);
        assert_eq!(phrase.doc_freq, 2);
        assert!(phrase.pmi > 0.0);
        assert_eq!(phrase.surfaces, vec!["folks reckon"]);
        // nothing emitted is made only of common words, and the
        // single-document "speaker say" stays under the thresholds
        assert!(result
            .learning_phrases
            .iter()
            .all(|p| p.phrase.split(' ').any(|w| !is_common(w))));
        assert!(result.learning_phrases.iter().all(|p| p.phrase != "speaker say"));

        let reckon = result.vocabulary.iter().find(|v| v.lemma == "reckon").unwrap();
        assert_eq!(reckon.count, 5);
        assert_eq!(reckon.tier, LexicalTier::Rare);
        assert!(result.vocabulary.iter().all(|v| v.lemma != "say"));

        assert_eq!(result.corpus_stats.doc_count, 2);
        assert_eq!(result.corpus_stats.token_count, 28);
        assert_eq!(result.corpus_stats.method_version, "1.0");
    }

    #[test]
    fn test_empty_corpus() {
        let result = SignaturePipeline::new().run(Corpus::new(), &mut NoopObserver);
        assert!(result.is_empty());
        assert_eq!(result.corpus_stats.doc_count, 0);
        assert_eq!(result.corpus_stats.token_count, 0);
    }

    #[test]
    fn test_deterministic_with_or_without_parallelism() {
        let sequential = AnalysisConfig {
            parallel: false,
            ..AnalysisConfig::default()
        };
        let first = SignaturePipeline::new().run(two_speech_corpus(), &mut NoopObserver);
        let second = SignaturePipeline::new().run(two_speech_corpus(), &mut NoopObserver);
        let third = SignaturePipeline::new()
            .with_config(sequential)
            .run(two_speech_corpus(), &mut NoopObserver);
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_patterns_from_parsed_documents() {
        // "They think it" and "They reckon it"
        let parse = |verb: &str| {
            vec![
                ParsedToken::new("They", "they", PosTag::Pronoun, DepRel::Other, Some(1)),
                ParsedToken::new(verb, verb, PosTag::Verb, DepRel::Other, None),
                ParsedToken::new("it", "it", PosTag::Pronoun, DepRel::Dobj, Some(1)),
            ]
        };
        let corpus: Corpus = vec![
            Document::from_parsed("a", parse("think")).unwrap(),
            Document::from_parsed("b", parse("reckon")).unwrap(),
        ]
        .into_iter()
        .collect();

        let result = SignaturePipeline::new().run(corpus, &mut NoopObserver);
        let patterns: Vec<_> = result
            .pattern_phrases
            .iter()
            .map(|p| p.pattern.as_str())
            .collect();
        assert_eq!(patterns, vec!["reckon it"]);
    }

    #[test]
    fn test_custom_idioms_and_preprocessor() {
        let corpus: Corpus = vec![Document::new(
            "a",
            vec![
                tok("folks", "folk", PosTag::Noun, false),
                tok("reckon", "reckon", PosTag::Verb, false),
            ],
        )]
        .into_iter()
        .collect();

        let pipeline = SignaturePipeline::new()
            .with_idioms(IdiomLexicon::from_phrases(["folk reckon"]))
            .with_preprocessor(StopwordPreprocessor::new(StopwordFilter::from_list(&["folk"])));
        let result = pipeline.run(corpus, &mut NoopObserver);

        assert_eq!(result.signature_phrases.len(), 1);
        assert_eq!(result.signature_phrases[0].phrase, "folk reckon");
        // "folk" is now a stop word, so only "reckon" is vocabulary
        let lemmas: Vec<_> = result.vocabulary.iter().map(|v| v.lemma.as_str()).collect();
        assert_eq!(lemmas, vec!["reckon"]);
    }

    #[test]
    fn test_observer_sees_every_stage() {
        let mut timings = StageTimings::default();
        let result = SignaturePipeline::new().run(two_speech_corpus(), &mut timings);

        let stages: Vec<&str> = timings.reports.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            stages,
            vec![
                STAGE_PREPROCESS,
                STAGE_VOCABULARY,
                STAGE_COLLOCATIONS,
                STAGE_IDIOMS,
                STAGE_PATTERNS,
            ]
        );
        assert_eq!(timings.get(STAGE_PREPROCESS).unwrap().items, None);
        assert_eq!(
            timings.get(STAGE_COLLOCATIONS).unwrap().items,
            Some(result.learning_phrases.len())
        );
    }
}
