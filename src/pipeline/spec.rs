//! Analysis configuration.
//!
//! An [`AnalysisConfig`] carries the output caps, n-gram ranges, and
//! frequency thresholds the extractors use. Every field defaults to the
//! standard method constants, so `{ "v": 1 }` is a complete configuration.
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "limits": { "vocabulary": 1000, "learning_phrases": 1000, "idioms": 500,
//!               "patterns": 1000, "surfaces": 30 },
//!   "ngrams": { "collocation_min": 2, "collocation_max": 5,
//!               "idiom_min": 2, "idiom_max": 7, "max_stop_ratio": 0.6 },
//!   "thresholds": { "single_doc_min_count": 2, "single_doc_min_doc_freq": 1,
//!                   "multi_doc_min_count": 5, "multi_doc_min_doc_freq": 2 },
//!   "parallel": true,
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::validation::ValidationEngine;
use crate::error::AnalyzeError;

/// Top-level analysis configuration (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Config version (currently `1`).
    #[serde(default = "default_version")]
    pub v: u32,

    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub ngrams: NGramSpec,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Run per-document extraction on the rayon pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_version() -> u32 {
    1
}

fn default_parallel() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            v: default_version(),
            limits: Limits::default(),
            ngrams: NGramSpec::default(),
            thresholds: Thresholds::default(),
            parallel: default_parallel(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// Warnings are logged; any error-severity diagnostic fails the parse.
    pub fn from_json(json: &str) -> Result<Self, AnalyzeError> {
        let config: AnalysisConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Run the default validation rules, failing on errors.
    pub fn validated(self) -> Result<Self, AnalyzeError> {
        let report = ValidationEngine::with_defaults().validate(&self);

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!(path = %warning.path, "{}", warning.message);
        }

        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(AnalyzeError::InvalidConfig(messages.join("; ")));
        }
        Ok(self)
    }
}

/// Output caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub vocabulary: usize,
    pub learning_phrases: usize,
    pub idioms: usize,
    pub patterns: usize,
    /// Surface forms kept per entry.
    pub surfaces: usize,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            vocabulary: 1000,
            learning_phrases: 1000,
            idioms: 500,
            patterns: 1000,
            surfaces: 30,
            unknown_fields: HashMap::new(),
        }
    }
}

/// N-gram window lengths (inclusive) and the stop-word filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NGramSpec {
    pub collocation_min: usize,
    pub collocation_max: usize,
    pub idiom_min: usize,
    pub idiom_max: usize,
    /// Windows whose stop-word share exceeds this are skipped.
    pub max_stop_ratio: f64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for NGramSpec {
    fn default() -> Self {
        Self {
            collocation_min: 2,
            collocation_max: 5,
            idiom_min: 2,
            idiom_max: 7,
            max_stop_ratio: 0.6,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Collocation frequency thresholds, relaxed for single-document corpora.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub single_doc_min_count: u32,
    pub single_doc_min_doc_freq: u32,
    pub multi_doc_min_count: u32,
    pub multi_doc_min_doc_freq: u32,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            single_doc_min_count: 2,
            single_doc_min_doc_freq: 1,
            multi_doc_min_count: 5,
            multi_doc_min_doc_freq: 2,
            unknown_fields: HashMap::new(),
        }
    }
}

impl Thresholds {
    /// `(min_count, min_doc_freq)` for a corpus of `doc_count` documents.
    pub fn for_corpus(&self, doc_count: usize) -> (u32, u32) {
        if doc_count <= 1 {
            (self.single_doc_min_count, self.single_doc_min_doc_freq)
        } else {
            (self.multi_doc_min_count, self.multi_doc_min_doc_freq)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: AnalysisConfig = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(config.limits.vocabulary, 1000);
        assert_eq!(config.limits.idioms, 500);
        assert_eq!(config.ngrams.collocation_max, 5);
        assert_eq!(config.ngrams.idiom_max, 7);
        assert!(config.parallel);
        assert!(!config.strict);
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let json = r#"{
            "v": 1,
            "limits": { "idioms": 50 },
            "thresholds": { "multi_doc_min_count": 3 },
            "parallel": false
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.limits.idioms, 50);
        assert_eq!(config.limits.patterns, 1000);
        assert_eq!(config.thresholds.multi_doc_min_count, 3);
        assert_eq!(config.thresholds.multi_doc_min_doc_freq, 2);
        assert!(!config.parallel);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{ "v": 1, "bogus": 1, "ngrams": { "trigram_only": true } }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert!(config.unknown_fields.contains_key("bogus"));
        assert!(config.ngrams.unknown_fields.contains_key("trigram_only"));
    }

    #[test]
    fn test_thresholds_follow_actual_doc_count() {
        let t = Thresholds::default();
        assert_eq!(t.for_corpus(0), (2, 1));
        assert_eq!(t.for_corpus(1), (2, 1));
        assert_eq!(t.for_corpus(2), (5, 2));
        assert_eq!(t.for_corpus(40), (5, 2));
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(AnalysisConfig::from_json(r#"{ "v": 1 }"#).is_ok());
        let err = AnalysisConfig::from_json(r#"{ "v": 1, "limits": { "vocabulary": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidConfig(_)));
        assert!(matches!(
            AnalysisConfig::from_json("[1, 2]"),
            Err(AnalyzeError::Json(_))
        ));
    }
}
