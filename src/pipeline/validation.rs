//! Validation engine for analysis configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against an
//! [`AnalysisConfig`](super::spec::AnalysisConfig) and collects every
//! diagnostic into a [`ValidationReport`]. It never short-circuits on the
//! first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use speech_signature::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use serde::Serialize;

use super::errors::{ConfigError, ErrorCode};
use super::spec::AnalysisConfig;

// ─── Severity ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// No errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A stateless check over an [`AnalysisConfig`].
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier (e.g. `"ngram_ranges"`).
    fn name(&self) -> &str;

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(PositiveLimitsRule));
        engine.add_rule(Box::new(NGramRangeRule));
        engine.add_rule(Box::new(StopRatioRule));
        engine.add_rule(Box::new(ThresholdsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    pub fn validate(&self, config: &AnalysisConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. only v1 is understood ───────────────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        if config.v == 1 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("config version {} is not supported", config.v),
            )
            .with_hint("Set \"v\": 1"),
        )]
    }
}

// ─── 2. output caps must be positive ────────────────────────────────────────

struct PositiveLimitsRule;

impl ValidationRule for PositiveLimitsRule {
    fn name(&self) -> &str {
        "positive_limits"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        let limits = &config.limits;
        let checks: &[(&str, usize)] = &[
            ("vocabulary", limits.vocabulary),
            ("learning_phrases", limits.learning_phrases),
            ("idioms", limits.idioms),
            ("patterns", limits.patterns),
            ("surfaces", limits.surfaces),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == 0)
            .map(|(field, _)| {
                ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::InvalidValue,
                        format!("/limits/{field}"),
                        format!("{field} must be greater than 0"),
                    )
                    .with_hint(format!("Remove {field} to use the default cap")),
                )
            })
            .collect()
    }
}

// ─── 3. n-gram ranges: 2 <= min <= max ──────────────────────────────────────

struct NGramRangeRule;

impl NGramRangeRule {
    fn check(name: &str, min: usize, max: usize) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        if min < 2 {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::InvalidRange,
                    format!("/ngrams/{name}_min"),
                    format!("{name}_min must be at least 2, got {min}"),
                )
                .with_hint("Single words are covered by the vocabulary list"),
            ));
        }
        if min > max {
            out.push(ValidationDiagnostic::error(ConfigError::new(
                ErrorCode::InvalidRange,
                format!("/ngrams/{name}_max"),
                format!("{name}_max ({max}) is smaller than {name}_min ({min})"),
            )));
        }
        out
    }
}

impl ValidationRule for NGramRangeRule {
    fn name(&self) -> &str {
        "ngram_ranges"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        let ngrams = &config.ngrams;
        let mut out = Self::check("collocation", ngrams.collocation_min, ngrams.collocation_max);
        out.extend(Self::check("idiom", ngrams.idiom_min, ngrams.idiom_max));
        out
    }
}

// ─── 4. stop ratio is a fraction ────────────────────────────────────────────

struct StopRatioRule;

impl ValidationRule for StopRatioRule {
    fn name(&self) -> &str {
        "stop_ratio"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        let ratio = config.ngrams.max_stop_ratio;
        if (0.0..=1.0).contains(&ratio) {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::InvalidRange,
                "/ngrams/max_stop_ratio",
                format!("max_stop_ratio must lie in [0, 1], got {ratio}"),
            )
            .with_hint("The default is 0.6"),
        )]
    }
}

// ─── 5. thresholds must be positive ─────────────────────────────────────────

struct ThresholdsRule;

impl ValidationRule for ThresholdsRule {
    fn name(&self) -> &str {
        "thresholds"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        let t = &config.thresholds;
        let checks: &[(&str, u32)] = &[
            ("single_doc_min_count", t.single_doc_min_count),
            ("single_doc_min_doc_freq", t.single_doc_min_doc_freq),
            ("multi_doc_min_count", t.multi_doc_min_count),
            ("multi_doc_min_doc_freq", t.multi_doc_min_doc_freq),
        ];

        checks
            .iter()
            .filter(|(_, value)| *value == 0)
            .map(|(field, _)| {
                ValidationDiagnostic::error(ConfigError::new(
                    ErrorCode::InvalidValue,
                    format!("/thresholds/{field}"),
                    format!("{field} must be at least 1"),
                ))
            })
            .collect()
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<_> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &AnalysisConfig) -> Vec<ValidationDiagnostic> {
        let strict = config.strict;
        let mut out = Self::check_unknowns("", &config.unknown_fields, strict);
        out.extend(Self::check_unknowns("/limits", &config.limits.unknown_fields, strict));
        out.extend(Self::check_unknowns("/ngrams", &config.ngrams.unknown_fields, strict));
        out.extend(Self::check_unknowns(
            "/thresholds",
            &config.thresholds.unknown_fields,
            strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
