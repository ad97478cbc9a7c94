//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic.

use std::time::{Duration, Instant};

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_VOCABULARY: &str = "vocabulary";
pub const STAGE_COLLOCATIONS: &str = "collocations";
pub const STAGE_IDIOMS: &str = "idioms";
pub const STAGE_PATTERNS: &str = "patterns";

/// Wall-clock timer for one stage
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Entries the stage emitted, when it emits a list
    pub items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }
}

/// Stage-boundary callbacks; both default to doing nothing
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Collects every stage report in order
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub reports: Vec<(&'static str, StageReport)>,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed).sum()
    }

    pub fn get(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }
}

impl PipelineObserver for StageTimings {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, *report));
    }
}
