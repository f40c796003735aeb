//! File-level complexity classification
//!
//! Maps the walker's counters to a three-level rating. The bands are fixed;
//! generated suites and coverage estimates depend on them being stable.

use crate::core::{ComplexityLevel, ComplexityMetrics};

/// Exclusive upper bounds a file must stay under to fall in a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexityBand {
    pub max_lines: usize,
    pub max_cyclomatic: u32,
    pub max_cognitive: u32,
}

impl ComplexityBand {
    fn contains(&self, cyclomatic: u32, cognitive: u32, lines: usize) -> bool {
        lines < self.max_lines && cyclomatic < self.max_cyclomatic && cognitive < self.max_cognitive
    }
}

pub const LOW_BAND: ComplexityBand = ComplexityBand {
    max_lines: 50,
    max_cyclomatic: 5,
    max_cognitive: 8,
};

pub const MEDIUM_BAND: ComplexityBand = ComplexityBand {
    max_lines: 200,
    max_cyclomatic: 15,
    max_cognitive: 25,
};

pub fn classify(cyclomatic: u32, cognitive: u32, lines: usize) -> ComplexityLevel {
    if LOW_BAND.contains(cyclomatic, cognitive, lines) {
        ComplexityLevel::Low
    } else if MEDIUM_BAND.contains(cyclomatic, cognitive, lines) {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::High
    }
}

/// Fill in `level` from the counters already present
pub fn classify_metrics(metrics: &mut ComplexityMetrics) {
    metrics.level = classify(metrics.cyclomatic, metrics.cognitive, metrics.lines);
}
