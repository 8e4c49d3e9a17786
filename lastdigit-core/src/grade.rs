//! Compare observed segments with the expected ones.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::segment::Segment;

/// Outcome of grading one drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    /// Observed segments that are expected.
    pub correct: BTreeSet<Segment>,
    /// Observed segments that are not.
    pub incorrect: BTreeSet<Segment>,
    /// Expected segments the drawing left out.
    pub missing: BTreeSet<Segment>,
    pub expected_count: usize,
}

pub fn grade(observed: &BTreeSet<Segment>, expected: &BTreeSet<Segment>) -> Grade {
    Grade {
        correct: observed.intersection(expected).copied().collect(),
        incorrect: observed.difference(expected).copied().collect(),
        missing: expected.difference(observed).copied().collect(),
        expected_count: expected.len(),
    }
}

impl Grade {
    pub fn correct_count(&self) -> usize {
        self.correct.len()
    }

    /// Fraction of expected segments drawn; 0 when nothing is expected.
    pub fn score(&self) -> f64 {
        if self.expected_count == 0 {
            0.
        } else {
            self.correct_count() as f64 / self.expected_count as f64
        }
    }

    pub fn is_perfect(&self) -> bool {
        self.incorrect.is_empty() && self.missing.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("{}/{} segments correct", self.correct_count(), self.expected_count)
    }

    pub fn report(&self) -> Report {
        Report {
            correct: self.correct_count(),
            expected: self.expected_count,
            score: self.score(),
            summary: self.summary(),
            correct_segments: self.correct.iter().copied().collect(),
            incorrect_segments: self.incorrect.iter().copied().collect(),
            missing_segments: self.missing.iter().copied().collect(),
        }
    }
}

/// Serializable form of a [`Grade`], for front-ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub correct: usize,
    pub expected: usize,
    pub score: f64,
    pub summary: String,
    #[tsify(type = "[number, number][]")]
    pub correct_segments: Vec<Segment>,
    #[tsify(type = "[number, number][]")]
    pub incorrect_segments: Vec<Segment>,
    #[tsify(type = "[number, number][]")]
    pub missing_segments: Vec<Segment>,
}
