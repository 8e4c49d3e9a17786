//! Per-user interaction state.
//!
//! A [`Session`] is an immutable value. Selecting a factor or resetting the
//! canvas produces a new session; grading only reads one.

use std::collections::BTreeSet;

use log::{info, warn};

use crate::{
    canvas::CanvasInput,
    classify,
    config::BoardConfig,
    digit::{Digit, Factor},
    error::GradeError,
    grade::{self, Grade},
    layout::Layout,
    path,
    segment::Segment,
    sequence,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: BoardConfig,
    factor: Factor,
    /// Bumped on every reset; front-ends key their canvas on it.
    resets: u32,
}

impl Session {
    pub fn new(config: BoardConfig) -> Self {
        Session { config, factor: Factor::default(), resets: 0 }
    }

    pub fn with_factor(&self, factor: Factor) -> Self {
        info!("factor {} -> {}", self.factor, factor);
        Session { factor, ..self.clone() }
    }

    /// Fresh canvas, same factor.
    pub fn reset(&self) -> Self {
        info!("reset #{} (factor {})", self.resets + 1, self.factor);
        Session { resets: self.resets + 1, ..self.clone() }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn resets(&self) -> u32 {
        self.resets
    }

    pub fn layout(&self) -> Layout {
        self.config.layout()
    }

    pub fn sequence(&self) -> Vec<Digit> {
        sequence::generate(self.factor)
    }

    pub fn cycle(&self) -> Vec<Digit> {
        sequence::cycle(self.factor)
    }

    pub fn expected(&self) -> BTreeSet<Segment> {
        path::expected_segments(&self.sequence(), self.config.policy)
    }

    /// Classify a drawing and grade it against the expected segments.
    pub fn grade(&self, input: &CanvasInput) -> Result<Grade, GradeError> {
        if input.is_empty() {
            warn!("grade requested with nothing drawn");
            return Err(GradeError::NothingDrawn);
        }
        let observed = classify::classify(input, &self.layout(), self.config.proximity);
        let grade = grade::grade(&observed, &self.expected());
        info!("factor {}: {}", self.factor, grade.summary());
        Ok(grade)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(BoardConfig::default())
    }
}
