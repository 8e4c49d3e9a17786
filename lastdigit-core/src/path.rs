//! Expected connections for a sequence.

use std::collections::BTreeSet;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{digit::{Digit, Factor}, segment::Segment, sequence};

/// Whether the expected path is closed back through digit 0.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "lowercase")]
pub enum LoopPolicy {
    /// Consecutive pairs of the sequence only.
    Open,
    /// Also connect 0 to the first digit and the last digit back to 0.
    #[default]
    Closed,
}

impl std::str::FromStr for LoopPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(LoopPolicy::Open),
            "closed" => Ok(LoopPolicy::Closed),
            _ => Err(format!("expected \"open\" or \"closed\", got {:?}", s)),
        }
    }
}

/// Deduplicated segments joining consecutive digits of `sequence`.
///
/// Repeated digits (`5, 5`) produce no segment.
pub fn expected_segments(sequence: &[Digit], policy: LoopPolicy) -> BTreeSet<Segment> {
    let closing = match (policy, sequence.first(), sequence.last()) {
        (LoopPolicy::Closed, Some(first), Some(last)) => vec![(Digit::ZERO, *first), (*last, Digit::ZERO)],
        _ => vec![],
    };
    sequence
        .iter()
        .copied()
        .tuple_windows()
        .chain(closing)
        .filter_map(|(a, b)| Segment::new(a, b))
        .collect()
}

/// Segments of the closed walk `0 → f → 2f → … → 0`.
pub fn cycle_segments(factor: Factor) -> BTreeSet<Segment> {
    sequence::cycle(factor)
        .into_iter()
        .circular_tuple_windows()
        .filter_map(|(a, b)| Segment::new(a, b))
        .collect()
}
