use std::fmt::{Display, Formatter, self};

use serde::{Deserialize, Serialize};

use crate::{digit::Digit, error::SegmentError};

/// Unordered connection between two distinct digits, stored sorted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Segment {
    lo: Digit,
    hi: Digit,
}

impl Segment {
    /// `None` when `a == b`; a digit is never connected to itself.
    pub fn new(a: Digit, b: Digit) -> Option<Segment> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Segment { lo: a, hi: b }),
            std::cmp::Ordering::Greater => Some(Segment { lo: b, hi: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
    pub fn lo(&self) -> Digit {
        self.lo
    }
    pub fn hi(&self) -> Digit {
        self.hi
    }
    pub fn contains(&self, d: Digit) -> bool {
        self.lo == d || self.hi == d
    }
}

impl TryFrom<(u8, u8)> for Segment {
    type Error = SegmentError;
    fn try_from((a, b): (u8, u8)) -> Result<Self, Self::Error> {
        let a = Digit::try_from(a)?;
        let b = Digit::try_from(b)?;
        Segment::new(a, b).ok_or(SegmentError::SelfLoop(*a))
    }
}

impl From<Segment> for (u8, u8) {
    fn from(s: Segment) -> Self {
        (*s.lo, *s.hi)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigitError;

    fn d(v: u8) -> Digit {
        Digit::try_from(v).unwrap()
    }

    #[test]
    fn unordered() {
        assert_eq!(Segment::new(d(6), d(2)), Segment::new(d(2), d(6)));
        let s = Segment::new(d(8), d(3)).unwrap();
        assert_eq!((s.lo(), s.hi()), (d(3), d(8)));
        assert!(s.contains(d(8)) && !s.contains(d(4)));
        assert_eq!(s.to_string(), "(3, 8)");
    }

    #[test]
    fn no_self_loops() {
        assert_eq!(Segment::new(d(4), d(4)), None);
        assert_eq!(Segment::try_from((4, 4)), Err(SegmentError::SelfLoop(4)));
        assert_eq!(Segment::try_from((4, 11)), Err(SegmentError::Digit(DigitError::OutOfRange(11))));
    }

    #[test]
    fn serde_pair() {
        let s = Segment::new(d(9), d(1)).unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "[1,9]");
        let parsed: Segment = serde_json::from_str("[9,1]").unwrap();
        assert_eq!(parsed, s);
        assert!(serde_json::from_str::<Segment>("[2,2]").is_err());
    }
}
