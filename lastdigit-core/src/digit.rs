//! Bounded integer newtypes: [`Digit`] (a point on the circle) and
//! [`Factor`] (the selected multiplication table).

use std::fmt;

use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};

use crate::error::{DigitError, FactorError};

/// A last digit, `0..=9`.
#[derive(Debug, Display, Deref, Into, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Number of digits on the circle.
    pub const COUNT: usize = 10;

    pub const ZERO: Digit = Digit(0);

    pub const ALL: [Digit; Digit::COUNT] = [
        Digit(0), Digit(1), Digit(2), Digit(3), Digit(4),
        Digit(5), Digit(6), Digit(7), Digit(8), Digit(9),
    ];

    /// Last digit of an arbitrary non-negative integer.
    pub fn last_of(n: u32) -> Digit {
        // `n % 10` always fits
        Digit((n % 10) as u8)
    }

    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Digit {
    type Error = DigitError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if v <= 9 {
            Ok(Digit(v))
        } else {
            Err(DigitError::OutOfRange(v))
        }
    }
}

/// A multiplication factor, `1..=9`.
///
/// Values outside the range are rejected at construction rather than
/// clamped, so every `Factor` in circulation is valid.
#[derive(Debug, Display, Deref, Into, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Factor(u8);

impl Factor {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn all() -> impl Iterator<Item = Factor> {
        (Self::MIN..=Self::MAX).map(Factor)
    }
}

impl Default for Factor {
    fn default() -> Self {
        Factor(6)
    }
}

impl TryFrom<u8> for Factor {
    type Error = FactorError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&v) {
            Ok(Factor(v))
        } else {
            Err(FactorError::OutOfRange(v))
        }
    }
}

impl std::str::FromStr for Factor {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v: u8 = s.trim().parse().map_err(|e| format!("{}: {:?}", e, s))?;
        Factor::try_from(v).map_err(|e| e.to_string())
    }
}

/// Comma-separated digits, `[6, 2, 8]`.
pub struct Digits<'a>(pub &'a [Digit]);

impl fmt::Display for Digits<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, d) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}
