//! Last digits of a factor's multiples.

use crate::digit::{Digit, Factor};

/// Number of multiples in a sequence (`f·1` through `f·9`).
pub const LEN: usize = 9;

/// Last digits of `factor·1, factor·2, …, factor·9`.
pub fn generate(factor: Factor) -> Vec<Digit> {
    let f = u32::from(*factor);
    (1..=LEN as u32).map(|i| Digit::last_of(f * i)).collect()
}

/// Closed walk `0 → f → 2f → …` (mod 10), stopping before it returns to 0.
///
/// Always starts with [`Digit::ZERO`]; its length is `10 / gcd(f, 10)`.
pub fn cycle(factor: Factor) -> Vec<Digit> {
    let f = u32::from(*factor);
    let mut digits = vec![Digit::ZERO];
    let mut cur = Digit::last_of(f);
    while cur != Digit::ZERO {
        digits.push(cur);
        cur = Digit::last_of(u32::from(*cur) + f);
    }
    digits
}

/// Heading for a cycle, e.g. `0 → 6 → 2 → 8 → 4 → 0`.
pub fn describe_cycle(factor: Factor) -> String {
    let mut parts: Vec<String> = cycle(factor).iter().map(|d| d.to_string()).collect();
    parts.push(Digit::ZERO.to_string());
    parts.join(" → ")
}
