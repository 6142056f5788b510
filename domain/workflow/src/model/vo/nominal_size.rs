use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Nominal pipe or hole size in thousandths of an inch.
///
/// Fixed-point so that sizes compare and hash exactly: `9.625` and `9 5/8`
/// are the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NominalSize(i64);

/// A whole or decimal number, optionally followed by a fraction: `12 1/4`,
/// `9.625`, `8`.
static SIZE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)(?:\s+(\d+)\s*/\s*(\d+))?").unwrap());

impl NominalSize {
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Self(thousandths)
    }

    pub fn thousandths(&self) -> i64 {
        self.0
    }

    /// Extract the first size found in `text`. Supports whole numbers,
    /// decimals and mixed fractions, so hole-section names like
    /// `12 1/4" Intermediate` parse to 12.25.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = SIZE_PATTERN.captures(text)?;
        let whole: f64 = caps.get(1)?.as_str().parse().ok()?;
        let mut thousandths = (whole * 1000.0).round() as i64;
        if let (Some(numerator), Some(denominator)) = (caps.get(2), caps.get(3)) {
            let numerator: i64 = numerator.as_str().parse().ok()?;
            let denominator: i64 = denominator.as_str().parse().ok()?;
            if denominator == 0 {
                return None;
            }
            thousandths += (numerator * 1000 + denominator / 2) / denominator;
        }
        Some(Self(thousandths))
    }
}

impl fmt::Display for NominalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let fraction = (self.0 % 1000).abs();
        if fraction == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{fraction:03}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_fractions() {
        assert_eq!(NominalSize::parse("12 1/4"), Some(NominalSize::from_thousandths(12_250)));
        assert_eq!(
            NominalSize::parse("8 1/2\" Intermediate"),
            Some(NominalSize::from_thousandths(8_500))
        );
        assert_eq!(NominalSize::parse("9 5/8"), Some(NominalSize::from_thousandths(9_625)));
    }

    #[test]
    fn parses_decimals_and_whole_numbers() {
        assert_eq!(NominalSize::parse("9.625"), Some(NominalSize::from_thousandths(9_625)));
        assert_eq!(NominalSize::parse("26"), Some(NominalSize::from_thousandths(26_000)));
    }

    #[test]
    fn rejects_text_without_a_size() {
        assert_eq!(NominalSize::parse("TBD"), None);
        assert_eq!(NominalSize::parse("12 1/0"), None);
    }

    #[test]
    fn displays_trimmed_decimals() {
        assert_eq!(NominalSize::from_thousandths(12_250).to_string(), "12.25");
        assert_eq!(NominalSize::from_thousandths(9_625).to_string(), "9.625");
        assert_eq!(NominalSize::from_thousandths(2_000).to_string(), "2");
    }
}
