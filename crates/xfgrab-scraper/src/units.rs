//! Shorthand filesize codec: "103KiB" ⇄ 105472.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::UnitsError;

/// Unit tokens with their byte multipliers, smallest first. Formatting scans
/// the table in reverse so the largest fitting unit wins and decimal units
/// take precedence over their binary siblings.
const UNITS: [(&str, u64); 8] = [
    ("KiB", 1 << 10),
    ("KB", 1_000),
    ("MiB", 1 << 20),
    ("MB", 1_000_000),
    ("GiB", 1 << 30),
    ("GB", 1_000_000_000),
    ("TiB", 1 << 40),
    ("TB", 1_000_000_000_000),
];

/// Parses human shorthand like "103KiB" or "0.5TB" into an exact byte count.
///
/// Unit matching is case-insensitive. The magnitude may be fractional; the
/// result never is (truncated, not rounded).
pub fn parse_shorthand(text: &str) -> Result<u64, UnitsError> {
    let lower = text.to_lowercase();
    for (token, multiplier) in UNITS {
        let token = token.to_lowercase();
        if !lower.contains(&token) {
            continue;
        }
        let magnitude: f64 = lower
            .replace(&token, "")
            .trim()
            .parse()
            .map_err(|_| UnitsError::InvalidMagnitude(text.to_string()))?;
        return Ok((magnitude * multiplier as f64) as u64);
    }
    Err(UnitsError::InvalidFormat(text.to_string()))
}

/// Formats a byte count as shorthand, e.g. 110595407872 → "110.6GB".
///
/// Counts smaller than every multiplier come back as a plain byte count.
pub fn format_bytes(count: u64) -> String {
    for (token, multiplier) in UNITS.iter().rev() {
        if count >= *multiplier {
            let scaled = (count as f64 / *multiplier as f64 * 100.0).round() / 100.0;
            return format!("{}{token}", trim_decimal(scaled));
        }
    }
    format!("{count}B")
}

// Two decimals with trailing zeros trimmed, keeping at least one decimal
// digit: 500.00 → "500.0", 110.60 → "110.6", 105.47 stays.
fn trim_decimal(value: f64) -> String {
    let mut text = format!("{value:.2}");
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

/// An exact byte count that parses from and displays as shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub u64);

impl FromStr for ByteSize {
    type Err = UnitsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse_shorthand(text).map(ByteSize)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bytes(self.0))
    }
}

impl Serialize for ByteSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_bytes(self.0))
    }
}

impl<'de> Deserialize<'de> for ByteSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
