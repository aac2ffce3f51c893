//! Cached distance records and display-text parsing.
//!
//! The provider's human-readable distance (e.g. `"12.3 mi"`, `"19.8 km"`,
//! `"850 ft"`) is what gets persisted. Every consumer reduces it to a number
//! of miles through [`parse_distance_miles`], so cache hits and fresh fetches
//! go through exactly the same path.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Upper bound on a usable distance, a little over the Earth's circumference.
/// Larger values are treated as corrupt text rather than priced.
pub const MAX_DISTANCE_MILES: i64 = 25_000;

/// A cached origin→destination lookup. The pair is directional: the reverse
/// trip is a separate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceRecord {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    /// Display text exactly as the provider (or client) reported it.
    pub distance_text: String,
    pub created_at: DateTime<Utc>,
}

impl DistanceRecord {
    /// Numeric distance in miles parsed from [`Self::distance_text`].
    #[must_use]
    pub fn distance_miles(&self) -> Option<Decimal> {
        parse_distance_miles(&self.distance_text)
    }
}

/// Unit suffixes recognised in distance display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Miles,
    Kilometers,
    Feet,
    Meters,
}

impl DistanceUnit {
    /// Identify the unit from a trailing word such as `"mi"` or `"km"`.
    ///
    /// Returns `None` for anything unrecognised.
    #[must_use]
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix.to_ascii_lowercase().as_str() {
            "mi" | "mile" | "miles" => Some(Self::Miles),
            "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Some(Self::Kilometers)
            }
            "ft" | "foot" | "feet" => Some(Self::Feet),
            "m" | "meter" | "meters" | "metre" | "metres" => Some(Self::Meters),
            _ => None,
        }
    }

    /// Convert `value` expressed in this unit to miles.
    #[must_use]
    pub fn to_miles(self, value: Decimal) -> Option<Decimal> {
        match self {
            Self::Miles => Some(value),
            // 1 mi = 1.609344 km = 5280 ft = 1609.344 m, all exact.
            Self::Kilometers => value.checked_div(Decimal::new(1_609_344, 6)),
            Self::Feet => value.checked_div(Decimal::new(5280, 0)),
            Self::Meters => value.checked_div(Decimal::new(1_609_344, 3)),
        }
    }
}

/// Reduce display text to a distance in miles.
///
/// The magnitude is everything left after removing all characters other than
/// ASCII digits and `.`, so `"1,204 mi"` reads as `1204`. The unit is taken
/// from the trailing word; text without a recognised unit is assumed to be
/// in miles already.
///
/// Returns `None` when no number can be recovered, when the number is
/// signed negative (`"-5 mi"`), or when it exceeds [`MAX_DISTANCE_MILES`].
#[must_use]
pub fn parse_distance_miles(text: &str) -> Option<Decimal> {
    let first_digit = text.find(|c: char| c.is_ascii_digit() || c == '.')?;
    if text[..first_digit].trim_end().ends_with('-') {
        return None;
    }

    let magnitude: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let value = Decimal::from_str(&magnitude).ok()?;

    let unit = trailing_word(text)
        .and_then(DistanceUnit::from_suffix)
        .unwrap_or(DistanceUnit::Miles);

    unit.to_miles(value)
        .filter(|miles| *miles <= Decimal::from(MAX_DISTANCE_MILES))
}

/// The run of ASCII letters at the end of `text`, ignoring trailing whitespace.
fn trailing_word(text: &str) -> Option<&str> {
    let trimmed = text.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i)?;
    trimmed.get(start..)
}
