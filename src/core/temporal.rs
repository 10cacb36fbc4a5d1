//! Permissive ISO-8601 timestamp parsing.
//!
//! Metadata timestamps arrive in several ISO-8601 variants depending on which
//! tool produced the contract. Absence of a parseable format is a normal,
//! reportable outcome, never an error.

use chrono::{DateTime, NaiveDateTime, Utc};

// Offset-carrying patterns, most specific first.
const OFFSET_PATTERNS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%:z"];

// Naive patterns; a literal `Z` suffix or no offset at all means UTC.
const NAIVE_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Attempt each supported pattern in order of decreasing specificity and
/// return the first successful parse as a UTC instant.
///
/// Returns `None` when the input is empty or matches no pattern.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for pattern in OFFSET_PATTERNS {
        if let Ok(parsed) = DateTime::parse_from_str(trimmed, pattern) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for pattern in NAIVE_PATTERNS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return Some(parsed.and_utc());
        }
    }

    None
}
