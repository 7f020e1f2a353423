//! Normalization of arbitrary input to a JSON baseline.
//!
//! Text is parsed as JSON; any other value is re-encoded and re-parsed. When
//! decoding fails the outcome is decided in a fixed order: calendar date,
//! bare time-of-day, strict-mode diagnostic, opaque text.

use crate::datetime;
use crate::error::{failure_offset, DiagnosticError};
use crate::value::Value;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// Result of normalizing one value.
#[derive(Debug)]
pub enum Decoded {
    /// The input decoded as JSON.
    Parsed(Value),
    /// The input is a calendar date/time string.
    DateRecovered(Value),
    /// The input is a bare time-of-day, anchored at the epoch day.
    TimeRecovered(Value),
    /// Strict mode rejected a malformed input.
    Ambiguous(DiagnosticError),
    /// The input is kept as its literal text.
    Opaque(String),
}

impl Decoded {
    pub fn into_value(self) -> Result<Value, DiagnosticError> {
        match self {
            Decoded::Parsed(v) | Decoded::DateRecovered(v) | Decoded::TimeRecovered(v) => Ok(v),
            Decoded::Opaque(text) => Ok(Value::String(text)),
            Decoded::Ambiguous(err) => Err(err),
        }
    }
}

fn hash_like_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:0[xX])?[0-9a-fA-F]+(?:[-:][0-9a-fA-F]+)*$").unwrap())
}

fn exponent_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[eE]\d+$").unwrap())
}

/// Whether the text looks like a hexadecimal number, digest or UUID.
///
/// Decimal exponent notation such as `1e400` is a number, not a hash.
pub fn is_hash_like(text: &str) -> bool {
    hash_like_regex().is_match(text) && !exponent_number_regex().is_match(text)
}

/// Normalizes a value.
///
/// Only genuine text input can be reported as [`Decoded::Ambiguous`]: values
/// without a JSON encoding fall back to their literal text without a
/// diagnostic.
pub fn decode(value: &Value, strict: bool) -> Decoded {
    match value {
        Value::String(text) => match serde_json::from_str::<serde_json::Value>(text) {
            Ok(json) => {
                trace!(text = %text, "decoded text as json");
                Decoded::Parsed(Value::from(json))
            }
            Err(err) => recover(text, Some(err), strict),
        },
        other => match other.to_json() {
            Some(json) => Decoded::Parsed(Value::from(json)),
            None => recover(&other.to_text(), None, strict),
        },
    }
}

fn recover(text: &str, failure: Option<serde_json::Error>, strict: bool) -> Decoded {
    if let Some(date) = datetime::parse_date(text) {
        debug!(text = %text, "recovered calendar date");
        return Decoded::DateRecovered(Value::Date(Some(date)));
    }
    if let Some(date) = datetime::parse_time_of_day(text) {
        debug!(text = %text, "recovered time of day");
        return Decoded::TimeRecovered(Value::Date(date));
    }
    if let Some(err) = failure {
        if strict && failure_offset(text, &err) > 0 && !is_hash_like(text) {
            return Decoded::Ambiguous(DiagnosticError::new(err, text));
        }
    }
    debug!(text = %text, "keeping literal text");
    Decoded::Opaque(text.to_string())
}
