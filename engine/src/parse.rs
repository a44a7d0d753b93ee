use crate::error::{EngineError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Tokenize text into words for matching.
///
/// Lowercases, turns anything that isn't ASCII alphanumeric or whitespace into
/// a space, then splits on whitespace. Non-ASCII letters do not survive:
/// "Café" becomes "caf".
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// Parse a reported date, keeping only the calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `datetime-local` style
/// `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt.date());
        }
    }

    Err(EngineError::InvalidDate(text.to_string()))
}
