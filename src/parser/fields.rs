//! Field Extractor
//!
//! Pulls letter-prefixed numeric words (`X10.5`, `F120`, ...) out of a
//! tokenized line. The first token carrying a letter wins; later duplicates
//! are ignored.

use std::fmt;

/// A line that could not be interpreted
#[derive(Debug, Clone, PartialEq)]
pub enum LineError {
    /// A word whose numeric part does not parse, e.g. `XABC` or `F`
    MalformedField { letter: char, token: String },
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineError::MalformedField { letter, token } => {
                write!(f, "Malformed '{}' field '{}'", letter, token)
            }
        }
    }
}

impl std::error::Error for LineError {}

/// Find the first token starting with `letter` and parse the rest as a number
///
/// Returns `Ok(None)` when no token carries the letter. Non-finite values
/// (`INF`, `NAN`) are rejected like any other malformed number.
pub fn extract_field(tokens: &[String], letter: char) -> Result<Option<f64>, LineError> {
    let Some(token) = tokens.iter().find(|t| t.starts_with(letter)) else {
        return Ok(None);
    };

    let suffix = &token[letter.len_utf8()..];
    match suffix.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(LineError::MalformedField {
            letter,
            token: token.clone(),
        }),
    }
}

/// Positional and feed words of a motion line
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionFields {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub f: Option<f64>,
    pub i: Option<f64>,
    pub j: Option<f64>,
}

impl MotionFields {
    /// Extract every word a motion line may carry
    pub fn extract(tokens: &[String]) -> Result<Self, LineError> {
        Ok(Self {
            x: extract_field(tokens, 'X')?,
            y: extract_field(tokens, 'Y')?,
            z: extract_field(tokens, 'Z')?,
            f: extract_field(tokens, 'F')?,
            i: extract_field(tokens, 'I')?,
            j: extract_field(tokens, 'J')?,
        })
    }

    /// Arc center offset, only when both I and J are present
    pub fn center_offset(&self) -> Option<(f64, f64)> {
        Some((self.i?, self.j?))
    }
}
