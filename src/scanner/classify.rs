//! Line Classifier - barcode or weight?
//!
//! Scales send decimal readings ("0.450", "1,240 kg"); scanners send digit or
//! alphanumeric codes ("7891000315517"). A line is a weight only when it has a
//! decimal separator and parses to a plausible positive number of kg below the
//! configured bound. Everything else is a barcode, passed through verbatim.
//!
//! Classification is total: it never fails, and ambiguous lines fall back to
//! `Barcode`. [`inspect_line`] reports when that fallback fired.

use crate::types::ClassifiedToken;

/// Why a line with a separator still ended up as a barcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineNote {
    /// Looked numeric but outside `(0, max_weight_kg)`.
    OutOfRangeWeight(f64),
    /// Had a separator but no number could be read from it.
    MalformedLine,
}

/// Classification plus the diagnostic, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LineReport {
    /// `None` when the line was blank.
    pub token: Option<ClassifiedToken>,
    pub note: Option<LineNote>,
}

/// Strip letters and whitespace, then turn the comma separator into a period.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !c.is_ascii_alphabetic() && !c.is_whitespace())
        .collect();
    stripped.replacen(',', ".", 1)
}

/// Parse the longest numeric prefix (`[+-]digits[.digits]`).
///
/// Trailing garbage is ignored, so "1.5-2" reads as 1.5. Returns `None` if
/// the prefix holds no digit at all.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut digits = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            digits += 1;
        }
    }

    if digits == 0 {
        return None;
    }
    text[..end].parse().ok()
}

/// Classify a completed line, with a note when the barcode fallback fired.
pub fn inspect_line(text: &str, max_weight_kg: f64) -> LineReport {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return LineReport {
            token: None,
            note: None,
        };
    }

    let has_separator = text.contains(['.', ',']);
    if !has_separator {
        return LineReport {
            token: Some(ClassifiedToken::Barcode(trimmed.to_string())),
            note: None,
        };
    }

    let note = match parse_leading_float(&normalize(text)) {
        Some(kg) if kg > 0.0 && kg < max_weight_kg => {
            return LineReport {
                token: Some(ClassifiedToken::Weight(kg)),
                note: None,
            };
        }
        Some(value) => LineNote::OutOfRangeWeight(value),
        None => LineNote::MalformedLine,
    };

    LineReport {
        token: Some(ClassifiedToken::Barcode(trimmed.to_string())),
        note: Some(note),
    }
}

/// Classify a completed line. `None` for blank lines.
pub fn classify_line(text: &str, max_weight_kg: f64) -> Option<ClassifiedToken> {
    inspect_line(text, max_weight_kg).token
}

// =============================================================================
// TESTS
// =============================================================================
