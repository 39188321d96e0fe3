//! Core types for pdv-scanner.
//!
//! These types flow between the device adapters, the keyboard router and the
//! classifier. Everything downstream of a completed line speaks `ClassifiedToken`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Classified Token
// =============================================================================

/// Result of classifying one completed input line.
///
/// Produced at most once per line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifiedToken {
    /// Product identifier, verbatim (surrounding whitespace trimmed).
    Barcode(String),
    /// Mass reading in kilograms.
    Weight(f64),
}

impl ClassifiedToken {
    pub fn is_barcode(&self) -> bool {
        matches!(self, Self::Barcode(_))
    }

    pub fn is_weight(&self) -> bool {
        matches!(self, Self::Weight(_))
    }

    /// Barcode text, if this is a barcode.
    pub fn as_barcode(&self) -> Option<&str> {
        match self {
            Self::Barcode(code) => Some(code),
            Self::Weight(_) => None,
        }
    }

    /// Weight in kg, if this is a weight.
    pub fn as_weight(&self) -> Option<f64> {
        match self {
            Self::Weight(kg) => Some(*kg),
            Self::Barcode(_) => None,
        }
    }
}

// =============================================================================
// Character Classes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Character classes a line may be built from.
    ///
    /// Combine with bitwise OR: `CharClass::DIGIT | CharClass::PERIOD`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CharClass: u8 {
        const ALPHA = 1 << 0;
        const DIGIT = 1 << 1;
        const PERIOD = 1 << 2;
        const COMMA = 1 << 3;
        const HYPHEN = 1 << 4;
        const SPACE = 1 << 5;

        /// Alphanumeric plus `.`, `,` and `-`.
        const SCANNER = Self::ALPHA.bits()
            | Self::DIGIT.bits()
            | Self::PERIOD.bits()
            | Self::COMMA.bits()
            | Self::HYPHEN.bits();
    }
}

impl Default for CharClass {
    fn default() -> Self {
        Self::SCANNER
    }
}

impl CharClass {
    /// Class of a single character, empty if it belongs to none.
    pub fn of(c: char) -> Self {
        match c {
            'a'..='z' | 'A'..='Z' => Self::ALPHA,
            '0'..='9' => Self::DIGIT,
            '.' => Self::PERIOD,
            ',' => Self::COMMA,
            '-' => Self::HYPHEN,
            ' ' => Self::SPACE,
            _ => Self::empty(),
        }
    }

    /// Whether `c` falls in one of the enabled classes.
    pub fn accepts(self, c: char) -> bool {
        let class = Self::of(c);
        !class.is_empty() && self.contains(class)
    }
}

// =============================================================================
// Event Target
// =============================================================================

/// Kind of element a keystroke was aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    /// No focused element; keys go to the page itself.
    #[default]
    Document,
    /// Single-line text input.
    Input,
    /// Multi-line text area.
    TextArea,
    /// Button, row, or other non-editing control.
    Control,
}

/// Target of a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTarget {
    pub kind: TargetKind,
    /// Element accepts free text editing regardless of its kind.
    pub content_editable: bool,
}

impl EventTarget {
    /// The page itself, nothing focused.
    pub const DOCUMENT: Self = Self {
        kind: TargetKind::Document,
        content_editable: false,
    };

    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            content_editable: false,
        }
    }

    /// Editable region of an otherwise non-input element.
    pub fn editable() -> Self {
        Self {
            kind: TargetKind::Control,
            content_editable: true,
        }
    }

    /// Whether this target accepts raw text editing.
    pub fn is_text_entry(&self) -> bool {
        self.content_editable || matches!(self.kind, TargetKind::Input | TargetKind::TextArea)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_class_default_accepts_scanner_set() {
        let classes = CharClass::default();
        for c in ['a', 'Z', '0', '9', '.', ',', '-'] {
            assert!(classes.accepts(c), "should accept {c:?}");
        }
        for c in [' ', '/', '#', 'ç', '\t'] {
            assert!(!classes.accepts(c), "should reject {c:?}");
        }
    }

    #[test]
    fn test_char_class_subset() {
        let digits_only = CharClass::DIGIT | CharClass::PERIOD;
        assert!(digits_only.accepts('7'));
        assert!(digits_only.accepts('.'));
        assert!(!digits_only.accepts('a'));
        assert!(!digits_only.accepts(','));
    }

    #[test]
    fn test_text_entry_targets() {
        assert!(EventTarget::new(TargetKind::Input).is_text_entry());
        assert!(EventTarget::new(TargetKind::TextArea).is_text_entry());
        assert!(EventTarget::editable().is_text_entry());
        assert!(!EventTarget::DOCUMENT.is_text_entry());
        assert!(!EventTarget::new(TargetKind::Control).is_text_entry());
    }

    #[test]
    fn test_token_accessors() {
        let code = ClassifiedToken::Barcode("789".to_string());
        assert!(code.is_barcode());
        assert_eq!(code.as_barcode(), Some("789"));
        assert_eq!(code.as_weight(), None);

        let weight = ClassifiedToken::Weight(0.45);
        assert!(weight.is_weight());
        assert_eq!(weight.as_weight(), Some(0.45));
        assert_eq!(weight.as_barcode(), None);
    }
}
