//! Key Filter - narrows raw keystrokes down to the ones a line is built from.
//!
//! Anything not listed here passes through untouched so page-level hotkeys
//! (function keys, arrows, Ctrl chords) keep working.

use crate::config::ClassifierConfig;
use crate::state::keyboard::KeyboardEvent;

/// What an accepted keystroke does to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Complete the current line.
    Terminate,
    /// Delete the last character.
    Edit,
    /// Append a character.
    Char(char),
}

/// Accept or reject a keystroke. `None` means pass through.
pub fn filter_key(event: &KeyboardEvent, config: &ClassifierConfig) -> Option<KeyAction> {
    if !event.is_press() {
        return None;
    }
    if config.is_terminator(&event.key) {
        return Some(KeyAction::Terminate);
    }
    if config.is_edit(&event.key) {
        return Some(KeyAction::Edit);
    }
    // Ctrl+C and friends belong to the page
    if event.modifiers.has_command() {
        return None;
    }
    event
        .as_char()
        .filter(|c| config.accepted_chars.accepts(*c))
        .map(KeyAction::Char)
}
