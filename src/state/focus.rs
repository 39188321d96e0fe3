//! Focus System - Focused target state and the scanner focus guard
//!
//! Tracks which kind of element currently has focus so the keyboard router
//! can stamp it on every event, and decides whether a keystroke belongs to
//! the scanner/scale stream or to a focused text control.
//!
//! # Example
//!
//! ```ignore
//! use pdv_scanner::state::focus;
//! use pdv_scanner::types::{EventTarget, TargetKind};
//!
//! // Customer search box opened: keys belong to it now
//! focus::focus(EventTarget::new(TargetKind::Input));
//!
//! // Closed again
//! focus::blur();
//! ```

use spark_signals::{signal, Signal};

use super::keyboard::KeyboardEvent;
use crate::types::EventTarget;

// =============================================================================
// FOCUSED TARGET SIGNAL
// =============================================================================

thread_local! {
    static FOCUSED_TARGET: Signal<EventTarget> = signal(EventTarget::DOCUMENT);
}

/// Get the currently focused target (the document if nothing is focused)
pub fn focused_target() -> EventTarget {
    FOCUSED_TARGET.with(|s| s.get())
}

/// Check if a text-entry element is focused
pub fn is_text_entry_focused() -> bool {
    focused_target().is_text_entry()
}

/// Move focus to a target
pub fn focus(target: EventTarget) {
    FOCUSED_TARGET.with(|s| s.set(target));
}

/// Drop focus back to the document
pub fn blur() {
    focus(EventTarget::DOCUMENT);
}

// =============================================================================
// FOCUS GUARD
// =============================================================================

/// Whether a keystroke belongs to the scanner stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Target edits text itself; leave the key alone.
    Ignore,
    /// Key is part of the global scanner/scale stream.
    Consume,
}

/// Decide ownership of a keystroke from its target.
///
/// Must run before any other scanner logic.
pub fn guard(event: &KeyboardEvent) -> GuardDecision {
    if event.target.is_text_entry() {
        GuardDecision::Ignore
    } else {
        GuardDecision::Consume
    }
}

/// Reset focus state (for testing)
pub fn reset_focus_state() {
    blur();
}

// =============================================================================
// TESTS
// =============================================================================
