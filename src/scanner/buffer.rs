//! Buffer Accumulator - the in-progress line and its live echo.
//!
//! The buffer owns a `Signal<String>` that mirrors its text. Every mutation
//! writes the signal before returning, so a reader can never observe the
//! buffer one keystroke ahead of the echo.

use spark_signals::{signal, Signal};

/// Accumulator state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BufferState {
    #[default]
    Empty,
    Accumulating(String),
}

/// Characters typed since the last terminator.
pub struct InputBuffer {
    state: BufferState,
    display: Signal<String>,
}

impl InputBuffer {
    /// Create a buffer with its own display signal.
    pub fn new() -> Self {
        Self::with_display(signal(String::new()))
    }

    /// Create a buffer that writes into an externally owned display slot.
    pub fn with_display(display: Signal<String>) -> Self {
        display.set(String::new());
        Self {
            state: BufferState::Empty,
            display,
        }
    }

    pub fn state(&self) -> &BufferState {
        &self.state
    }

    /// Current text ("" when empty).
    pub fn text(&self) -> &str {
        match &self.state {
            BufferState::Empty => "",
            BufferState::Accumulating(text) => text,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state == BufferState::Empty
    }

    /// Handle to the live echo.
    pub fn display(&self) -> Signal<String> {
        self.display.clone()
    }

    /// Append one character.
    pub fn push(&mut self, c: char) {
        match &mut self.state {
            BufferState::Empty => self.state = BufferState::Accumulating(c.to_string()),
            BufferState::Accumulating(text) => text.push(c),
        }
        self.sync();
    }

    /// Drop the last character. No-op on an empty buffer.
    pub fn pop(&mut self) {
        if let BufferState::Accumulating(text) = &mut self.state {
            text.pop();
            if text.is_empty() {
                self.state = BufferState::Empty;
            }
            self.sync();
        }
    }

    /// Take the completed line, leaving the buffer empty.
    /// Returns `None` if there was nothing to take.
    pub fn take(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            BufferState::Empty => None,
            BufferState::Accumulating(text) => {
                self.sync();
                Some(text)
            }
        }
    }

    /// Force the buffer back to `Empty`.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.state = BufferState::Empty;
            self.sync();
        }
    }

    fn sync(&self) {
        self.display.set(self.text().to_string());
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputBuffer").field("state", &self.state).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_transitions() {
        let mut buffer = InputBuffer::new();
        assert_eq!(buffer.state(), &BufferState::Empty);

        buffer.push('7');
        assert_eq!(buffer.state(), &BufferState::Accumulating("7".to_string()));

        buffer.push('8');
        assert_eq!(buffer.text(), "78");
    }

    #[test]
    fn test_pop_to_empty() {
        let mut buffer = InputBuffer::new();
        buffer.push('1');
        buffer.push('2');

        buffer.pop();
        assert_eq!(buffer.state(), &BufferState::Accumulating("1".to_string()));

        buffer.pop();
        assert_eq!(buffer.state(), &BufferState::Empty);
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut buffer = InputBuffer::new();
        buffer.pop();
        buffer.pop();
        assert!(buffer.is_empty());
        assert_eq!(buffer.display().get(), "");
    }

    #[test]
    fn test_take() {
        let mut buffer = InputBuffer::new();
        assert_eq!(buffer.take(), None);

        buffer.push('a');
        buffer.push('b');
        assert_eq!(buffer.take(), Some("ab".to_string()));
        assert!(buffer.is_empty());
        assert_eq!(buffer.display().get(), "");
    }

    #[test]
    fn test_display_tracks_every_mutation() {
        let display = signal("stale".to_string());
        let mut buffer = InputBuffer::with_display(display.clone());
        assert_eq!(display.get(), "");

        buffer.push('0');
        assert_eq!(display.get(), "0");
        buffer.push(',');
        assert_eq!(display.get(), "0,");
        buffer.pop();
        assert_eq!(display.get(), "0");
        buffer.push(' ');
        assert_eq!(display.get(), "0 ");
        buffer.clear();
        assert_eq!(display.get(), "");
    }
}
