//! Scripted device for tests and demos.

use std::collections::VecDeque;
use std::time::Duration;

use super::{DeviceSource, DeviceStream};
use crate::error::DeviceError;
use crate::state::keyboard::{KeyboardEvent, Modifiers};
use crate::types::EventTarget;

/// Plays back a queue of events.
#[derive(Debug, Default)]
pub struct TestHarnessAdapter {
    queue: VecDeque<KeyboardEvent>,
    target: EventTarget,
}

impl TestHarnessAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aim subsequently queued events at `target`.
    pub fn aimed_at(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn set_target(&mut self, target: EventTarget) {
        self.target = target;
    }

    /// Queue one named key (e.g. "Escape", "F2").
    pub fn key(&mut self, key: &str) -> &mut Self {
        self.push(KeyboardEvent::new(key))
    }

    /// Queue a chord, e.g. Ctrl+C.
    pub fn chord(&mut self, key: &str, modifiers: Modifiers) -> &mut Self {
        self.push(KeyboardEvent::with_modifiers(key, modifiers))
    }

    /// Queue each character of `text` as its own key.
    pub fn type_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            self.push(KeyboardEvent::new(c.to_string()));
        }
        self
    }

    /// Queue `text` followed by Enter, the way a scanner sends a code.
    pub fn type_line(&mut self, text: &str) -> &mut Self {
        self.type_text(text).key("Enter")
    }

    pub fn push(&mut self, event: KeyboardEvent) -> &mut Self {
        self.queue.push_back(event.at(self.target));
        self
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl DeviceStream for TestHarnessAdapter {
    fn source(&self) -> DeviceSource {
        DeviceSource::TestHarness
    }

    fn next_event(&mut self, _timeout: Duration) -> Result<Option<KeyboardEvent>, DeviceError> {
        Ok(self.queue.pop_front())
    }
}
