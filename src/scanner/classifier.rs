//! Classifier - focus guard, key filter, buffer and line classification in one
//! state machine.
//!
//! The classifier never calls back into user code. A completed line comes
//! back inside the [`KeyOutcome`], already classified, with the buffer
//! cleared; [`ScanHandlers::dispatch`] delivers it. Keeping the two apart
//! lets a handler reset or drop the classifier without re-entering it.

use std::time::Instant;

use spark_signals::Signal;
use tracing::{debug, trace};

use super::buffer::{BufferState, InputBuffer};
use super::classify::{inspect_line, LineNote};
use super::filter::{filter_key, KeyAction};
use crate::config::ClassifierConfig;
use crate::error::ConfigError;
use crate::state::focus::{guard, GuardDecision};
use crate::state::keyboard::KeyboardEvent;
use crate::types::ClassifiedToken;

// =============================================================================
// OUTCOME
// =============================================================================

/// What happened to one keystroke.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// Aimed at a text-entry element; not ours.
    Ignored,
    /// Not a line key; left for page hotkeys.
    PassedThrough,
    /// Applied to the buffer. The host should suppress the key's default
    /// action. Carries the token when the key completed a line.
    Consumed(Option<ClassifiedToken>),
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }

    pub fn token(&self) -> Option<&ClassifiedToken> {
        match self {
            Self::Consumed(token) => token.as_ref(),
            _ => None,
        }
    }

    pub fn into_token(self) -> Option<ClassifiedToken> {
        match self {
            Self::Consumed(token) => token,
            _ => None,
        }
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// Output callbacks, one per token kind.
pub struct ScanHandlers {
    pub on_barcode: Box<dyn Fn(&str)>,
    pub on_weight: Box<dyn Fn(f64)>,
}

impl ScanHandlers {
    pub fn new<B, W>(on_barcode: B, on_weight: W) -> Self
    where
        B: Fn(&str) + 'static,
        W: Fn(f64) + 'static,
    {
        Self {
            on_barcode: Box::new(on_barcode),
            on_weight: Box::new(on_weight),
        }
    }

    /// Invoke exactly one callback for the token.
    pub fn dispatch(&self, token: &ClassifiedToken) {
        match token {
            ClassifiedToken::Barcode(code) => (self.on_barcode)(code),
            ClassifiedToken::Weight(kg) => (self.on_weight)(*kg),
        }
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Keystroke stream classifier session.
#[derive(Debug)]
pub struct Classifier {
    config: ClassifierConfig,
    buffer: InputBuffer,
    last_key_at: Option<Instant>,
}

impl Classifier {
    /// Create a classifier with its own display signal.
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            buffer: InputBuffer::new(),
            last_key_at: None,
        })
    }

    /// Create a classifier that echoes into an externally owned slot.
    pub fn with_display(
        config: ClassifierConfig,
        display: Signal<String>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            buffer: InputBuffer::with_display(display),
            last_key_at: None,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn state(&self) -> &BufferState {
        self.buffer.state()
    }

    /// Text typed so far on the current line.
    pub fn buffer(&self) -> &str {
        self.buffer.text()
    }

    /// Live echo of the buffer.
    pub fn display(&self) -> Signal<String> {
        self.buffer.display()
    }

    /// Feed one keystroke.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> KeyOutcome {
        self.handle_key_at(event, Instant::now())
    }

    /// Feed one keystroke observed at `now`.
    pub fn handle_key_at(&mut self, event: &KeyboardEvent, now: Instant) -> KeyOutcome {
        if guard(event) == GuardDecision::Ignore {
            return KeyOutcome::Ignored;
        }
        let Some(action) = filter_key(event, &self.config) else {
            return KeyOutcome::PassedThrough;
        };

        self.expire_stale(now);

        match action {
            KeyAction::Char(c) => {
                self.buffer.push(c);
                trace!(key = %c, buffer = self.buffer.text(), "scanner key");
                KeyOutcome::Consumed(None)
            }
            KeyAction::Edit => {
                self.buffer.pop();
                KeyOutcome::Consumed(None)
            }
            KeyAction::Terminate => {
                let token = self.buffer.take().and_then(|line| self.classify(&line));
                KeyOutcome::Consumed(token)
            }
        }
    }

    /// Force the buffer back to `Empty`.
    pub fn reset(&mut self) {
        if !self.buffer.is_empty() {
            debug!(buffer = self.buffer.text(), "scanner buffer reset");
        }
        self.buffer.clear();
        self.last_key_at = None;
    }

    fn expire_stale(&mut self, now: Instant) {
        let Some(idle_reset) = self.config.idle_reset else {
            return;
        };
        if let Some(last) = self.last_key_at {
            if now.saturating_duration_since(last) > idle_reset && !self.buffer.is_empty() {
                debug!(buffer = self.buffer.text(), "stale scanner buffer dropped");
                self.buffer.clear();
            }
        }
        self.last_key_at = Some(now);
    }

    fn classify(&self, line: &str) -> Option<ClassifiedToken> {
        let report = inspect_line(line, self.config.max_weight_kg);
        match (&report.token, report.note) {
            (None, _) => debug!("blank line discarded"),
            (Some(token), None) => debug!(?token, "line classified"),
            (Some(token), Some(LineNote::OutOfRangeWeight(value))) => {
                let max = self.config.max_weight_kg;
                debug!(?token, value, max, "weight out of range, treated as barcode")
            }
            (Some(token), Some(LineNote::MalformedLine)) => {
                debug!(?token, "unparseable separator line, treated as barcode")
            }
        }
        report.token
    }
}

// =============================================================================
// TESTS
// =============================================================================
