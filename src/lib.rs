//! # pdv-scanner
//!
//! Keystroke stream classifier for point-of-sale terminals.
//!
//! A checkout lane receives one keyboard stream shared by a barcode scanner,
//! a scale and the operator's own typing. This crate accumulates that stream
//! into lines and decides, per line, whether it is a product barcode or a
//! weight reading in kg.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals): the
//! in-progress line is a `Signal<String>` a status bar can render directly.
//!
//! ## Architecture
//!
//! ```text
//! DeviceStream → route_key (focus stamp) → keyboard registry
//!     → global keys (busy gate, Ctrl+C, Escape, F-keys)
//!     → ScanSubscription → Classifier (guard → filter → buffer → classify)
//!     → ScanHandlers / CheckoutSession
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ClassifiedToken, CharClass, EventTarget)
//! - [`config`] - Classifier configuration
//! - [`state`] - Keyboard registry, focus guard, crossterm input, global keys
//! - [`scanner`] - The classifier and its subscription handle
//! - [`device`] - Scanner, scale and test harness streams
//! - [`session`] - Checkout lane: pending weights, status line
//! - [`display`] - Weight and currency formatting

pub mod config;
pub mod device;
pub mod display;
pub mod error;
pub mod scanner;
pub mod session;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ClassifierConfig, DEFAULT_MAX_WEIGHT_KG};
pub use error::{ConfigError, DeviceError, Error, Result};

pub use scanner::{
    classify_line, inspect_line, subscribe, subscribe_shared, BufferState, Classifier,
    InputBuffer, KeyOutcome, LineNote, LineReport, ScanHandlers, ScanSubscription,
};

pub use device::{
    drain, pump, DeviceSource, DeviceStream, ScaleAdapter, ScannerAdapter, TestHarnessAdapter,
};

pub use session::{CheckoutSession, CheckoutSessionBuilder, SaleStatus, ScanEntry};

pub use display::{format_currency, format_weight};

pub use state::{
    // Focus
    blur, focus, focused_target, guard, GuardDecision,
    // Keyboard
    KeyboardEvent, KeyState, Modifiers,
    dispatch as dispatch_keyboard, reset_keyboard_state,
    // Input
    route_key, InputEvent, RawModeGuard,
};
