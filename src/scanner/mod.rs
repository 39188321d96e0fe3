//! Scanner Module - keystroke stream classifier
//!
//! Turns a keyboard stream shared by a barcode scanner, a scale and a human
//! into classified lines:
//!
//! - **filter** - which keys build a line
//! - **buffer** - the in-progress line and its live echo
//! - **classify** - barcode vs weight for a completed line
//! - **classifier** - the state machine tying them together
//! - **subscription** - owned registration with the keyboard router

mod buffer;
mod classifier;
mod classify;
mod filter;
mod subscription;

pub use buffer::{BufferState, InputBuffer};
pub use classifier::{Classifier, KeyOutcome, ScanHandlers};
pub use classify::{
    classify_line, inspect_line, normalize, parse_leading_float, LineNote, LineReport,
};
pub use filter::{filter_key, KeyAction};
pub use subscription::{subscribe, subscribe_shared, ScanSubscription};
