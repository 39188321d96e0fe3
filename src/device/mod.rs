//! Device Module - keystroke sources
//!
//! Every peripheral is a [`DeviceStream`] yielding keyboard events. The
//! classifier never sees which one a key came from; the router only needs
//! `pump`/`drain` to move events from a stream into the keyboard registry.
//!
//! - [`ScannerAdapter`] - terminal keyboard wedge (scanner and human typing)
//! - [`ScaleAdapter`] - line-oriented byte source, e.g. a serial scale
//! - [`TestHarnessAdapter`] - scripted events for tests and demos

mod harness;
mod scale;
mod scanner;

pub use harness::TestHarnessAdapter;
pub use scale::ScaleAdapter;
pub use scanner::ScannerAdapter;

use std::time::Duration;

use tracing::warn;

use crate::error::DeviceError;
use crate::state::input::route_key;
use crate::state::keyboard::KeyboardEvent;

/// Which kind of peripheral a stream reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSource {
    Scanner,
    Scale,
    TestHarness,
}

/// A source of keyboard events.
pub trait DeviceStream {
    fn source(&self) -> DeviceSource;

    /// Next event, waiting at most `timeout` where the source supports it.
    /// `Ok(None)` means nothing arrived (or the stream is exhausted).
    fn next_event(&mut self, timeout: Duration) -> Result<Option<KeyboardEvent>, DeviceError>;
}

/// Move one event from the stream into the keyboard router.
///
/// Returns `Some(consumed)` if an event was routed, `None` if none arrived.
pub fn pump(stream: &mut dyn DeviceStream, timeout: Duration) -> Result<Option<bool>, DeviceError> {
    match stream.next_event(timeout) {
        Ok(Some(event)) => Ok(Some(route_key(event))),
        Ok(None) => Ok(None),
        Err(err) => {
            warn!(source = ?stream.source(), %err, "device read failed");
            Err(err)
        }
    }
}

/// Route events until the stream goes quiet. Returns how many were routed.
pub fn drain(stream: &mut dyn DeviceStream, timeout: Duration) -> Result<usize, DeviceError> {
    let mut routed = 0;
    while pump(stream, timeout)?.is_some() {
        routed += 1;
    }
    Ok(routed)
}
