//! Terminal keyboard wedge. Barcode scanners in HID mode type into the
//! terminal like a very fast human, so this also carries manual typing.

use std::time::Duration;

use super::{DeviceSource, DeviceStream};
use crate::error::DeviceError;
use crate::state::input::{poll_event, InputEvent, RawModeGuard};
use crate::state::keyboard::KeyboardEvent;

/// Reads key events from the controlling terminal. Holds raw mode while alive.
pub struct ScannerAdapter {
    _raw_mode: RawModeGuard,
}

impl ScannerAdapter {
    pub fn open() -> Result<Self, DeviceError> {
        let raw_mode = RawModeGuard::acquire().map_err(|err| DeviceError::read("terminal", err))?;
        Ok(Self { _raw_mode: raw_mode })
    }
}

impl DeviceStream for ScannerAdapter {
    fn source(&self) -> DeviceSource {
        DeviceSource::Scanner
    }

    fn next_event(&mut self, timeout: Duration) -> Result<Option<KeyboardEvent>, DeviceError> {
        match poll_event(timeout).map_err(|err| DeviceError::read("terminal", err))? {
            Some(InputEvent::Key(event)) => Ok(Some(event)),
            Some(InputEvent::None) | None => Ok(None),
        }
    }
}
