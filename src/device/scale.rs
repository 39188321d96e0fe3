//! Line-oriented scale reader.
//!
//! Checkout scales stream readings such as `"0.450kg\r\n"`, sometimes framed
//! by STX/ETX control bytes. Each printable byte becomes a key, CR or LF
//! becomes `Enter` (a CRLF pair counts once), and other control bytes are
//! dropped. Non-ASCII bytes (line noise) are dropped with a warning so the
//! rest of the reading still arrives.

use std::io::{BufRead, ErrorKind};
use std::time::Duration;

use tracing::{trace, warn};

use super::{DeviceSource, DeviceStream};
use crate::error::DeviceError;
use crate::state::keyboard::KeyboardEvent;

/// Turns a byte source into keystrokes.
pub struct ScaleAdapter<R> {
    reader: R,
    last_was_cr: bool,
}

impl<R: BufRead> ScaleAdapter<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            last_was_cr: false,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>, DeviceError> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(DeviceError::read("scale", err)),
            };
            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }
}

impl<R: BufRead> DeviceStream for ScaleAdapter<R> {
    fn source(&self) -> DeviceSource {
        DeviceSource::Scale
    }

    // Reads block; the timeout is left to the underlying reader.
    fn next_event(&mut self, _timeout: Duration) -> Result<Option<KeyboardEvent>, DeviceError> {
        while let Some(byte) = self.next_byte()? {
            let after_cr = std::mem::replace(&mut self.last_was_cr, byte == b'\r');
            match byte {
                b'\n' if after_cr => continue,
                b'\r' | b'\n' => return Ok(Some(KeyboardEvent::new("Enter"))),
                0x20..=0x7e => {
                    return Ok(Some(KeyboardEvent::new(char::from(byte).to_string())));
                }
                0x80..=0xff => warn!(byte, "scale sent non-ASCII byte, skipped"),
                _ => trace!(byte, "scale control byte skipped"),
            }
        }
        Ok(None)
    }
}
