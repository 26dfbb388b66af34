//! Holeshot firmware logic
//!
//! This crate holds everything between the serial link and the board pins:
//! the command decoder, the switch scanner, the bonus-mode state and the
//! control loop. Hardware is reached exclusively through the [`Board`] and
//! [`SerialPort`] seams, so the whole crate runs unchanged on the host.

#![cfg_attr(not(any(feature = "std", test)), no_std)]

use core::fmt::Debug;

pub use holeshot_core::{Error, Result};
use holeshot_core::{outputs::OutputLine, types::Strip, zones::STRIP_LEN};
use smart_leds::RGB8;

pub use crate::app::App;

pub mod animation;
mod app;
pub mod pins;
pub mod protocol;
pub mod scanner;
pub mod test_utils;

/// Board-specific capabilities the firmware drives.
///
/// Pin numbering, strip wiring and the clock source are the implementor's
/// business; the firmware only speaks in channel indices, [`OutputLine`]s
/// and whole strip buffers.
pub trait Board {
    type Error: Debug;

    /// Reads the raw level of a switch channel. High is the active level.
    fn read_switch(&mut self, channel: usize) -> core::result::Result<bool, Self::Error>;

    /// Drives an output line to the given level.
    ///
    /// A write either succeeds or fails opaquely; there are no retries.
    fn write_line(&mut self, line: OutputLine, level: bool)
        -> core::result::Result<(), Self::Error>;

    /// Pushes a strip buffer to the hardware. Blocking; the push completes
    /// before the call returns.
    fn render(
        &mut self,
        strip: Strip,
        pixels: &[RGB8; STRIP_LEN],
    ) -> core::result::Result<(), Self::Error>;

    /// Milliseconds since some fixed monotonic origin.
    fn now_ms(&mut self) -> u64;

    /// Blocks the control loop for the given number of milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Byte-level serial transport seam.
///
/// The decoder never consumes bytes unless a complete frame is buffered,
/// which is why the trait exposes peeking and the buffered byte count
/// instead of a plain read stream.
pub trait SerialPort {
    type Error: Debug;

    /// Number of bytes buffered and ready to be read.
    fn available(&mut self) -> usize;

    /// Returns the next buffered byte without consuming it.
    fn peek(&mut self) -> core::result::Result<Option<u8>, Self::Error>;

    /// Consumes and returns the next buffered byte.
    ///
    /// Callers must check [`Self::available`] first.
    fn read_byte(&mut self) -> core::result::Result<u8, Self::Error>;

    /// Writes the whole buffer to the host.
    fn write_all(&mut self, bytes: &[u8]) -> core::result::Result<(), Self::Error>;

    /// Discards every byte currently buffered.
    fn drain(&mut self) -> core::result::Result<(), Self::Error> {
        while self.available() > 0 {
            self.read_byte()?;
        }
        Ok(())
    }
}

/// Process-wide bonus-mode flag.
///
/// Owned by the control loop and passed explicitly to the dispatcher and
/// the reporter. It flips on the hole/output command boundary and selects
/// both the mode line pair and the input report code table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BonusMode {
    active: bool,
}

impl BonusMode {
    pub fn new(active: bool) -> Self {
        Self { active }
    }

    pub fn is_active(self) -> bool {
        self.active
    }

    pub(crate) fn set(&mut self, active: bool) {
        self.active = active;
    }
}
