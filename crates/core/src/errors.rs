use core::fmt::Debug;

use displaydoc::Display;

/// A specialized result type for the holeshot firmware.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while decoding commands or driving the board.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// Hole id is out of the 1..=13 range: {0}.
    InvalidHole(u8),
    /// Output id is out of the 14..=28 range: {0}.
    InvalidOutput(u8),
    /// Command id has no handler: {0}.
    UnknownCommand(u8),
    /// Color letter is not one of rgby: {0}.
    InvalidColor(u8),
    /// Second frame marker byte mismatch: {0}.
    BadMarker(u8),
    /// Serial transport error.
    Serial,
    /// Board I/O error.
    Device,
}

impl Error {
    /// Creates a new serial transport error.
    pub fn serial<E: Debug>(_: E) -> Self {
        Self::Serial
    }

    /// Creates a new board I/O error.
    pub fn device<E: Debug>(_: E) -> Self {
        Self::Device
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    fn from(err: Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}
