//! Serial command frame decoding.
//!
//! Commands arrive as fixed ASCII frames: two `'O'` marker bytes, two
//! decimal digits forming an id, then — depending on the id range — a state
//! digit and a color letter. Decoding is attempted only once at least
//! [`FRAME_LEN`] bytes are buffered and is strictly single-pass: either a
//! frame is consumed whole or nothing is consumed at all (with the two
//! documented desync exceptions, see [`read_command`]).

use holeshot_core::{
    types::{Color, HoleId, OutputId},
    Error,
};

use crate::SerialPort;

/// Minimum buffered bytes before a decode is attempted.
pub const FRAME_LEN: usize = 5;

/// Positive acknowledgment sent for handled hole and output commands.
pub const ACK: &[u8; 2] = b"O1";

/// Negative acknowledgment sent for an invalid color letter.
pub const NACK: &[u8; 2] = b"O0";

const MARKER: u8 = b'O';

/// A decoded, validated command ready for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Id 99: arm the power cell relay. Irreversible by protocol.
    PowerCell,
    /// Ids 1..=13 with state `'1'`: paint a hole.
    Paint { hole: HoleId, color: Color },
    /// Ids 1..=13 with any other state digit: blank a hole.
    Clear { hole: HoleId },
    /// Ids 14..=28: toggle a direct output line.
    Output { id: OutputId, on: bool },
}

/// Attempts to decode one command from the transport buffer.
///
/// Returns [`nb::Error::WouldBlock`] while no complete frame is buffered,
/// or while a non-marker byte sits at the head of the buffer (which no
/// amount of waiting will fix — the head is never drained, a known
/// fragility kept on purpose).
///
/// Two error paths leave the stream misaligned by design: an unknown id
/// ([`Error::UnknownCommand`]) leaves its two trailing bytes unconsumed,
/// and a marker mismatch ([`Error::BadMarker`]) has already consumed both
/// marker positions.
pub fn read_command<S: SerialPort>(serial: &mut S) -> nb::Result<Command, Error> {
    if serial.available() < FRAME_LEN {
        return Err(nb::Error::WouldBlock);
    }
    match serial.peek().map_err(serial_err)? {
        Some(MARKER) => {}
        _ => return Err(nb::Error::WouldBlock),
    }

    serial.read_byte().map_err(serial_err)?;
    let second = serial.read_byte().map_err(serial_err)?;
    if second != MARKER {
        return Err(nb::Error::Other(Error::BadMarker(second)));
    }

    let d1 = serial.read_byte().map_err(serial_err)?;
    let d2 = serial.read_byte().map_err(serial_err)?;
    // Non-digit bytes wrap around like the 8-bit arithmetic they feed;
    // the resulting id almost always lands in the unknown range.
    let id = d1
        .wrapping_sub(b'0')
        .wrapping_mul(10)
        .wrapping_add(d2.wrapping_sub(b'0'));

    match id {
        99 => Ok(Command::PowerCell),
        1..=13 => {
            let hole = HoleId::new(id).map_err(nb::Error::Other)?;
            let state = serial.read_byte().map_err(serial_err)?;
            let color = serial.read_byte().map_err(serial_err)?;
            if state == b'1' {
                match Color::from_ascii(color) {
                    Some(color) => Ok(Command::Paint { hole, color }),
                    None => Err(nb::Error::Other(Error::InvalidColor(color))),
                }
            } else {
                // The color byte is consumed but carries no meaning in the
                // off branch.
                Ok(Command::Clear { hole })
            }
        }
        14..=28 => {
            let output = OutputId::new(id).map_err(nb::Error::Other)?;
            let state = serial.read_byte().map_err(serial_err)?;
            let _color = serial.read_byte().map_err(serial_err)?;
            Ok(Command::Output {
                id: output,
                on: state == b'1',
            })
        }
        other => Err(nb::Error::Other(Error::UnknownCommand(other))),
    }
}

fn serial_err<E: core::fmt::Debug>(err: E) -> nb::Error<Error> {
    nb::Error::Other(Error::serial(err))
}
