//! An `embedded-hal` backed [`Board`] implementation.
//!
//! Board crates hand over their concrete pins, strip drivers, delay
//! provider and millisecond tick source; pin numbering stays on their side
//! of the seam.

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin, PinState},
};
use holeshot_core::{outputs::OutputLine, reports::SWITCH_COUNT, types::Strip, zones::STRIP_LEN};
use smart_leds::{SmartLedsWrite, RGB8};

use crate::Board;

/// Digital output lines the adapter drives.
pub const DIGITAL_LINES: usize = 20;

/// Relay lines the adapter drives.
pub const RELAY_LINES: usize = 1;

/// Collapsed pin/strip failure, which the firmware cannot act on beyond
/// reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinBankError {
    /// A switch input read failed.
    Switch,
    /// An output line write failed.
    Line,
    /// A strip push failed.
    Strip,
}

/// The full pin complement of one board.
pub struct PinBank<I, O, L, D, F> {
    switches: [I; SWITCH_COUNT],
    digital: [O; DIGITAL_LINES],
    relays: [O; RELAY_LINES],
    left: L,
    right: L,
    center: L,
    delay: D,
    millis: F,
}

impl<I, O, L, D, F> PinBank<I, O, L, D, F>
where
    I: InputPin,
    O: OutputPin,
    L: SmartLedsWrite<Color = RGB8>,
    D: DelayNs,
    F: FnMut() -> u64,
{
    /// Strips are handed over in left, right, center order.
    pub fn new(
        switches: [I; SWITCH_COUNT],
        digital: [O; DIGITAL_LINES],
        relays: [O; RELAY_LINES],
        strips: (L, L, L),
        delay: D,
        millis: F,
    ) -> Self {
        let (left, right, center) = strips;
        Self {
            switches,
            digital,
            relays,
            left,
            right,
            center,
            delay,
            millis,
        }
    }
}

impl<I, O, L, D, F> Board for PinBank<I, O, L, D, F>
where
    I: InputPin,
    O: OutputPin,
    L: SmartLedsWrite<Color = RGB8>,
    D: DelayNs,
    F: FnMut() -> u64,
{
    type Error = PinBankError;

    fn read_switch(&mut self, channel: usize) -> Result<bool, Self::Error> {
        self.switches[channel]
            .is_high()
            .map_err(|_| PinBankError::Switch)
    }

    fn write_line(&mut self, line: OutputLine, level: bool) -> Result<(), Self::Error> {
        let pin = match line {
            OutputLine::Digital(n) => self.digital.get_mut(n as usize),
            OutputLine::Relay(n) => self.relays.get_mut(n as usize),
        };
        // Lines beyond the wired banks are a no-op.
        let Some(pin) = pin else {
            return Ok(());
        };
        pin.set_state(PinState::from(level))
            .map_err(|_| PinBankError::Line)
    }

    fn render(&mut self, strip: Strip, pixels: &[RGB8; STRIP_LEN]) -> Result<(), Self::Error> {
        let driver = match strip {
            Strip::Left => &mut self.left,
            Strip::Right => &mut self.right,
            Strip::Center => &mut self.center,
        };
        driver
            .write(pixels.iter().copied())
            .map_err(|_| PinBankError::Strip)
    }

    fn now_ms(&mut self) -> u64 {
        (self.millis)()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
