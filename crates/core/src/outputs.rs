//! Relay output addressing.

use crate::types::OutputId;

/// A physical output line on the board.
///
/// `Digital` lines drive the solenoid/lamp bank, `Relay` lines the relay
/// bank. The mapping from a line to a pin number is board glue and lives
/// behind the `Board` seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLine {
    Digital(u8),
    Relay(u8),
}

/// Driven high while bonus mode is off, low while it is on.
pub const NORMAL_MODE_LINE: OutputLine = OutputLine::Digital(0);

/// Driven high while bonus mode is on, low while it is off. Mutually
/// exclusive with [`NORMAL_MODE_LINE`].
pub const BONUS_MODE_LINE: OutputLine = OutputLine::Digital(1);

/// Armed by command id 99. The protocol has no matching disarm command.
pub const POWER_CELL_RELAY: OutputLine = OutputLine::Relay(0);

/// Digital line driven by each output id, indexed by `id - 14`.
const OUTPUT_LINES: [u8; 15] = [5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19];

impl OutputId {
    /// The digital line toggled by this output id.
    pub fn line(self) -> OutputLine {
        OutputLine::Digital(OUTPUT_LINES[(self.get() - Self::FIRST) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_ids_map_onto_consecutive_lines() {
        for id in OutputId::FIRST..=OutputId::LAST {
            let line = OutputId::new(id).unwrap().line();
            assert_eq!(line, OutputLine::Digital(id - 9));
        }
    }

    #[test]
    fn mapped_lines_avoid_the_mode_pair() {
        for id in OutputId::FIRST..=OutputId::LAST {
            let line = OutputId::new(id).unwrap().line();
            assert_ne!(line, NORMAL_MODE_LINE);
            assert_ne!(line, BONUS_MODE_LINE);
        }
    }
}
