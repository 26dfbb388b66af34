//! Debounced switch scanning and input reporting.
//!
//! Every channel runs the same edge-detection state machine, driven by the
//! board clock instead of blocking settle sleeps: a scan pass never stalls
//! the control loop, however many channels are mid-transition.

use holeshot_core::{
    reports::{encode_report, RELEASE_SETTLE_MS, SWITCHES, SWITCH_COUNT},
    Error, Result,
};

use crate::{Board, SerialPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ChannelState {
    #[default]
    Released,
    PendingConfirm {
        since: u64,
    },
    Confirmed,
    PendingRelease {
        since: u64,
    },
}

/// The debounce state machines of all monitored channels, scanned in fixed
/// channel order.
#[derive(Debug, Default)]
pub struct SwitchScanner {
    channels: [ChannelState; SWITCH_COUNT],
}

impl SwitchScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the channel's press has been confirmed and reported.
    pub fn is_confirmed(&self, channel: usize) -> bool {
        self.channels[channel] == ChannelState::Confirmed
    }

    /// One pass over all channels.
    ///
    /// A channel confirms after its raw level has stayed active for its
    /// settle time; confirmation emits exactly one report. Any flicker
    /// back to inactive inside the settle window restarts the cycle. A
    /// released channel re-arms unconditionally once the release settle
    /// elapses; the level is not re-checked at expiry.
    ///
    /// Several channels may confirm in the same pass, each emitting its
    /// own report in channel order.
    pub fn scan<B, S>(&mut self, board: &mut B, serial: &mut S, bonus: bool) -> Result<()>
    where
        B: Board,
        S: SerialPort,
    {
        let now = board.now_ms();
        for channel in 0..SWITCH_COUNT {
            let raw = board.read_switch(channel).map_err(Error::device)?;
            let spec = &SWITCHES[channel];

            let next = match self.channels[channel] {
                ChannelState::Released => {
                    if raw {
                        ChannelState::PendingConfirm { since: now }
                    } else {
                        ChannelState::Released
                    }
                }
                ChannelState::PendingConfirm { since } => {
                    if !raw {
                        ChannelState::Released
                    } else if now - since >= u64::from(spec.settle_ms) {
                        emit_report(board, serial, spec.code(bonus))?;
                        ChannelState::Confirmed
                    } else {
                        ChannelState::PendingConfirm { since }
                    }
                }
                ChannelState::Confirmed => {
                    if raw {
                        ChannelState::Confirmed
                    } else {
                        ChannelState::PendingRelease { since: now }
                    }
                }
                ChannelState::PendingRelease { since } => {
                    if now - since >= u64::from(RELEASE_SETTLE_MS) {
                        ChannelState::Released
                    } else {
                        ChannelState::PendingRelease { since }
                    }
                }
            };
            self.channels[channel] = next;
        }
        Ok(())
    }
}

/// Sends one report: the channel code followed by a fresh snapshot of all
/// raw levels, taken at confirmation time.
fn emit_report<B, S>(board: &mut B, serial: &mut S, code: u8) -> Result<()>
where
    B: Board,
    S: SerialPort,
{
    let levels = level_snapshot(board)?;
    let frame = encode_report(code, levels);
    serial.write_all(&frame).map_err(Error::serial)?;
    log::debug!("reported switch code {code}, levels {levels:#06x}");
    Ok(())
}

fn level_snapshot<B: Board>(board: &mut B) -> Result<u16> {
    let mut levels = 0;
    for channel in 0..SWITCH_COUNT {
        if board.read_switch(channel).map_err(Error::device)? {
            levels |= 1 << channel;
        }
    }
    Ok(levels)
}
