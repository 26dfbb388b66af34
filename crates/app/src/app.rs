//! The firmware control loop and command dispatch.

use holeshot_core::{
    outputs::{OutputLine, BONUS_MODE_LINE, NORMAL_MODE_LINE, POWER_CELL_RELAY},
    types::{Color, Strip},
    zones::LedBank,
    Error, Result,
};

use crate::{
    animation,
    protocol::{self, Command, ACK, NACK},
    scanner::SwitchScanner,
    Board, BonusMode, SerialPort,
};

/// The firmware application: owns the framebuffers, the channel state
/// machines and the bonus-mode flag, and drives them from the serial link
/// and the switch bank.
pub struct App<B, S> {
    board: B,
    serial: S,
    leds: LedBank,
    scanner: SwitchScanner,
    bonus: BonusMode,
}

impl<B: Board, S: SerialPort> App<B, S> {
    pub fn new(board: B, serial: S) -> Self {
        Self {
            board,
            serial,
            leds: LedBank::new(),
            scanner: SwitchScanner::new(),
            bonus: BonusMode::default(),
        }
    }

    /// Runs the firmware event loop.
    ///
    /// Errors never escape: a failed tick is logged and the loop carries
    /// on, degraded rather than dead.
    pub fn run(mut self) -> ! {
        loop {
            if let Err(err) = self.tick() {
                log::warn!("recovered from a tick error: {err}");
            }
        }
    }

    /// One decode attempt followed by one switch scan pass.
    pub fn tick(&mut self) -> Result<()> {
        self.process_serial()?;
        self.scanner
            .scan(&mut self.board, &mut self.serial, self.bonus.is_active())
    }

    /// Plays the one-shot bonus chase on the central strip. Blocking.
    pub fn play_center_chase(&mut self) -> Result<()> {
        animation::center_chase(&mut self.board, &mut self.leds)
    }

    /// Blanks and pushes all three strips.
    pub fn leds_off(&mut self) -> Result<()> {
        self.leds.clear();
        for strip in Strip::ALL {
            self.push(Some(strip))?;
        }
        Ok(())
    }

    /// Blanks and pushes the five central segments.
    pub fn center_leds_off(&mut self) -> Result<()> {
        self.leds.clear_center();
        self.push(Some(Strip::Center))
    }

    pub fn leds(&self) -> &LedBank {
        &self.leds
    }

    pub fn is_bonus_active(&self) -> bool {
        self.bonus.is_active()
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    fn process_serial(&mut self) -> Result<()> {
        match protocol::read_command(&mut self.serial) {
            Ok(command) => self.handle_command(command),
            Err(nb::Error::WouldBlock) => Ok(()),
            Err(nb::Error::Other(Error::InvalidColor(byte))) => {
                // The only explicit recovery path: scrap whatever else is
                // buffered and tell the host it sent nonsense.
                log::warn!("invalid color letter {byte:#04x}, draining the stream");
                self.serial.drain().map_err(Error::serial)?;
                self.serial.write_all(NACK).map_err(Error::serial)
            }
            Err(nb::Error::Other(err @ (Error::UnknownCommand(_) | Error::BadMarker(_)))) => {
                // No reply; the remaining bytes may now be misaligned.
                log::warn!("ignored frame: {err}");
                Ok(())
            }
            Err(nb::Error::Other(err)) => Err(err),
        }
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::PowerCell => {
                log::info!("arming the power cell relay");
                self.write_line(POWER_CELL_RELAY, true)
            }
            Command::Paint { hole, color } => {
                self.leave_bonus()?;
                let strip = self.leds.paint_hole(hole, color);
                self.push(strip)?;
                self.ack()
            }
            Command::Clear { hole } => {
                self.leave_bonus()?;
                let strip = self.leds.paint_hole(hole, Color::Black);
                self.push(strip)?;
                self.ack()
            }
            Command::Output { id, on } => {
                self.enter_bonus()?;
                self.write_line(id.line(), on)?;
                self.ack()
            }
        }
    }

    /// A hole command while bonus mode is on forces it back off.
    fn leave_bonus(&mut self) -> Result<()> {
        if self.bonus.is_active() {
            self.write_line(NORMAL_MODE_LINE, true)?;
            self.write_line(BONUS_MODE_LINE, false)?;
            self.bonus.set(false);
            log::debug!("bonus mode off");
        }
        Ok(())
    }

    /// An output command while bonus mode is off turns it on.
    fn enter_bonus(&mut self) -> Result<()> {
        if !self.bonus.is_active() {
            self.write_line(NORMAL_MODE_LINE, false)?;
            self.write_line(BONUS_MODE_LINE, true)?;
            self.bonus.set(true);
            log::debug!("bonus mode on");
        }
        Ok(())
    }

    /// Pushes the strip a paint touched, once per handled command.
    fn push(&mut self, strip: Option<Strip>) -> Result<()> {
        if let Some(strip) = strip {
            self.board
                .render(strip, self.leds.strip(strip))
                .map_err(Error::device)?;
        }
        Ok(())
    }

    fn ack(&mut self) -> Result<()> {
        self.serial.write_all(ACK).map_err(Error::serial)
    }

    fn write_line(&mut self, line: OutputLine, level: bool) -> Result<()> {
        self.board.write_line(line, level).map_err(Error::device)
    }
}
