//! In-memory board and serial doubles.
//!
//! Used by this crate's tests and by the host simulator; everything is
//! plain fixed-capacity state, so the doubles work in `no_std` builds too.

use core::convert::Infallible;

use holeshot_core::{
    outputs::OutputLine,
    reports::SWITCH_COUNT,
    types::Strip,
    zones::STRIP_LEN,
};
use smart_leds::RGB8;

use crate::{Board, SerialPort};

const BUF_LEN: usize = 256;

/// A serial port backed by two in-memory buffers.
#[derive(Debug, Default)]
pub struct MemorySerial {
    rx: heapless::Vec<u8, BUF_LEN>,
    cursor: usize,
    tx: heapless::Vec<u8, BUF_LEN>,
}

impl MemorySerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues bytes as if they had just arrived from the host.
    pub fn push(&mut self, bytes: &[u8]) {
        if self.cursor > 0 {
            let remaining: heapless::Vec<u8, BUF_LEN> =
                self.rx[self.cursor..].iter().copied().collect();
            self.rx = remaining;
            self.cursor = 0;
        }
        self.rx.extend_from_slice(bytes).unwrap();
    }

    /// Bytes still waiting to be consumed.
    pub fn pending(&self) -> usize {
        self.rx.len() - self.cursor
    }

    /// Everything the firmware has written so far.
    pub fn sent(&self) -> &[u8] {
        &self.tx
    }

    /// Hands over and forgets the written bytes.
    pub fn take_sent(&mut self) -> heapless::Vec<u8, BUF_LEN> {
        core::mem::take(&mut self.tx)
    }
}

impl SerialPort for MemorySerial {
    type Error = Infallible;

    fn available(&mut self) -> usize {
        self.pending()
    }

    fn peek(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.rx.get(self.cursor).copied())
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = self.rx[self.cursor];
        self.cursor += 1;
        Ok(byte)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.tx.extend_from_slice(bytes).unwrap();
        Ok(())
    }
}

/// A board made of plain state: raw switch levels, last-driven line
/// levels, the last frame pushed per strip and a virtual clock that
/// [`Board::delay_ms`] advances.
#[derive(Debug)]
pub struct MemoryBoard {
    pub switches: [bool; SWITCH_COUNT],
    digital: [Option<bool>; 20],
    relays: [Option<bool>; 2],
    frames: [Option<[RGB8; STRIP_LEN]>; 3],
    pushes: [usize; 3],
    /// Every line write in call order.
    pub writes: heapless::Vec<(OutputLine, bool), 64>,
    now: u64,
}

impl Default for MemoryBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self {
            switches: [false; SWITCH_COUNT],
            digital: [None; 20],
            relays: [None; 2],
            frames: [None; 3],
            pushes: [0; 3],
            writes: heapless::Vec::new(),
            now: 0,
        }
    }

    pub fn press(&mut self, channel: usize) {
        self.switches[channel] = true;
    }

    pub fn release(&mut self, channel: usize) {
        self.switches[channel] = false;
    }

    /// Moves the virtual clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Last driven level of a line, `None` if it was never written.
    pub fn line(&self, line: OutputLine) -> Option<bool> {
        match line {
            OutputLine::Digital(n) => self.digital[n as usize],
            OutputLine::Relay(n) => self.relays[n as usize],
        }
    }

    /// Last frame pushed to a strip, `None` if it was never rendered.
    pub fn frame(&self, strip: Strip) -> Option<&[RGB8; STRIP_LEN]> {
        self.frames[strip.index()].as_ref()
    }

    /// Number of pushes a strip has received.
    pub fn pushes(&self, strip: Strip) -> usize {
        self.pushes[strip.index()]
    }
}

impl Board for MemoryBoard {
    type Error = Infallible;

    fn read_switch(&mut self, channel: usize) -> Result<bool, Self::Error> {
        Ok(self.switches[channel])
    }

    fn write_line(&mut self, line: OutputLine, level: bool) -> Result<(), Self::Error> {
        match line {
            OutputLine::Digital(n) => self.digital[n as usize] = Some(level),
            OutputLine::Relay(n) => self.relays[n as usize] = Some(level),
        }
        self.writes.push((line, level)).unwrap();
        Ok(())
    }

    fn render(&mut self, strip: Strip, pixels: &[RGB8; STRIP_LEN]) -> Result<(), Self::Error> {
        self.frames[strip.index()] = Some(*pixels);
        self.pushes[strip.index()] += 1;
        Ok(())
    }

    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}
