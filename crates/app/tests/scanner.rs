//! Debounce timing scenarios driven against the scanner directly.

use holeshot_app::{
    scanner::SwitchScanner,
    test_utils::{MemoryBoard, MemorySerial},
};

struct Rig {
    scanner: SwitchScanner,
    board: MemoryBoard,
    serial: MemorySerial,
}

impl Rig {
    fn new() -> Self {
        let _ = env_logger::try_init();
        Self {
            scanner: SwitchScanner::new(),
            board: MemoryBoard::new(),
            serial: MemorySerial::new(),
        }
    }

    fn scan(&mut self) {
        self.scan_with_bonus(false);
    }

    fn scan_with_bonus(&mut self, bonus: bool) {
        self.scanner
            .scan(&mut self.board, &mut self.serial, bonus)
            .unwrap();
    }

    fn reports(&mut self) -> Vec<Vec<u8>> {
        self.serial
            .take_sent()
            .chunks(7)
            .map(|chunk| chunk.to_vec())
            .collect()
    }
}

#[test]
fn a_held_press_reports_exactly_once() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.scan();
    assert!(rig.reports().is_empty());

    rig.board.advance(3);
    rig.scan();
    assert_eq!(rig.reports(), [b"I010001".to_vec()]);
    assert!(rig.scanner.is_confirmed(0));

    // Holding the switch is level, not edge: nothing further.
    rig.board.advance(100);
    rig.scan();
    rig.scan();
    assert!(rig.reports().is_empty());
}

#[test]
fn a_bounce_inside_the_settle_window_never_reports() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.scan();

    rig.board.advance(1);
    rig.board.release(0);
    rig.scan();

    rig.board.advance(1);
    rig.board.press(0);
    rig.scan();

    // Two milliseconds after the re-press: still settling.
    rig.board.advance(2);
    rig.scan();
    assert!(rig.reports().is_empty());

    rig.board.advance(1);
    rig.scan();
    assert_eq!(rig.reports().len(), 1);
}

#[test]
fn the_outlier_channel_needs_thirteen_milliseconds() {
    let mut rig = Rig::new();
    rig.board.press(10);
    rig.scan();

    rig.board.advance(3);
    rig.scan();
    assert!(rig.reports().is_empty());

    rig.board.advance(9);
    rig.scan();
    assert!(rig.reports().is_empty());

    rig.board.advance(1);
    rig.scan();
    assert_eq!(rig.reports(), [b"I110400".to_vec()]);
}

#[test]
fn bonus_mode_selects_the_second_code_table() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.scan_with_bonus(true);
    rig.board.advance(3);
    rig.scan_with_bonus(true);
    assert_eq!(rig.reports(), [b"I140001".to_vec()]);
}

#[test]
fn tail_channels_report_the_bonus_code_in_either_mode() {
    for bonus in [false, true] {
        let mut rig = Rig::new();
        rig.board.press(13);
        rig.scan_with_bonus(bonus);
        rig.board.advance(3);
        rig.scan_with_bonus(bonus);
        assert_eq!(rig.reports(), [b"I272000".to_vec()], "bonus = {bonus}");
    }
}

#[test]
fn release_rearms_after_the_settle_and_allows_a_second_report() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.scan();
    rig.board.advance(3);
    rig.scan();
    assert_eq!(rig.reports().len(), 1);

    rig.board.release(0);
    rig.scan();
    assert!(!rig.scanner.is_confirmed(0));

    // Still inside the release settle: not yet re-armed.
    rig.board.advance(2);
    rig.board.press(0);
    rig.scan();
    assert!(rig.reports().is_empty());

    rig.board.advance(1);
    rig.scan();
    rig.scan();
    rig.board.advance(3);
    rig.scan();
    assert_eq!(rig.reports(), [b"I010001".to_vec()]);
}

#[test]
fn rearm_is_an_unconditional_clear_not_a_recheck() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.scan();
    rig.board.advance(3);
    rig.scan();
    rig.reports();

    // Flickers back active during the release settle; the channel clears
    // anyway once the settle elapses, then runs a fresh confirm cycle.
    rig.board.release(0);
    rig.scan();
    rig.board.press(0);
    rig.board.advance(3);
    rig.scan();
    assert!(!rig.scanner.is_confirmed(0));

    rig.scan();
    rig.board.advance(3);
    rig.scan();
    assert_eq!(rig.reports().len(), 1);
    assert!(rig.scanner.is_confirmed(0));
}

#[test]
fn simultaneous_confirms_each_report_with_the_shared_snapshot() {
    let mut rig = Rig::new();
    rig.board.press(0);
    rig.board.press(4);
    rig.scan();
    rig.board.advance(3);
    rig.scan();

    assert_eq!(rig.reports(), [b"I010011".to_vec(), b"I020011".to_vec()]);
}

#[test]
fn an_untouched_bank_stays_silent() {
    let mut rig = Rig::new();
    for _ in 0..50 {
        rig.board.advance(7);
        rig.scan();
    }
    assert!(rig.reports().is_empty());
}
