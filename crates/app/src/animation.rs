//! Decorative bonus effect on the central strip.

use holeshot_core::{
    types::{Color, Strip},
    zones::{LedBank, CENTER_SEGMENTS},
    Error, Result,
};

use crate::Board;

/// Delay after each chase step.
pub const CHASE_STEP_MS: u32 = 120;

/// Lights the five central segments yellow in order, pushing the center
/// strip after each step.
///
/// One-shot and blocking for its full duration; there is no cancellation.
/// Not reachable from the command protocol — an external trigger invokes
/// it through [`crate::App::play_center_chase`].
pub fn center_chase<B: Board>(board: &mut B, leds: &mut LedBank) -> Result<()> {
    for segment in 0..CENTER_SEGMENTS {
        leds.paint_center_segment(segment, Color::Yellow);
        board
            .render(Strip::Center, leds.strip(Strip::Center))
            .map_err(Error::device)?;
        board.delay_ms(CHASE_STEP_MS);
    }
    Ok(())
}
