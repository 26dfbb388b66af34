//! Hole to pixel-range addressing and the strip framebuffers.
//!
//! Zone sizes are fixed at build time. Every hole owns one or more
//! contiguous ranges on exactly one strip, and ranges of distinct holes on
//! the same strip never overlap.

use smart_leds::RGB8;

use crate::types::{Color, HoleId, Strip};

/// Pixel count of every strip buffer.
pub const STRIP_LEN: usize = 300;

/// Number of equal sub-segments on the center strip.
pub const CENTER_SEGMENTS: usize = 5;

const LARGE_ZONE: usize = 60;
const MEDIUM_ZONE: usize = 60;
const SMALL_ZONE: usize = 60;

/// A contiguous run of pixels on one strip, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRange {
    pub strip: Strip,
    pub start: usize,
    pub end: usize,
}

impl PixelRange {
    const fn new(strip: Strip, start: usize, end: usize) -> Self {
        Self { strip, start, end }
    }
}

const HOLE_1: [PixelRange; 1] = [PixelRange::new(Strip::Left, 0, LARGE_ZONE - 1)];
const HOLE_2: [PixelRange; 1] = [PixelRange::new(
    Strip::Left,
    LARGE_ZONE + MEDIUM_ZONE,
    LARGE_ZONE + 2 * MEDIUM_ZONE - 1,
)];
const HOLE_3: [PixelRange; 1] = [PixelRange::new(
    Strip::Right,
    LARGE_ZONE + MEDIUM_ZONE,
    2 * LARGE_ZONE + MEDIUM_ZONE - 1,
)];
const HOLE_4: [PixelRange; 1] = [PixelRange::new(Strip::Right, 0, MEDIUM_ZONE - 1)];
const HOLE_5: [PixelRange; 1] = [PixelRange::new(
    Strip::Left,
    LARGE_ZONE + 2 * MEDIUM_ZONE,
    2 * LARGE_ZONE + 2 * MEDIUM_ZONE - 1,
)];
const HOLE_6: [PixelRange; 1] = [PixelRange::new(
    Strip::Left,
    LARGE_ZONE,
    LARGE_ZONE + MEDIUM_ZONE - 1,
)];
const HOLE_7: [PixelRange; 1] = [PixelRange::new(
    Strip::Right,
    MEDIUM_ZONE,
    LARGE_ZONE + MEDIUM_ZONE - 1,
)];
const HOLE_8: [PixelRange; 1] = [PixelRange::new(
    Strip::Right,
    2 * LARGE_ZONE + MEDIUM_ZONE,
    2 * LARGE_ZONE + 2 * MEDIUM_ZONE - 1,
)];
const HOLE_9: [PixelRange; CENTER_SEGMENTS] = [
    center_segment_range(0),
    center_segment_range(1),
    center_segment_range(2),
    center_segment_range(3),
    center_segment_range(4),
];
const NO_RANGES: [PixelRange; 0] = [];

const fn center_segment_range(segment: usize) -> PixelRange {
    PixelRange::new(
        Strip::Center,
        segment * SMALL_ZONE,
        (segment + 1) * SMALL_ZONE - 1,
    )
}

impl HoleId {
    /// Pixel ranges painted by a command addressing this hole.
    ///
    /// Hole 9 is the representative of the central group and paints all
    /// five center segments at once. Holes 10..=13 are accepted by the
    /// protocol but own no ranges; their sub-segments are reachable only
    /// through [`LedBank::paint_center_segment`].
    pub fn segments(self) -> &'static [PixelRange] {
        match self.get() {
            1 => &HOLE_1,
            2 => &HOLE_2,
            3 => &HOLE_3,
            4 => &HOLE_4,
            5 => &HOLE_5,
            6 => &HOLE_6,
            7 => &HOLE_7,
            8 => &HOLE_8,
            9 => &HOLE_9,
            _ => &NO_RANGES,
        }
    }
}

/// The three strip framebuffers.
///
/// Painting only mutates the buffers; the owner decides when to push a
/// strip to the hardware, once per handled command.
pub struct LedBank {
    left: [RGB8; STRIP_LEN],
    right: [RGB8; STRIP_LEN],
    center: [RGB8; STRIP_LEN],
}

impl Default for LedBank {
    fn default() -> Self {
        Self::new()
    }
}

impl LedBank {
    pub fn new() -> Self {
        Self {
            left: [RGB8::default(); STRIP_LEN],
            right: [RGB8::default(); STRIP_LEN],
            center: [RGB8::default(); STRIP_LEN],
        }
    }

    /// Fills the hole's ranges with the color and returns the strip that
    /// must be pushed, or `None` when the hole owns no pixels.
    pub fn paint_hole(&mut self, hole: HoleId, color: Color) -> Option<Strip> {
        let segments = hole.segments();
        for range in segments {
            self.fill(range, color);
        }
        segments.first().map(|range| range.strip)
    }

    /// Fills one of the five central sub-segments.
    ///
    /// Not reachable from the command protocol; used by the bonus chase
    /// and the center blanking operation.
    pub fn paint_center_segment(&mut self, segment: usize, color: Color) {
        assert!(segment < CENTER_SEGMENTS);
        self.fill(&center_segment_range(segment), color);
    }

    /// Blanks all three strips.
    pub fn clear(&mut self) {
        self.left = [RGB8::default(); STRIP_LEN];
        self.right = [RGB8::default(); STRIP_LEN];
        self.center = [RGB8::default(); STRIP_LEN];
    }

    /// Blanks the five central sub-segments.
    pub fn clear_center(&mut self) {
        for segment in 0..CENTER_SEGMENTS {
            self.paint_center_segment(segment, Color::Black);
        }
    }

    pub fn strip(&self, strip: Strip) -> &[RGB8; STRIP_LEN] {
        match strip {
            Strip::Left => &self.left,
            Strip::Right => &self.right,
            Strip::Center => &self.center,
        }
    }

    fn strip_mut(&mut self, strip: Strip) -> &mut [RGB8; STRIP_LEN] {
        match strip {
            Strip::Left => &mut self.left,
            Strip::Right => &mut self.right,
            Strip::Center => &mut self.center,
        }
    }

    fn fill(&mut self, range: &PixelRange, color: Color) {
        let pixels = self.strip_mut(range.strip);
        for pixel in &mut pixels[range.start..=range.end] {
            *pixel = color.rgb();
        }
    }
}
