//! Cursor position and the scroll (margin) region.

/// Current cursor position plus pending-wrap state.
///
/// `wrap_pending` mirrors yaft's `wrap_occured`: set when a printable
/// character lands in the last column with auto-wrap enabled, and
/// consumed (not immediately acted on) by the next `add_char` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub x: u16,
    pub y: u16,
    pub wrap_pending: bool,
}

/// The scrolling region (`DECSTBM` margins), inclusive of both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollRegion {
    pub top: u16,
    pub bottom: u16,
}

impl ScrollRegion {
    /// The full-screen region for a grid of `lines` rows.
    #[must_use]
    pub fn full(lines: u16) -> Self {
        Self {
            top: 0,
            bottom: lines.saturating_sub(1),
        }
    }
}

/// The single save/restore slot used by `ESC 7` / `ESC 8` (DECSC/DECRC).
///
/// Unlike a full terminfo-style stack, yaft (and this engine) keeps only
/// ever one saved snapshot; a second save overwrites the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SavedState {
    pub cursor: Cursor,
    pub origin_mode: bool,
    pub attribute: crate::mode::Attribute,
}
