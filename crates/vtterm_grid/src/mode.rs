//! Terminal mode and character-attribute bitfields.

use bitflags::bitflags;

bitflags! {
    /// Set/reset terminal modes (`DECSET`/`DECRST` private modes this
    /// engine recognizes).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mode: u8 {
        /// DECOM: cursor addressing is relative to the scroll region.
        const ORIGIN = 0x01;
        /// DECTCEM: cursor is visible.
        const CURSOR_VISIBLE = 0x02;
        /// DECAWM: auto-wrap at the right margin.
        const AUTO_WRAP = 0x04;
        /// Variable-width backspace: BS across a WIDE glyph's right half
        /// moves the cursor back two columns.
        const VWBS = 0x08;
    }
}

impl Mode {
    /// The mode bits in effect immediately after RIS.
    #[must_use]
    pub const fn reset() -> Self {
        Self::CURSOR_VISIBLE.union(Self::AUTO_WRAP)
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::reset()
    }
}

bitflags! {
    /// SGR character attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attribute: u8 {
        /// Brightens foreground color indices 0-7 by +8.
        const BOLD = 0x01;
        const UNDERLINE = 0x02;
        /// Brightens background color indices 0-7 by +8.
        const BLINK = 0x04;
        /// Swaps fg/bg at cell-write time.
        const REVERSE = 0x08;
    }
}

impl Default for Attribute {
    fn default() -> Self {
        Self::empty()
    }
}
