//! A pure, in-memory VT102/ANSI-compatible terminal emulator engine.
//!
//! [`Terminal`] consumes a byte stream (UTF-8 text interleaved with C0
//! controls and `ESC`/CSI/OSC/DCS sequences) and maintains a [`Grid`] of
//! cells. It never touches a PTY, a renderer, or a font; those are the
//! host's problem. See [`vtterm_grid`] for the screen model and
//! [`vtterm_glyph`] for how glyphs are resolved.

#![warn(clippy::pedantic)]

mod control;
mod csi;
mod error;
mod response;
mod terminal;

pub use error::{Result, TermError};
pub use response::write_response;
pub use terminal::Terminal;

pub use vtterm_glyph::{GlyphRef, GlyphStore, GlyphTable, GlyphWidth};
pub use vtterm_grid::{Attribute, Cell, CellWidth, ColorPair, Cursor, Grid, Mode, ScrollRegion};
