//! Screen grid, cell, cursor and color primitives for the terminal engine.
//!
//! This crate has no notion of byte streams, escape sequences or CSI
//! commands; it only implements the grid-level operations those higher
//! layers dispatch into (`set_cell`, `scroll_window`, `move_cursor`, ...).

#![warn(clippy::pedantic)]

mod cell;
mod color;
mod cursor;
mod grid;
mod mode;

pub use cell::{Cell, CellWidth};
pub use color::{rgb2index, ColorPair, BRIGHT_INC, DEFAULT_BG, DEFAULT_FG};
pub use cursor::{Cursor, SavedState, ScrollRegion};
pub use grid::{Grid, TABSTOP};
pub use mode::{Attribute, Mode};
