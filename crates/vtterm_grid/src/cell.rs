//! Grid cell representation.

use crate::color::ColorPair;
use crate::mode::Attribute;
use vtterm_glyph::GlyphRef;

/// The column-occupancy role a cell plays, distinct from [`vtterm_glyph::GlyphWidth`]
/// because a WIDE glyph's right half is represented by its own placeholder
/// cell rather than being skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWidth {
    /// A normal single-column cell.
    Half,
    /// The left column of a double-width glyph.
    Wide,
    /// The right column of a double-width glyph; carries no glyph of its
    /// own and is never drawn directly.
    NextToWide,
}

/// One cell of the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub glyph: Option<GlyphRef>,
    pub color: ColorPair,
    pub attribute: Attribute,
    pub width: CellWidth,
}

impl Cell {
    /// The cell written by `erase_cell`: the bound default glyph, the
    /// *current* color pair (background color erase), attributes cleared,
    /// counted as half-width.
    #[must_use]
    pub fn erased(default_glyph: GlyphRef, color: ColorPair) -> Self {
        Self {
            glyph: Some(default_glyph),
            color,
            attribute: Attribute::empty(),
            width: CellWidth::Half,
        }
    }
}
