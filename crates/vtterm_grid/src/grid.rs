//! The screen grid: cell storage, cursor motion and scrolling.

use crate::cell::{Cell, CellWidth};
use crate::color::{ColorPair, BRIGHT_INC};
use crate::cursor::{Cursor, SavedState, ScrollRegion};
use crate::mode::{Attribute, Mode};
use vtterm_glyph::{GlyphRef, GlyphWidth};

/// Tab stops default to every 8th column.
pub const TABSTOP: u16 = 8;

/// The in-memory terminal screen.
///
/// Rows are stored as `Box<[Cell]>` behind a `Vec`, so [`Grid::scroll_window`]
/// moves whole rows with [`<[T]>::swap`] instead of copying cells one at a
/// time.
#[derive(Debug, Clone)]
pub struct Grid {
    cols: u16,
    lines: u16,
    rows: Vec<Box<[Cell]>>,
    line_dirty: Vec<bool>,
    tabstop: Vec<bool>,
    cursor: Cursor,
    scroll: ScrollRegion,
    mode: Mode,
    attribute: Attribute,
    color: ColorPair,
    saved: SavedState,
    default_glyph: GlyphRef,
}

impl Grid {
    /// Allocate a `cols` x `lines` grid and put it through an initial RIS,
    /// same as yaft's `term_init` immediately calling `reset`.
    #[must_use]
    pub fn new(cols: u16, lines: u16, default_glyph: GlyphRef) -> Self {
        let rows = (0..lines)
            .map(|_| vec![Cell::erased(default_glyph, ColorPair::default()); cols as usize].into_boxed_slice())
            .collect();
        let mut grid = Self {
            cols,
            lines,
            rows,
            line_dirty: vec![true; lines as usize],
            tabstop: vec![false; cols as usize],
            cursor: Cursor::default(),
            scroll: ScrollRegion::full(lines),
            mode: Mode::reset(),
            attribute: Attribute::empty(),
            color: ColorPair::default(),
            saved: SavedState::default(),
            default_glyph,
        };
        grid.reset();
        grid
    }

    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[must_use]
    pub fn lines(&self) -> u16 {
        self.lines
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub fn scroll(&self) -> ScrollRegion {
        self.scroll
    }

    pub fn set_scroll(&mut self, region: ScrollRegion) {
        self.scroll = region;
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mode_mut(&mut self) -> &mut Mode {
        &mut self.mode
    }

    #[must_use]
    pub fn attribute(&self) -> Attribute {
        self.attribute
    }

    pub fn set_attribute(&mut self, attribute: Attribute) {
        self.attribute = attribute;
    }

    #[must_use]
    pub fn color(&self) -> ColorPair {
        self.color
    }

    pub fn set_color(&mut self, color: ColorPair) {
        self.color = color;
    }

    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Cell {
        self.rows[y as usize][x as usize]
    }

    #[must_use]
    pub fn is_line_dirty(&self, y: u16) -> bool {
        self.line_dirty[y as usize]
    }

    pub fn clear_dirty(&mut self, y: u16) {
        self.line_dirty[y as usize] = false;
    }

    #[must_use]
    pub fn is_tabstop(&self, x: u16) -> bool {
        self.tabstop[x as usize]
    }

    pub fn set_tabstop(&mut self, x: u16, set: bool) {
        self.tabstop[x as usize] = set;
    }

    pub fn clear_all_tabstops(&mut self) {
        self.tabstop.iter_mut().for_each(|t| *t = false);
    }

    /// Save the cursor, origin mode, and current attribute into the single
    /// `ESC 7` / `ESC 8` slot, overwriting whatever was saved before.
    pub fn save_state(&mut self) {
        self.saved = SavedState {
            cursor: self.cursor,
            origin_mode: self.mode.contains(Mode::ORIGIN),
            attribute: self.attribute,
        };
    }

    pub fn restore_state(&mut self) {
        self.cursor = self.saved.cursor;
        self.mode.set(Mode::ORIGIN, self.saved.origin_mode);
        self.attribute = self.saved.attribute;
    }

    /// RIS: full terminal reset. Mode, scroll region, cursor, saved state,
    /// color and attribute all return to their power-on defaults, every
    /// cell is erased and tab stops are restored to every 8th column.
    pub fn reset(&mut self) {
        self.mode = Mode::reset();
        self.scroll = ScrollRegion::full(self.lines);
        self.cursor = Cursor::default();
        self.color = ColorPair::default();
        self.attribute = Attribute::empty();
        self.saved = SavedState {
            cursor: self.cursor,
            origin_mode: self.mode.contains(Mode::ORIGIN),
            attribute: self.attribute,
        };
        for y in 0..self.lines {
            self.erase_row(y);
        }
        for (x, stop) in self.tabstop.iter_mut().enumerate() {
            *stop = x as u16 % TABSTOP == 0;
        }
    }

    /// Fill every cell of row `y` with the erase cell (background color
    /// erase: the current background, not a fixed default).
    pub fn erase_row(&mut self, y: u16) {
        let erased = Cell::erased(self.default_glyph, self.color);
        for cell in self.rows[y as usize].iter_mut() {
            *cell = erased;
        }
        self.line_dirty[y as usize] = true;
    }

    /// Reset a single cell to the erase cell (background color erase).
    pub fn erase_cell(&mut self, x: u16, y: u16) {
        self.rows[y as usize][x as usize] = Cell::erased(self.default_glyph, self.color);
        self.line_dirty[y as usize] = true;
    }

    /// Write `glyph` at `(x, y)` under the current color/attribute,
    /// brightening bold foregrounds and blinking backgrounds by
    /// [`BRIGHT_INC`] and swapping fg/bg under reverse video. Returns the
    /// number of columns the glyph occupies (1 or 2).
    ///
    /// Writing a WIDE glyph also stamps a [`CellWidth::NextToWide`]
    /// placeholder into the next column, if one exists. Writing a HALF
    /// glyph over what used to be the left half of a wide glyph erases an
    /// now-orphaned `NextToWide` neighbor to its right.
    pub fn set_cell(&mut self, x: u16, y: u16, glyph: GlyphRef) -> u8 {
        let mut fg = self.color.fg;
        if self.attribute.contains(Attribute::BOLD) && fg <= 7 {
            fg += BRIGHT_INC;
        }
        let mut bg = self.color.bg;
        if self.attribute.contains(Attribute::BLINK) && bg <= 7 {
            bg += BRIGHT_INC;
        }
        if self.attribute.contains(Attribute::REVERSE) {
            std::mem::swap(&mut fg, &mut bg);
        }
        let color = ColorPair { fg, bg };
        let width = match glyph.width {
            GlyphWidth::Wide => CellWidth::Wide,
            GlyphWidth::Half => CellWidth::Half,
        };

        self.rows[y as usize][x as usize] = Cell {
            glyph: Some(glyph),
            color,
            attribute: self.attribute,
            width,
        };
        self.line_dirty[y as usize] = true;

        if width == CellWidth::Wide {
            if x + 1 < self.cols {
                self.rows[y as usize][(x + 1) as usize] = Cell {
                    glyph: None,
                    color,
                    attribute: self.attribute,
                    width: CellWidth::NextToWide,
                };
            }
            2
        } else {
            if x + 1 < self.cols && self.rows[y as usize][(x + 1) as usize].width == CellWidth::NextToWide {
                self.erase_cell(x + 1, y);
            }
            1
        }
    }

    /// Copy the cell at `(src_x, src_y)` to `(dst_x, dst_y)`.
    ///
    /// A `NextToWide` source is skipped entirely (it carries no glyph of
    /// its own); a `Wide` source that would land its right half off the
    /// grid's edge is turned into an erase instead of a truncated copy.
    pub fn copy_cell(&mut self, dst_x: u16, dst_y: u16, src_x: u16, src_y: u16) {
        let src = self.rows[src_y as usize][src_x as usize];
        if src.width == CellWidth::NextToWide {
            return;
        }
        if src.width == CellWidth::Wide && dst_x == self.cols - 1 {
            self.erase_cell(dst_x, dst_y);
            return;
        }
        self.rows[dst_y as usize][dst_x as usize] = src;
        self.line_dirty[dst_y as usize] = true;
        if src.width == CellWidth::Wide && dst_x + 1 < self.cols {
            self.rows[dst_y as usize][(dst_x + 1) as usize] = Cell {
                width: CellWidth::NextToWide,
                ..src
            };
        }
    }

    /// Scroll rows `[from, to]` (inclusive) by `offset` lines: positive
    /// scrolls content toward higher row numbers, negative toward lower.
    /// Rows vacated by the shift are erased. A no-op if `offset == 0` or
    /// the region is degenerate (`from >= to`).
    ///
    /// Implemented as row-pointer swaps, so this is O(rows moved), never
    /// O(cells).
    pub fn scroll_window(&mut self, from: u16, to: u16, offset: i32) {
        if offset == 0 || from >= to {
            return;
        }
        tracing::trace!(from, to, offset, "scrolling grid region");
        for y in from..=to {
            self.line_dirty[y as usize] = true;
        }

        let span = to - from + 1;
        let abs_offset = offset.unsigned_abs().min(u32::from(span)) as u16;
        if abs_offset == span {
            for y in from..=to {
                self.erase_row(y);
            }
            return;
        }
        let lines = span - abs_offset;

        if offset > 0 {
            for i in 0..lines {
                let y = from + i;
                self.rows.swap(y as usize, (y + abs_offset) as usize);
            }
            for y in (to - abs_offset + 1)..=to {
                self.erase_row(y);
            }
        } else {
            for i in 0..lines {
                let y = to - i;
                self.rows.swap(y as usize, (y - abs_offset) as usize);
            }
            for y in from..(from + abs_offset) {
                self.erase_row(y);
            }
        }
    }

    /// Move the cursor by `(x_offset, y_offset)` relative to its current
    /// position, clamping at the grid edges. Crossing the right edge with
    /// auto-wrap enabled sets `wrap_pending` instead of moving past the
    /// last column. Crossing the top or bottom of the *scroll region*
    /// while already sitting on that edge scrolls the region instead of
    /// moving the cursor past it.
    pub fn move_cursor(&mut self, y_offset: i32, x_offset: i32) {
        let mut x = i32::from(self.cursor.x) + x_offset;
        if x < 0 {
            x = 0;
        }
        if x >= i32::from(self.cols) {
            if self.mode.contains(Mode::AUTO_WRAP) {
                self.cursor.wrap_pending = true;
            }
            x = i32::from(self.cols) - 1;
        }
        self.cursor.x = x as u16;

        if self.cursor.y == self.scroll.top && y_offset < 0 {
            self.scroll_window(self.scroll.top, self.scroll.bottom, y_offset);
            self.cursor.y = self.scroll.top;
        } else if self.cursor.y == self.scroll.bottom && y_offset > 0 {
            self.scroll_window(self.scroll.top, self.scroll.bottom, y_offset);
            self.cursor.y = self.scroll.bottom;
        } else {
            let y = (i32::from(self.cursor.y) + y_offset).clamp(0, i32::from(self.lines) - 1);
            self.cursor.y = y as u16;
        }
    }

    /// Move the cursor to an absolute position. Never scrolls. Under
    /// `DECOM` (origin mode) `y` is relative to the scroll region and both
    /// axes clamp to the region instead of the whole grid.
    pub fn set_cursor(&mut self, y: i32, x: i32) {
        let origin = self.mode.contains(Mode::ORIGIN);
        let (top, bottom) = if origin {
            (self.scroll.top, self.scroll.bottom)
        } else {
            (0, self.lines - 1)
        };
        let y = if origin { y + i32::from(self.scroll.top) } else { y };

        let x = x.clamp(0, i32::from(self.cols) - 1);
        let y = y.clamp(i32::from(top), i32::from(bottom));

        self.cursor.x = x as u16;
        self.cursor.y = y as u16;
        self.cursor.wrap_pending = false;
    }

    /// Clear a pending auto-wrap without moving the cursor, as `DECRST 7`
    /// does when it turns auto-wrap off mid-line.
    pub fn clear_wrap_pending(&mut self) {
        self.cursor.wrap_pending = false;
    }

    /// Place an already-resolved glyph at the cursor and advance it,
    /// mirroring yaft's `add_char` movement policy: a pending wrap or a
    /// WIDE glyph landing in the last column first forces a line
    /// advance, then the glyph is written and the cursor steps forward
    /// by the written width.
    pub fn put_glyph(&mut self, glyph: GlyphRef) -> u8 {
        let is_wide = glyph.width == GlyphWidth::Wide;
        if (self.cursor.wrap_pending && self.cursor.x == self.cols - 1)
            || (is_wide && self.cursor.x == self.cols - 1)
        {
            self.set_cursor(i32::from(self.cursor.y), 0);
            self.move_cursor(1, 0);
        }
        self.cursor.wrap_pending = false;

        let width = self.set_cell(self.cursor.x, self.cursor.y, glyph);
        self.move_cursor(0, i32::from(width));
        width
    }
}
