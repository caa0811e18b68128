//! C0 control characters and the plain (non-CSI) `ESC` sequences.

use vtterm_grid::{CellWidth, Grid, Mode};

/// `BS`: move left one column, or two when [`Mode::VWBS`] is set and the
/// cursor sits immediately right of a WIDE glyph's placeholder half.
pub fn bs(grid: &mut Grid) {
    let cursor = grid.cursor();
    let step = if grid.mode().contains(Mode::VWBS)
        && cursor.x >= 1
        && grid.cell(cursor.x - 1, cursor.y).width == CellWidth::NextToWide
    {
        -2
    } else {
        -1
    };
    grid.move_cursor(0, step);
}

/// `HT`: advance to the next tab stop, or the last column if there is
/// none to the right.
pub fn tab(grid: &mut Grid) {
    let cursor = grid.cursor();
    let last = grid.cols() - 1;
    let mut x = cursor.x + 1;
    while x < last && !grid.is_tabstop(x) {
        x += 1;
    }
    grid.set_cursor(i32::from(cursor.y), i32::from(x.min(last)));
}

/// `LF`/`VT`/`FF`: move down one line, scrolling at the bottom margin.
pub fn newline(grid: &mut Grid) {
    grid.move_cursor(1, 0);
}

/// `CR`: move to column 0 of the current line.
pub fn carriage_return(grid: &mut Grid) {
    let y = grid.cursor().y;
    grid.set_cursor(i32::from(y), 0);
}

/// `CR` immediately followed by `LF`, as used by `ESC E` (NEL).
pub fn crnl(grid: &mut Grid) {
    carriage_return(grid);
    newline(grid);
}

/// `ESC M` (RI): move up one line, scrolling at the top margin.
pub fn reverse_nl(grid: &mut Grid) {
    grid.move_cursor(-1, 0);
}

/// `ESC H` (HTS): set a tab stop at the cursor's current column.
pub fn set_tabstop(grid: &mut Grid) {
    let x = grid.cursor().x;
    grid.set_tabstop(x, true);
}
