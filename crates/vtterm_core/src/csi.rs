//! The CSI (`ESC [`) command table.
//!
//! Each function here implements one final byte's worth of behavior
//! against a [`Grid`], matching the semantics of yaft's `csi_func` table.
//! Parameter decoding (missing/zero defaults to 1, except where a command
//! defines its own default) happens in [`count`]; assembling raw `vte`
//! parameters into the typed arguments these functions expect is
//! [`crate::terminal::Terminal`]'s job.

use crate::control::carriage_return;
use vtterm_grid::{rgb2index, Attribute, ColorPair, Grid, Mode, ScrollRegion, DEFAULT_BG, DEFAULT_FG};

/// A missing or zero CSI parameter means "1" for every counted command.
fn count(param: u16) -> u16 {
    if param == 0 {
        1
    } else {
        param
    }
}

/// `ICH`: shift the cells from the cursor to the end of line right by
/// `n`, erasing `n` cells at the cursor.
pub fn insert_blank(grid: &mut Grid, n: u16) {
    let cursor = grid.cursor();
    let cols = grid.cols();
    let n = count(n).min(cols - cursor.x);
    let mut x = cols;
    while x > cursor.x + n {
        x -= 1;
        grid.copy_cell(x, cursor.y, x - n, cursor.y);
    }
    for x in cursor.x..cursor.x + n {
        grid.erase_cell(x, cursor.y);
    }
}

/// `CUU`
pub fn curs_up(grid: &mut Grid, n: u16) {
    grid.move_cursor(-i32::from(count(n)), 0);
}

/// `CUD`
pub fn curs_down(grid: &mut Grid, n: u16) {
    grid.move_cursor(i32::from(count(n)), 0);
}

/// `CUF`
pub fn curs_forward(grid: &mut Grid, n: u16) {
    grid.move_cursor(0, i32::from(count(n)));
}

/// `CUB`
pub fn curs_back(grid: &mut Grid, n: u16) {
    grid.move_cursor(0, -i32::from(count(n)));
}

/// `CNL`: down `n` lines, then to column 0.
pub fn curs_nl(grid: &mut Grid, n: u16) {
    grid.move_cursor(i32::from(count(n)), 0);
    carriage_return(grid);
}

/// `CPL`: up `n` lines, then to column 0.
pub fn curs_pl(grid: &mut Grid, n: u16) {
    grid.move_cursor(-i32::from(count(n)), 0);
    carriage_return(grid);
}

/// `CHA`: absolute column, same row.
///
/// Passes the cursor's current (already-absolute) row back through
/// [`Grid::set_cursor`] exactly as yaft's `curs_col` calls
/// `set_cursor(term, term->cursor.y, num)`. Under `DECOM` this means the
/// row is re-offset by `scroll.top` a second time — a quirk of the
/// source, preserved rather than fixed; see `DESIGN.md`.
pub fn curs_col(grid: &mut Grid, n: u16) {
    let y = grid.cursor().y;
    grid.set_cursor(i32::from(y), i32::from(count(n)) - 1);
}

/// `CUP`/`HVP`: absolute row and column, both 1-based.
pub fn curs_pos(grid: &mut Grid, row: u16, col: u16) {
    grid.set_cursor(i32::from(count(row)) - 1, i32::from(count(col)) - 1);
}

/// `VPA`: absolute row, same column.
pub fn curs_line(grid: &mut Grid, row: u16) {
    let x = grid.cursor().x;
    grid.set_cursor(i32::from(count(row)) - 1, i32::from(x));
}

/// `ED`: 0 = cursor to end of screen, 1 = start of screen to cursor,
/// 2 = whole screen.
pub fn erase_display(grid: &mut Grid, mode: u16) {
    let cursor = grid.cursor();
    let cols = grid.cols();
    let lines = grid.lines();
    match mode {
        0 => {
            for x in cursor.x..cols {
                grid.erase_cell(x, cursor.y);
            }
            for y in cursor.y + 1..lines {
                grid.erase_row(y);
            }
        }
        1 => {
            for y in 0..cursor.y {
                grid.erase_row(y);
            }
            for x in 0..=cursor.x {
                grid.erase_cell(x, cursor.y);
            }
        }
        2 => {
            for y in 0..lines {
                grid.erase_row(y);
            }
        }
        _ => {}
    }
}

/// `EL`: 0 = cursor to end of line, 1 = start of line to cursor,
/// 2 = whole line.
pub fn erase_line(grid: &mut Grid, mode: u16) {
    let cursor = grid.cursor();
    let cols = grid.cols();
    match mode {
        0 => {
            for x in cursor.x..cols {
                grid.erase_cell(x, cursor.y);
            }
        }
        1 => {
            for x in 0..=cursor.x {
                grid.erase_cell(x, cursor.y);
            }
        }
        2 => grid.erase_row(cursor.y),
        _ => {}
    }
}

/// `IL`: insert `n` blank lines at the cursor row, pushing
/// `[cursor.y, scroll.bottom]` down. Outside `DECOM` this applies even if
/// the cursor sits outside the scroll region; under `DECOM` it is a no-op
/// in that case, matching yaft's ORIGIN-mode asymmetry.
pub fn insert_line(grid: &mut Grid, n: u16) {
    let cursor = grid.cursor();
    let scroll = grid.scroll();
    if grid.mode().contains(Mode::ORIGIN) && (cursor.y < scroll.top || cursor.y > scroll.bottom) {
        return;
    }
    grid.scroll_window(cursor.y, scroll.bottom, -i32::from(count(n)));
}

/// `DL`: delete `n` lines at the cursor row, pulling `[cursor.y,
/// scroll.bottom]` up. Same `DECOM`-gated asymmetry as [`insert_line`].
pub fn delete_line(grid: &mut Grid, n: u16) {
    let cursor = grid.cursor();
    let scroll = grid.scroll();
    if grid.mode().contains(Mode::ORIGIN) && (cursor.y < scroll.top || cursor.y > scroll.bottom) {
        return;
    }
    grid.scroll_window(cursor.y, scroll.bottom, i32::from(count(n)));
}

/// `DCH`: delete `n` cells at the cursor, shifting the remainder of the
/// line left and blanking the vacated columns at the end.
pub fn delete_char(grid: &mut Grid, n: u16) {
    let cursor = grid.cursor();
    let cols = grid.cols();
    let n = count(n).min(cols - cursor.x);
    for x in cursor.x..cols - n {
        grid.copy_cell(x, cursor.y, x + n, cursor.y);
    }
    for x in cols - n..cols {
        grid.erase_cell(x, cursor.y);
    }
}

/// `ECH`: erase `n` cells starting at the cursor, without shifting
/// anything.
pub fn erase_char(grid: &mut Grid, n: u16) {
    let cursor = grid.cursor();
    let cols = grid.cols();
    let n = count(n).min(cols - cursor.x);
    for x in cursor.x..cursor.x + n {
        grid.erase_cell(x, cursor.y);
    }
}

/// `SGR`: apply a run of attribute/color parameters. An empty parameter
/// list resets to plain white-on-black, same as an explicit `0`. `1,4,5,7`
/// set an attribute bit; `21,24,25,27` clear the matching one (`21` clears
/// bold, not "double underline").
pub fn set_attr(grid: &mut Grid, params: &[u16]) {
    if params.is_empty() {
        grid.set_attribute(Attribute::empty());
        grid.set_color(ColorPair::default());
        return;
    }

    let mut attr = grid.attribute();
    let mut color = grid.color();
    let mut i = 0;
    while i < params.len() {
        match params[i] {
            0 => {
                attr = Attribute::empty();
                color = ColorPair::default();
            }
            1 => attr.insert(Attribute::BOLD),
            4 => attr.insert(Attribute::UNDERLINE),
            5 => attr.insert(Attribute::BLINK),
            7 => attr.insert(Attribute::REVERSE),
            // yaft's attr_mask[num - 20]: 21 clears the same bit 1 sets
            // (bold), not "double underline" as some terminals read it.
            21 => attr.remove(Attribute::BOLD),
            24 => attr.remove(Attribute::UNDERLINE),
            25 => attr.remove(Attribute::BLINK),
            27 => attr.remove(Attribute::REVERSE),
            p @ 30..=37 => color.fg = (p - 30) as u8,
            38 => i += apply_extended_color(&mut color.fg, &params[i + 1..]),
            39 => color.fg = DEFAULT_FG,
            p @ 40..=47 => color.bg = (p - 40) as u8,
            48 => i += apply_extended_color(&mut color.bg, &params[i + 1..]),
            49 => color.bg = DEFAULT_BG,
            p @ 90..=97 => color.fg = (p - 90) as u8 + 8,
            p @ 100..=107 => color.bg = (p - 100) as u8 + 8,
            _ => {}
        }
        i += 1;
    }
    grid.set_attribute(attr);
    grid.set_color(color);
}

/// Handles `38;5;N`, `38;2;r;g;b` (and their `48;...` background twins).
/// `rest` is the parameter slice *after* the `38`/`48`. Returns how many
/// extra parameters were consumed so the caller's index can skip them.
fn apply_extended_color(slot: &mut u8, rest: &[u16]) -> usize {
    match rest.first() {
        Some(5) => {
            if let Some(&idx) = rest.get(1) {
                *slot = idx as u8;
            }
            2
        }
        Some(2) => {
            if let (Some(&r), Some(&g), Some(&b)) = (rest.get(1), rest.get(2), rest.get(3)) {
                *slot = rgb2index(r as u8, g as u8, b as u8);
            }
            4
        }
        _ => 0,
    }
}

/// `DA`: identify as a VT102-class device.
#[must_use]
pub fn device_attribute() -> &'static [u8] {
    b"\x1b[?6c"
}

/// `DSR`: status report. `5` is a generic "OK", `6` is a cursor position
/// report, `15` is an always-ready printer status.
#[must_use]
pub fn status_report(mode: u16, cursor_row: u16, cursor_col: u16) -> Option<Vec<u8>> {
    match mode {
        5 => Some(b"\x1b[0n".to_vec()),
        6 => Some(format!("\x1b[{cursor_row};{cursor_col}R").into_bytes()),
        15 => Some(b"\x1b[?13n".to_vec()),
        _ => None,
    }
}

/// `DECSET`/`DECRST` (private-marker `h`/`l`): modes 6 (DECOM), 7
/// (DECAWM), 25 (DECTCEM) and 8901 (variable-width backspace) are
/// recognized; anything else is ignored. Toggling DECOM homes the cursor
/// and turning DECAWM off drops a pending wrap, matching yaft's
/// `set_mode`/`reset_mode`.
pub fn set_mode(grid: &mut Grid, mode: u16, enable: bool) {
    match mode {
        6 => {
            grid.mode_mut().set(Mode::ORIGIN, enable);
            grid.set_cursor(0, 0);
        }
        7 => {
            grid.mode_mut().set(Mode::AUTO_WRAP, enable);
            if !enable {
                grid.clear_wrap_pending();
            }
        }
        25 => grid.mode_mut().set(Mode::CURSOR_VISIBLE, enable),
        8901 => grid.mode_mut().set(Mode::VWBS, enable),
        _ => {}
    }
}

/// `DECSTBM`: set the scroll margins (1-based, inclusive) and home the
/// cursor. A degenerate region (`top >= bottom`) is rejected outright —
/// neither the margins nor the cursor are touched, matching yaft's early
/// `return` before either side effect.
pub fn set_margin(grid: &mut Grid, top: u16, bottom: u16) {
    let lines = grid.lines();
    let top = top.saturating_sub(1);
    let bottom = if bottom == 0 {
        lines - 1
    } else {
        (bottom - 1).min(lines - 1)
    };
    if top >= bottom {
        return;
    }
    grid.set_scroll(ScrollRegion { top, bottom });
    grid.set_cursor(0, 0);
}

/// `TBC`: `0` clears the tab stop at the cursor, `3` clears every tab
/// stop.
pub fn clear_tabstop(grid: &mut Grid, mode: u16) {
    match mode {
        0 => {
            let x = grid.cursor().x;
            grid.set_tabstop(x, false);
        }
        3 => grid.clear_all_tabstops(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::num::NonZeroU32;
    use vtterm_glyph::{GlyphRef, GlyphWidth};

    fn glyph(code: u16) -> GlyphRef {
        GlyphRef {
            id: NonZeroU32::new(u32::from(code)).unwrap(),
            width: GlyphWidth::Half,
        }
    }

    #[test]
    fn curs_pos_is_one_based_and_absolute() {
        let mut grid = Grid::new(10, 10, glyph(0x20));
        curs_pos(&mut grid, 3, 5);
        assert_eq!(grid.cursor().y, 2);
        assert_eq!(grid.cursor().x, 4);
    }

    #[test]
    fn curs_col_reoffsets_row_under_origin_mode_matching_source_quirk() {
        // Under DECOM, `set_cursor` adds `scroll.top` to whatever row it is
        // given. `curs_col` hands it the cursor's already-absolute row, so
        // under origin mode the row drifts downward by another `scroll.top`
        // (here clamped at `scroll.bottom`) instead of staying put. This
        // mirrors yaft's own `curs_col`/`set_cursor` bit-for-bit.
        let mut grid = Grid::new(10, 10, glyph(0x20));
        grid.set_scroll(ScrollRegion { top: 3, bottom: 8 });
        grid.mode_mut().insert(Mode::ORIGIN);
        grid.set_cursor(2, 0);
        assert_eq!(grid.cursor().y, 5);
        curs_col(&mut grid, 6);
        assert_eq!(grid.cursor().y, 8);
        assert_eq!(grid.cursor().x, 5);
    }

    #[test]
    fn erase_display_mode_two_clears_whole_screen() {
        let mut grid = Grid::new(5, 3, glyph(0x20));
        grid.set_cell(0, 0, glyph(b'X' as u16));
        erase_display(&mut grid, 2);
        assert_eq!(grid.cell(0, 0).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn erase_line_mode_zero_clears_from_cursor_to_end() {
        let mut grid = Grid::new(5, 3, glyph(0x20));
        grid.set_cell(4, 0, glyph(b'X' as u16));
        grid.set_cursor(0, 2);
        erase_line(&mut grid, 0);
        assert_eq!(grid.cell(4, 0).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn delete_char_shifts_remainder_left() {
        let mut grid = Grid::new(5, 1, glyph(0x20));
        grid.set_cell(2, 0, glyph(b'X' as u16));
        grid.set_cursor(0, 0);
        delete_char(&mut grid, 1);
        assert_eq!(grid.cell(1, 0).glyph, Some(glyph(b'X' as u16)));
        assert_eq!(grid.cell(4, 0).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn insert_blank_shifts_remainder_right_and_blanks_at_cursor() {
        let mut grid = Grid::new(5, 1, glyph(0x20));
        grid.set_cell(1, 0, glyph(b'X' as u16));
        grid.set_cursor(0, 0);
        insert_blank(&mut grid, 1);
        assert_eq!(grid.cell(2, 0).glyph, Some(glyph(b'X' as u16)));
        assert_eq!(grid.cell(0, 0).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn insert_line_pushes_region_down_from_cursor() {
        let mut grid = Grid::new(3, 4, glyph(0x20));
        grid.set_cell(0, 1, glyph(b'X' as u16));
        grid.set_cursor(1, 0);
        insert_line(&mut grid, 1);
        assert_eq!(grid.cell(0, 2).glyph, Some(glyph(b'X' as u16)));
        assert_eq!(grid.cell(0, 1).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn insert_line_outside_scroll_region_is_noop_under_origin_mode() {
        let mut grid = Grid::new(3, 4, glyph(0x20));
        grid.set_scroll(ScrollRegion { top: 1, bottom: 2 });
        grid.mode_mut().insert(Mode::ORIGIN);
        grid.set_cell(0, 0, glyph(b'X' as u16));
        grid.set_cursor(0, 0);
        insert_line(&mut grid, 1);
        assert_eq!(grid.cell(0, 0).glyph, Some(glyph(b'X' as u16)));
    }

    #[test]
    fn insert_line_outside_scroll_region_still_applies_without_origin_mode() {
        let mut grid = Grid::new(3, 4, glyph(0x20));
        grid.set_scroll(ScrollRegion { top: 1, bottom: 2 });
        grid.set_cell(0, 0, glyph(b'X' as u16));
        grid.set_cursor(0, 0);
        insert_line(&mut grid, 1);
        // scroll_window(0, 2, -1) pulls row 1 up into row 0, discarding the
        // original row 0 content and blanking row 2.
        assert_eq!(grid.cell(0, 0).glyph, Some(glyph(0x20)));
    }

    #[test]
    fn set_attr_empty_params_resets() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        grid.set_attribute(Attribute::BOLD);
        set_attr(&mut grid, &[]);
        assert_eq!(grid.attribute(), Attribute::empty());
        assert_eq!(grid.color(), ColorPair::default());
    }

    #[test]
    fn set_attr_applies_bold_and_foreground() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        set_attr(&mut grid, &[1, 31]);
        assert_eq!(grid.attribute(), Attribute::BOLD);
        assert_eq!(grid.color().fg, 1);
    }

    #[test]
    fn set_attr_21_24_25_27_clear_matching_bits() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        set_attr(&mut grid, &[1, 4, 5, 7]);
        assert_eq!(
            grid.attribute(),
            Attribute::BOLD | Attribute::UNDERLINE | Attribute::BLINK | Attribute::REVERSE
        );
        set_attr(&mut grid, &[21, 24, 25, 27]);
        assert_eq!(grid.attribute(), Attribute::empty());
    }

    #[test]
    fn set_attr_21_clears_bold_not_double_underline() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        set_attr(&mut grid, &[1, 4]);
        set_attr(&mut grid, &[21]);
        assert_eq!(grid.attribute(), Attribute::UNDERLINE);
    }

    #[test]
    fn set_attr_handles_extended_256_color_foreground() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        set_attr(&mut grid, &[38, 5, 200]);
        assert_eq!(grid.color().fg, 200);
    }

    #[test]
    fn set_attr_handles_extended_truecolor_background() {
        let mut grid = Grid::new(3, 3, glyph(0x20));
        set_attr(&mut grid, &[48, 2, 255, 255, 255]);
        assert_eq!(grid.color().bg, rgb2index(255, 255, 255));
    }

    #[test]
    fn set_mode_8901_toggles_variable_width_backspace() {
        let mut grid = Grid::new(5, 5, glyph(0x20));
        set_mode(&mut grid, 8901, true);
        assert!(grid.mode().contains(Mode::VWBS));
        set_mode(&mut grid, 8901, false);
        assert!(!grid.mode().contains(Mode::VWBS));
    }

    #[test]
    fn set_mode_disabling_autowrap_drops_pending_wrap() {
        let mut grid = Grid::new(5, 5, glyph(0x20));
        grid.set_cursor(0, 4);
        grid.move_cursor(0, 1);
        assert!(grid.cursor().wrap_pending);
        set_mode(&mut grid, 7, false);
        assert!(!grid.cursor().wrap_pending);
    }

    #[test]
    fn set_margin_homes_cursor_and_rejects_degenerate_region() {
        let mut grid = Grid::new(5, 10, glyph(0x20));
        set_margin(&mut grid, 3, 7);
        assert_eq!(grid.scroll(), ScrollRegion { top: 2, bottom: 6 });
        assert_eq!(grid.cursor().x, 0);
        assert_eq!(grid.cursor().y, 0);

        grid.set_cursor(5, 3);
        set_margin(&mut grid, 5, 5);
        assert_eq!(grid.scroll(), ScrollRegion { top: 2, bottom: 6 });
        assert_eq!(grid.cursor().y, 5);
        assert_eq!(grid.cursor().x, 3);
    }

    #[test]
    fn status_report_formats_cursor_position_report() {
        assert_eq!(status_report(6, 3, 9), Some(b"\x1b[3;9R".to_vec()));
    }

    #[test]
    fn device_attribute_identifies_as_vt102_class() {
        assert_eq!(device_attribute(), b"\x1b[?6c");
    }
}
