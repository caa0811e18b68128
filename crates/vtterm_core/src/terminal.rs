//! The terminal engine: a `vte::Perform` implementation driving a [`Grid`].

use std::io::Write;

use unicode_width::UnicodeWidthChar;
use vte::{Params, Perform};
use vtterm_glyph::{GlyphRef, GlyphStore, DEFAULT_CHAR, REPLACEMENT_CHAR, SUBSTITUTE_HALF, SUBSTITUTE_WIDE};
use vtterm_grid::{Cursor, Grid, Mode, ScrollRegion};

use crate::control;
use crate::csi;
use crate::error::{Result, TermError};
use crate::response;

/// A pure, in-memory VT102/ANSI terminal engine.
///
/// `Terminal` owns the screen grid and a borrowed glyph store; it consumes
/// a host-supplied byte stream one chunk at a time via [`Terminal::parse`]
/// and never performs I/O on its own. Device responses (`DA`, `DSR`/`CPR`,
/// ...) a real host would write back to the PTY are instead queued and
/// must be collected with [`Terminal::take_responses`] or
/// [`Terminal::flush_responses_to`].
pub struct Terminal<S: GlyphStore> {
    grid: Grid,
    glyphs: S,
    parser: vte::Parser,
    substitute_half: GlyphRef,
    substitute_wide: GlyphRef,
    pending_responses: Vec<u8>,
}

impl<S: GlyphStore> Terminal<S> {
    /// Build a `cols` x `lines` terminal bound to `glyphs`.
    ///
    /// `glyphs` must already have bindings for the space character, the
    /// half-width substitute, and the wide-width substitute; the engine
    /// relies on those three to always resolve so it never needs to
    /// invent a glyph at draw time.
    pub fn new(cols: u16, lines: u16, glyphs: S) -> Result<Self> {
        if cols == 0 || lines == 0 {
            return Err(TermError::InvalidDimensions { cols, lines });
        }
        let default_glyph = glyphs
            .glyph_for(DEFAULT_CHAR)
            .ok_or(TermError::MissingEssentialGlyph { code: DEFAULT_CHAR })?;
        let substitute_half = glyphs
            .glyph_for(SUBSTITUTE_HALF)
            .ok_or(TermError::MissingEssentialGlyph { code: SUBSTITUTE_HALF })?;
        let substitute_wide = glyphs
            .glyph_for(SUBSTITUTE_WIDE)
            .ok_or(TermError::MissingEssentialGlyph { code: SUBSTITUTE_WIDE })?;

        tracing::debug!(cols, lines, "initialized terminal engine");
        Ok(Self {
            grid: Grid::new(cols, lines, default_glyph),
            glyphs,
            parser: vte::Parser::new(),
            substitute_half,
            substitute_wide,
            pending_responses: Vec::new(),
        })
    }

    /// Feed a chunk of the host byte stream through the escape-sequence
    /// state machine. May be called with arbitrarily small chunks,
    /// including ones that split a UTF-8 sequence or an escape sequence
    /// across calls.
    pub fn parse(&mut self, bytes: &[u8]) {
        let mut parser = std::mem::replace(&mut self.parser, vte::Parser::new());
        parser.advance(self, bytes);
        self.parser = parser;
    }

    /// `RIS`: full terminal reset, as if freshly constructed.
    pub fn reset(&mut self) {
        self.grid.reset();
    }

    #[must_use]
    pub fn cols(&self) -> u16 {
        self.grid.cols()
    }

    #[must_use]
    pub fn lines(&self) -> u16 {
        self.grid.lines()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.grid.cursor()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.grid.mode()
    }

    #[must_use]
    pub fn scroll(&self) -> ScrollRegion {
        self.grid.scroll()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Take and clear any responses queued by device-status/identify
    /// sequences since the last call.
    pub fn take_responses(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.pending_responses)
    }

    /// Convenience wrapper around [`Terminal::take_responses`] that writes
    /// the queued bytes to `sink` with yaft's `EINTR`/`EAGAIN` retry
    /// policy (see [`response::write_response`]).
    pub fn flush_responses_to(&mut self, sink: &mut impl Write) {
        let pending = self.take_responses();
        if !pending.is_empty() {
            response::write_response(sink, &pending);
        }
    }

    fn queue_response(&mut self, bytes: &[u8]) {
        self.pending_responses.extend_from_slice(bytes);
    }

    fn add_char(&mut self, code: u16) {
        let Some(ch) = char::from_u32(u32::from(code)) else {
            return;
        };
        let width = ch.width().unwrap_or(0);
        if width == 0 {
            return;
        }
        let glyph = match self.glyphs.glyph_for(code) {
            Some(glyph) if usize::from(glyph.width.columns()) == width => glyph,
            _ => {
                if width >= 2 {
                    self.substitute_wide
                } else {
                    self.substitute_half
                }
            }
        };
        self.grid.put_glyph(glyph);
    }
}

impl<S: GlyphStore> Perform for Terminal<S> {
    fn print(&mut self, ch: char) {
        let code = if ch == '\u{FFFD}' {
            // vte surfaces malformed UTF-8 as U+FFFD; this engine's wire
            // format substitutes U+003F instead.
            REPLACEMENT_CHAR
        } else {
            u16::try_from(ch as u32).unwrap_or(REPLACEMENT_CHAR)
        };
        self.add_char(code);
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            0x08 => control::bs(&mut self.grid),
            0x09 => control::tab(&mut self.grid),
            0x0A | 0x0B | 0x0C => control::newline(&mut self.grid),
            0x0D => control::carriage_return(&mut self.grid),
            _ => {}
        }
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, byte: u8) {
        match byte {
            b'7' => self.grid.save_state(),
            b'8' => self.grid.restore_state(),
            b'D' => control::newline(&mut self.grid),
            b'E' => control::crnl(&mut self.grid),
            b'H' => control::set_tabstop(&mut self.grid),
            b'M' => control::reverse_nl(&mut self.grid),
            b'Z' => self.queue_response(csi::device_attribute()),
            b'c' => self.grid.reset(),
            _ => {}
        }
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], _ignore: bool, c: char) {
        let args: Vec<u16> = params.iter().map(|group| group[0]).collect();
        let arg = |i: usize| args.get(i).copied().unwrap_or(0);
        let private = intermediates.first() == Some(&b'?');

        match c {
            '@' => csi::insert_blank(&mut self.grid, arg(0)),
            'A' => csi::curs_up(&mut self.grid, arg(0)),
            'B' | 'e' => csi::curs_down(&mut self.grid, arg(0)),
            'C' | 'a' => csi::curs_forward(&mut self.grid, arg(0)),
            'D' => csi::curs_back(&mut self.grid, arg(0)),
            'E' => csi::curs_nl(&mut self.grid, arg(0)),
            'F' => csi::curs_pl(&mut self.grid, arg(0)),
            'G' | '`' => csi::curs_col(&mut self.grid, arg(0)),
            'H' | 'f' => csi::curs_pos(&mut self.grid, arg(0), arg(1)),
            'd' => csi::curs_line(&mut self.grid, arg(0)),
            'J' => csi::erase_display(&mut self.grid, arg(0)),
            'K' => csi::erase_line(&mut self.grid, arg(0)),
            'L' => csi::insert_line(&mut self.grid, arg(0)),
            'M' => csi::delete_line(&mut self.grid, arg(0)),
            'P' => csi::delete_char(&mut self.grid, arg(0)),
            'X' => csi::erase_char(&mut self.grid, arg(0)),
            'm' => csi::set_attr(&mut self.grid, &args),
            'n' => {
                let cursor = self.grid.cursor();
                if let Some(response) = csi::status_report(arg(0), cursor.y + 1, cursor.x + 1) {
                    self.queue_response(&response);
                }
            }
            'c' if !private => self.queue_response(csi::device_attribute()),
            'h' if private => csi::set_mode(&mut self.grid, arg(0), true),
            'l' if private => csi::set_mode(&mut self.grid, arg(0), false),
            'r' => csi::set_margin(&mut self.grid, arg(0), arg(1)),
            'g' => csi::clear_tabstop(&mut self.grid, arg(0)),
            _ => {}
        }
    }

    fn hook(&mut self, _params: &Params, _intermediates: &[u8], _ignore: bool, _c: char) {}
    fn put(&mut self, _byte: u8) {}
    fn unhook(&mut self) {}
    fn osc_dispatch(&mut self, _params: &[&[u8]], _bell_terminated: bool) {}
}
