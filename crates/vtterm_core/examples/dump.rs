//! Feed a byte stream through the terminal engine and dump the resulting
//! screen as plain text.
//!
//! # Usage
//!
//! ```bash
//! printf '\x1b[1;31mhello\x1b[0m\nworld' | cargo run --example dump -p vtterm_core
//! ```

use std::io::{self, Read, Write};

use vtterm_core::{GlyphTable, Terminal};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .expect("failed to read stdin");

    let mut term =
        Terminal::new(80, 24, GlyphTable::ascii_for_tests()).expect("failed to build terminal");
    term.parse(&input);

    let mut responses = Vec::new();
    let pending = term.take_responses();
    responses.extend_from_slice(&pending);
    if !responses.is_empty() {
        tracing::info!(bytes = responses.len(), "host would write a response here");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for y in 0..term.lines() {
        for x in 0..term.cols() {
            let cell = term.grid().cell(x, y);
            let code = cell
                .glyph
                .and_then(|g| char::from_u32(g.id.get()))
                .unwrap_or(' ');
            write!(out, "{code}").ok();
        }
        writeln!(out).ok();
    }
}
