//! Error types surfaced by the terminal engine.

use derive_more::{Display, Error, From};

/// Failures that can occur while constructing or driving a [`crate::Terminal`].
#[derive(Debug, Display, Error, From)]
pub enum TermError {
    /// `cols` or `lines` was zero; a grid must have at least one cell.
    #[display("invalid terminal dimensions: {cols}x{lines}")]
    InvalidDimensions { cols: u16, lines: u16 },

    /// The glyph store did not bind one of the glyphs the engine requires
    /// to be present before it can erase cells or substitute missing
    /// characters (space, the half-width substitute, the wide-width
    /// substitute).
    #[display("glyph store is missing an essential glyph: {code:#06x}")]
    MissingEssentialGlyph { code: u16 },

    /// Writing a device response (DA, DSR/CPR, ...) back to the host
    /// failed after retrying transient errors.
    #[display("failed to write terminal response: {_0}")]
    #[from]
    ResponseWrite(std::io::Error),
}

pub type Result<T> = std::result::Result<T, TermError>;
