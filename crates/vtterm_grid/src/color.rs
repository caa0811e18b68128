//! Color pairs and the 256-color SGR quantizer.

/// Foreground/background color indices attached to a cell.
///
/// Indices 0-7 are the normal ANSI colors, 8-15 their bright variants,
/// 16-231 the 6x6x6 RGB cube, and 232-255 a 24-step grayscale ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fg: u8,
    pub bg: u8,
}

/// The default terminal color pair after RIS: white on black.
pub const DEFAULT_FG: u8 = 7;
pub const DEFAULT_BG: u8 = 0;

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: DEFAULT_FG,
            bg: DEFAULT_BG,
        }
    }
}

/// Amount BOLD/BLINK brighten a normal-range (0-7) color index.
pub const BRIGHT_INC: u8 = 8;

/// Quantize a 24-bit RGB triple (SGR `38;2;r;g;b` / `48;2;r;g;b`) down to a
/// 256-color palette index.
///
/// An exact `r == g == b` lands on the 24-step grayscale ramp (`232..=255`,
/// `0x08` to `0xEE` in steps of `0x0A`); anything else quantizes into the
/// 6x6x6 RGB cube (`16..=231`), breaking ties between adjacent cube steps
/// toward the *upper* step, matching the reference quantizer this is
/// ported from bit-for-bit, quirk included: a `padding <= 0` remainder
/// maps to ramp index 232, identically to an exact `padding == 0` match,
/// rather than rounding down into the cube.
#[must_use]
pub fn rgb2index(r: u8, g: u8, b: u8) -> u8 {
    const STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

    if r == g && g == b {
        let padding = (i32::from(r) - 8) / 10;
        if padding >= 24 {
            // index 231 (0xFFFFFF) is the last color of the 6x6x6 cube
            return 231;
        }
        if padding <= 0 {
            return 232;
        }
        return 232 + padding as u8;
    }

    let to_cube_step = |c: u8| -> u8 {
        for i in 0..5 {
            let (lo, hi) = (STEPS[i], STEPS[i + 1]);
            if lo <= c && c <= hi {
                let small = i32::from(c) - i32::from(lo);
                let big = i32::from(hi) - i32::from(c);
                return if small < big { i as u8 } else { (i + 1) as u8 };
            }
        }
        unreachable!("0..=255 is always covered by the step table")
    };

    16 + 36 * to_cube_step(r) + 6 * to_cube_step(g) + to_cube_step(b)
}
