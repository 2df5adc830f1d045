//! Display glyphs.
//!
//! A glyph is one display position: an ASCII character plus the decimal
//! point that sits to its right. Mapping characters to segments belongs to
//! the panel driver.
//!
//! Text is converted at compile time:
//!
//! ```rust
//! use els_common::glyph::{text, value, Glyph};
//!
//! const BANNER: [Glyph; 8] = text("TOO FAST");
//! const PITCH: [Glyph; 4] = value("1.25");
//! assert!(PITCH[1].has_point());
//! assert_eq!(BANNER[0].char(), 'T');
//! ```

use std::fmt;

use crate::consts::{MESSAGE_WIDTH, VALUE_WIDTH};

/// One display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    ch: u8,
    point: bool,
}

/// Glyphs of a full-width message frame.
pub type MessageGlyphs = [Glyph; MESSAGE_WIDTH];

/// Glyphs of the value display.
pub type ValueGlyphs = [Glyph; VALUE_WIDTH];

impl Glyph {
    /// Unlit position.
    pub const BLANK: Self = Self {
        ch: b' ',
        point: false,
    };

    /// Glyph for an ASCII character. Letters are shown upper case.
    #[inline]
    pub const fn new(ch: u8) -> Self {
        Self {
            ch: ch.to_ascii_uppercase(),
            point: false,
        }
    }

    /// Same glyph with its decimal point lit.
    #[inline]
    pub const fn with_point(self) -> Self {
        Self {
            ch: self.ch,
            point: true,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        self.ch as char
    }

    #[inline]
    pub const fn has_point(self) -> bool {
        self.point
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

/// A blank value display.
pub const VALUE_BLANK: ValueGlyphs = [Glyph::BLANK; VALUE_WIDTH];

/// Parse `s` into at most `N` glyphs; `.` lights the point of the previous
/// glyph. Returns the glyphs (left-aligned) and how many were used.
const fn parse<const N: usize>(s: &str) -> ([Glyph; N], usize) {
    let bytes = s.as_bytes();
    let mut out = [Glyph::BLANK; N];
    let mut len = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'.' && len > 0 && !out[len - 1].point {
            out[len - 1].point = true;
        } else {
            assert!(len < N, "text does not fit the display");
            out[len] = if b == b'.' {
                Glyph::BLANK.with_point()
            } else {
                Glyph::new(b)
            };
            len += 1;
        }
        i += 1;
    }
    (out, len)
}

/// Left-aligned text, blank padded. Panics (at compile time in const
/// context) when the text does not fit.
pub const fn text<const N: usize>(s: &str) -> [Glyph; N] {
    parse::<N>(s).0
}

/// Right-aligned numeric value, blank padded on the left.
pub const fn value<const N: usize>(s: &str) -> [Glyph; N] {
    let (parsed, len) = parse::<N>(s);
    let mut out = [Glyph::BLANK; N];
    let shift = N - len;
    let mut i = 0;
    while i < len {
        out[i + shift] = parsed[i];
        i += 1;
    }
    out
}

/// `Display` adapter for a glyph sequence, used in logs.
#[derive(Debug, Clone, Copy)]
pub struct GlyphText<'a>(pub &'a [Glyph]);

impl fmt::Display for GlyphText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for g in self.0 {
            write!(f, "{}", g.char())?;
            if g.has_point() {
                f.write_str(".")?;
            }
        }
        Ok(())
    }
}
