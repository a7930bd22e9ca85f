//! Text layout
//!
//! Word-wrap for the 8x8 font inside a bounded area. The layout only
//! computes glyph positions; the panel driver walks the placements and
//! draws each glyph.
//!
//! Rules:
//! - Glyphs advance horizontally by their scaled width, with no spacing
//! - A glyph that would cross the right edge moves to a new line
//! - `'\n'` always starts a new line
//! - Lines advance by the scaled glyph height plus [`LINE_GAP`]
//! - Wrapped lines restart at the caller's x
//! - Layout stops silently once a new line would cross the bottom edge

use core::fmt;
use core::iter::FusedIterator;
use core::str::Chars;

use heapless::String;

use crate::error::PanelError;
use crate::font::GLYPH_SIZE;

/// Vertical gap between wrapped lines in pixels
pub const LINE_GAP: u16 = 2;

/// Extent of a laid-out block of text, relative to its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBounds {
    /// Widest line in pixels
    pub width: u16,
    /// Height from the origin to the bottom of the last line
    pub height: u16,
    /// Number of lines started
    pub lines: u16,
}

/// Position of one glyph produced by [`WrapLayout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphPlacement {
    pub ch: char,
    pub x: u16,
    pub y: u16,
}

/// Scaled glyph edge length, with scale 0 treated as 1
pub const fn glyph_extent(scale: u8) -> u16 {
    let scale = if scale == 0 { 1 } else { scale };
    GLYPH_SIZE * scale as u16
}

/// Iterator over glyph placements for wrapped text
///
/// Coordinates are relative to the layout area, whose top-left corner is
/// (0, 0). Once iteration finishes, [`WrapLayout::bounds`] reports the
/// extent covered.
#[derive(Debug, Clone)]
pub struct WrapLayout<'a> {
    chars: Chars<'a>,
    origin_x: u32,
    origin_y: u32,
    cursor_x: u32,
    cursor_y: u32,
    max_x: u32,
    glyph: u32,
    area_width: u32,
    area_height: u32,
    lines: u16,
    done: bool,
}

impl<'a> WrapLayout<'a> {
    /// Start a layout at (`x`, `y`) inside an `area_width` x `area_height` area
    ///
    /// Fails with [`PanelError::InvalidBounds`] if not even one glyph fits
    /// at the origin.
    pub fn new(
        text: &'a str,
        x: u16,
        y: u16,
        scale: u8,
        area_width: u16,
        area_height: u16,
    ) -> Result<Self, PanelError> {
        let glyph = glyph_extent(scale) as u32;
        if x as u32 + glyph > area_width as u32 || y as u32 + glyph > area_height as u32 {
            return Err(PanelError::InvalidBounds);
        }

        Ok(Self {
            chars: text.chars(),
            origin_x: x as u32,
            origin_y: y as u32,
            cursor_x: x as u32,
            cursor_y: y as u32,
            max_x: x as u32,
            glyph,
            area_width: area_width as u32,
            area_height: area_height as u32,
            lines: 1,
            done: false,
        })
    }

    /// Extent covered by the placements produced so far
    pub fn bounds(&self) -> TextBounds {
        TextBounds {
            width: (self.max_x - self.origin_x) as u16,
            height: (self.cursor_y - self.origin_y + self.glyph) as u16,
            lines: self.lines,
        }
    }

    /// Run the layout to completion and return its bounds
    pub fn measure(mut self) -> TextBounds {
        self.by_ref().for_each(drop);
        self.bounds()
    }

    fn new_line(&mut self) -> bool {
        let next_y = self.cursor_y + self.glyph + LINE_GAP as u32;
        if next_y + self.glyph > self.area_height {
            self.done = true;
            return false;
        }
        self.cursor_x = self.origin_x;
        self.cursor_y = next_y;
        self.lines += 1;
        true
    }
}

impl Iterator for WrapLayout<'_> {
    type Item = GlyphPlacement;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(ch) = self.chars.next() else {
                self.done = true;
                break;
            };

            if ch == '\n' {
                self.new_line();
                continue;
            }

            if self.cursor_x + self.glyph > self.area_width && !self.new_line() {
                break;
            }

            let placement = GlyphPlacement {
                ch,
                x: self.cursor_x as u16,
                y: self.cursor_y as u16,
            };
            self.cursor_x += self.glyph;
            self.max_x = self.max_x.max(self.cursor_x);
            return Some(placement);
        }
        None
    }
}

impl FusedIterator for WrapLayout<'_> {}

/// Fixed-capacity text buffer that drops output past its capacity
///
/// Formatting into it never fails for lack of space; the overflow is cut
/// at a character boundary and [`TruncatingBuffer::is_truncated`] is set.
#[derive(Debug, Clone, Default)]
pub struct TruncatingBuffer<const N: usize> {
    buf: String<N>,
    truncated: bool,
}

impl<const N: usize> TruncatingBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            buf: String::new(),
            truncated: false,
        }
    }

    /// Text written so far
    pub fn as_str(&self) -> &str {
        self.buf.as_str()
    }

    /// Check if any output was dropped
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Drop the contents and the truncation flag
    pub fn clear(&mut self) {
        self.buf.clear();
        self.truncated = false;
    }
}

impl<const N: usize> fmt::Write for TruncatingBuffer<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for ch in s.chars() {
            if self.buf.push(ch).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

/// Format `args` into a buffer of `N` bytes, truncating on overflow
pub fn format_truncated<const N: usize>(args: fmt::Arguments<'_>) -> TruncatingBuffer<N> {
    let mut buf = TruncatingBuffer::new();
    // Only a failing Display impl can error here; keep what was written
    let _ = fmt::write(&mut buf, args);
    buf
}
