//! Panel geometry
//!
//! The ST7789 controller addresses a 240x320 frame memory, while the
//! 1.47" glass only shows a 172x320 slice of it starting at column 34.
//! The rounded bezel additionally hides a thin border, so text layout
//! works inside a smaller "safe" rectangle.

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    /// Left edge
    pub x: u16,
    /// Top edge
    pub y: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.height as u32
    }

    /// Check if the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Check if the rectangle lies inside a `width` x `height` area at the origin
    ///
    /// An edge landing exactly on the limit is still inside.
    pub const fn fits_within(&self, width: u16, height: u16) -> bool {
        self.right() <= width as u32 && self.bottom() <= height as u32
    }

    /// Check if `other` lies completely inside this rectangle
    pub const fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Inclusive corner coordinates `(x0, y0, x1, y1)`
    ///
    /// Returns `None` for an empty rectangle or one reaching past `u16::MAX`.
    pub const fn corners(&self) -> Option<(u16, u16, u16, u16)> {
        if self.is_empty()
            || self.right() > u16::MAX as u32 + 1
            || self.bottom() > u16::MAX as u32 + 1
        {
            return None;
        }
        Some((
            self.x,
            self.y,
            self.x + (self.width - 1),
            self.y + (self.height - 1),
        ))
    }
}

/// Fixed geometry of a panel and its controller addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelGeometry {
    /// Visible width in pixels
    pub width: u16,
    /// Visible height in pixels
    pub height: u16,
    /// Column offset added before addressing the controller
    pub col_offset: u16,
    /// Row offset added before addressing the controller
    pub row_offset: u16,
    /// Unobstructed sub-rectangle, in panel coordinates
    pub safe_area: Rect,
}

/// Waveshare ESP32-C6-LCD-1.47 (ST7789, 172x320, portrait)
pub const ST7789_172X320: PanelGeometry = PanelGeometry {
    width: 172,
    height: 320,
    col_offset: 34,
    row_offset: 0,
    safe_area: Rect::new(6, 10, 160, 300),
};

// Safe area must stay inside the glass.
const _: () = assert!(ST7789_172X320.is_consistent());

impl PanelGeometry {
    /// The whole visible panel
    pub const fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Check that the safe area lies inside the panel and that every
    /// panel pixel maps to a 16-bit controller address
    pub const fn is_consistent(&self) -> bool {
        let max_address = u16::MAX as u32 + 1;
        self.full_rect().contains(&self.safe_area)
            && self.width as u32 + self.col_offset as u32 <= max_address
            && self.height as u32 + self.row_offset as u32 <= max_address
    }

    /// Check that a rectangle in panel coordinates is fully addressable
    pub const fn contains(&self, rect: &Rect) -> bool {
        rect.fits_within(self.width, self.height)
    }

    /// Translate a safe-area-relative rectangle into panel coordinates
    ///
    /// Returns `None` if the rectangle extends past the safe area or the
    /// result is not addressable.
    pub const fn safe_to_panel(&self, rect: &Rect) -> Option<Rect> {
        if !rect.fits_within(self.safe_area.width, self.safe_area.height) {
            return None;
        }
        let x = match rect.x.checked_add(self.safe_area.x) {
            Some(x) => x,
            None => return None,
        };
        let y = match rect.y.checked_add(self.safe_area.y) {
            Some(y) => y,
            None => return None,
        };
        Some(Rect::new(x, y, rect.width, rect.height))
    }

    /// Translate a safe-area-relative point into panel coordinates
    pub const fn safe_point(&self, x: u16, y: u16) -> (u32, u32) {
        (
            x as u32 + self.safe_area.x as u32,
            y as u32 + self.safe_area.y as u32,
        )
    }

    /// Controller column address for a panel column
    ///
    /// Saturates for geometries that fail [`Self::is_consistent`].
    pub const fn controller_col(&self, x: u16) -> u16 {
        x.saturating_add(self.col_offset)
    }

    /// Controller row address for a panel row
    pub const fn controller_row(&self, y: u16) -> u16 {
        y.saturating_add(self.row_offset)
    }
}
