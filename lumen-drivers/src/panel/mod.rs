//! ST7789 panel driver
//!
//! Drives the controller over a write-only SPI device plus a data/command
//! select line. Every drawing call opens an address window (CASET, RASET,
//! RAMWR) and then streams RGB565 pixels, high byte first, which the
//! controller stores row-major inside the window.
//!
//! Nothing is buffered on the host beyond a small chunk buffer, so large
//! fills go out as several back-to-back data writes.

pub mod backlight;
mod init;

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Operation, SpiDevice};
use heapless::Vec;

use lumen_core::config::{PanelBoardConfig, LCD_SPI_FREQ_HZ};
use lumen_core::font::{self, GLYPH_SIZE};
use lumen_core::geometry::{PanelGeometry, Rect, ST7789_172X320};
use lumen_core::text::{format_truncated, glyph_extent, TruncatingBuffer, WrapLayout};
use lumen_core::{PanelError, Rgb565, TextBounds};
use lumen_hal::{Mode, SpiConfig};

pub use backlight::Backlight;
pub use init::{cmd, InitCommand, INIT_SEQUENCE};

/// Pixels held by the streaming buffer
pub const CHUNK_PIXELS: usize = 256;

/// Largest glyph scale the driver draws
///
/// A scale 21 glyph is 168 pixels, the widest that fits the 172 pixel glass.
pub const MAX_GLYPH_SCALE: u8 = 21;

const MAX_GLYPH_EXTENT: usize = MAX_GLYPH_SCALE as usize * GLYPH_SIZE as usize;

/// Bytes reserved for one expanded glyph row
const GLYPH_ROW_BYTES: usize = MAX_GLYPH_EXTENT * 2;

/// Capacity of the formatted-text buffer in bytes
pub const FORMAT_BUFFER_LEN: usize = 128;

/// What to do when a power-on register write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupErrorPolicy {
    /// Log and continue with the next command
    #[default]
    Tolerate,
    /// Abort initialization with the error
    Propagate,
}

/// Panel driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub geometry: PanelGeometry,
    /// Bus settings the board layer should apply to the SPI device
    pub spi: SpiConfig,
    pub setup_policy: SetupErrorPolicy,
    /// Time the reset line is held low
    pub reset_low_ms: u32,
    /// Time to wait after releasing reset
    pub reset_settle_ms: u32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            geometry: ST7789_172X320,
            spi: SpiConfig::from_mode(LCD_SPI_FREQ_HZ, Mode::Mode0),
            setup_policy: SetupErrorPolicy::Tolerate,
            reset_low_ms: 100,
            reset_settle_ms: 100,
        }
    }
}

impl PanelConfig {
    /// Driver configuration for a board description
    ///
    /// An out-of-range SPI mode falls back to mode 0.
    pub fn from_board(board: &PanelBoardConfig) -> Self {
        let mode = Mode::from_index(board.spi_mode).unwrap_or(Mode::Mode0);
        Self {
            spi: SpiConfig::from_mode(board.spi_frequency, mode),
            ..Self::default()
        }
    }
}

/// ST7789 panel driver
pub struct PanelDriver<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
    config: PanelConfig,
    initialized: bool,
    /// Streaming buffer, RGB565 big-endian
    chunk: [u8; CHUNK_PIXELS * 2],
    /// One expanded row per font row
    glyph_rows: [u8; GLYPH_SIZE as usize * GLYPH_ROW_BYTES],
}

impl<SPI, DC, RST, D> PanelDriver<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a driver; the panel is untouched until [`Self::initialize`]
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D, config: PanelConfig) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
            config,
            initialized: false,
            chunk: [0; CHUNK_PIXELS * 2],
            glyph_rows: [0; GLYPH_SIZE as usize * GLYPH_ROW_BYTES],
        }
    }

    /// Reset the controller and run the power-on sequence
    ///
    /// Reset line failures always abort. Failures of individual setup
    /// commands follow [`PanelConfig::setup_policy`]. A geometry whose safe
    /// area or controller offsets do not fit is rejected with
    /// [`PanelError::InvalidBounds`] before the panel is touched.
    pub fn initialize(&mut self) -> Result<(), PanelError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Initializing ST7789 panel");

        self.initialized = false;
        if !self.config.geometry.is_consistent() {
            #[cfg(feature = "defmt")]
            defmt::error!("Panel geometry inconsistent: {}", self.config.geometry);
            return Err(PanelError::InvalidBounds);
        }
        self.dc.set_low().map_err(|_| PanelError::Peripheral)?;

        self.rst.set_low().map_err(|_| PanelError::Peripheral)?;
        self.delay.delay_ms(self.config.reset_low_ms);
        self.rst.set_high().map_err(|_| PanelError::Peripheral)?;
        self.delay.delay_ms(self.config.reset_settle_ms);

        for step in INIT_SEQUENCE.iter() {
            if let Err(err) = self.command(step.cmd, step.params) {
                match self.config.setup_policy {
                    SetupErrorPolicy::Tolerate => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("Setup command {=u8:#x} failed, continuing", step.cmd);
                    }
                    SetupErrorPolicy::Propagate => return Err(err),
                }
            }
            if step.delay_ms > 0 {
                self.delay.delay_ms(step.delay_ms);
            }
        }

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "ST7789 panel ready ({}x{})",
            self.config.geometry.width,
            self.config.geometry.height
        );
        Ok(())
    }

    /// Check if the power-on sequence has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Panel geometry in use
    pub fn geometry(&self) -> &PanelGeometry {
        &self.config.geometry
    }

    /// Current driver configuration
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Give back the peripherals
    pub fn release(self) -> (SPI, DC, RST, D) {
        (self.spi, self.dc, self.rst, self.delay)
    }

    /// Turn the display output on or off (frame memory is kept)
    pub fn set_display_on(&mut self, on: bool) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        self.write_command(if on { cmd::DISPON } else { cmd::DISPOFF })
    }

    /// Enable or disable color inversion
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        self.write_command(if inverted { cmd::INVON } else { cmd::INVOFF })
    }

    /// Select the inclusive panel rectangle that subsequent pixels fill
    pub fn set_address_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        let g = &self.config.geometry;
        if x0 > x1 || y0 > y1 || x1 >= g.width || y1 >= g.height {
            return Err(PanelError::InvalidBounds);
        }
        self.write_window(x0, y0, x1, y1)
    }

    /// Fill a panel rectangle with one color
    ///
    /// An empty rectangle is a no-op.
    pub fn fill(&mut self, color: Rgb565, rect: Rect) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        if !self.config.geometry.contains(&rect) {
            return Err(PanelError::InvalidBounds);
        }
        let Some((x0, y0, x1, y1)) = rect.corners() else {
            return Ok(());
        };

        self.write_window(x0, y0, x1, y1)?;
        self.stream_solid(color, rect.area() as usize)
    }

    /// Fill the whole visible panel
    pub fn fill_screen(&mut self, color: Rgb565) -> Result<(), PanelError> {
        let rect = self.config.geometry.full_rect();
        self.fill(color, rect)
    }

    /// Fill the unobstructed safe area
    pub fn fill_safe_area(&mut self, color: Rgb565) -> Result<(), PanelError> {
        let rect = self.config.geometry.safe_area;
        self.fill(color, rect)
    }

    /// Fill a rectangle given relative to the safe area
    pub fn fill_safe_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Rgb565,
    ) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        let rect = self
            .config
            .geometry
            .safe_to_panel(&Rect::new(x, y, width, height))
            .ok_or(PanelError::InvalidBounds)?;
        self.fill(color, rect)
    }

    /// Set a single panel pixel
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), PanelError> {
        self.fill(color, Rect::new(x, y, 1, 1))
    }

    /// Draw one character cell, scaled by nearest neighbor
    ///
    /// Set font bits use `fg`, clear bits `bg`. A scale of 0 draws at 1.
    /// The whole cell goes out as one SPI transaction. Scales above
    /// [`MAX_GLYPH_SCALE`] fail with [`PanelError::InvalidBounds`].
    pub fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
    ) -> Result<(), PanelError> {
        self.ensure_initialized()?;
        let extent = glyph_extent(scale);
        let rect = Rect::new(x, y, extent, extent);
        if extent as usize > MAX_GLYPH_EXTENT || !self.config.geometry.contains(&rect) {
            return Err(PanelError::InvalidBounds);
        }
        let (x0, y0, x1, y1) = rect.corners().ok_or(PanelError::InvalidBounds)?;

        // Scaled rows repeat their font row, so expand each font row once
        let scale = extent / GLYPH_SIZE;
        let row_len = extent as usize * 2;
        let bitmap = font::glyph(ch);
        let fg = fg.to_be_bytes();
        let bg = bg.to_be_bytes();
        for (font_row, row) in self.glyph_rows.chunks_exact_mut(GLYPH_ROW_BYTES).enumerate() {
            for (col, px) in row[..row_len].chunks_exact_mut(2).enumerate() {
                let set = font::pixel_set(bitmap, col as u16 / scale, font_row as u16);
                px.copy_from_slice(if set { &fg } else { &bg });
            }
        }

        self.write_window(x0, y0, x1, y1)?;
        self.dc.set_high().map_err(|_| PanelError::Peripheral)?;

        let mut ops: Vec<Operation<'_, u8>, MAX_GLYPH_EXTENT> = Vec::new();
        for row in 0..extent {
            let start = (row / scale) as usize * GLYPH_ROW_BYTES;
            ops.push(Operation::Write(&self.glyph_rows[start..start + row_len]))
                .map_err(|_| PanelError::InvalidBounds)?;
        }
        self.spi
            .transaction(&mut ops)
            .map_err(|_| PanelError::Peripheral)
    }

    /// Draw a single line of text
    ///
    /// Stops at the first character that would cross the panel edge and
    /// returns how many characters were drawn.
    pub fn draw_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
    ) -> Result<usize, PanelError> {
        self.ensure_initialized()?;
        let limit = self.config.geometry.full_rect();
        self.draw_line_within(x as u32, y as u32, text, fg, bg, scale, limit)
    }

    /// Draw a single line of text relative to the safe area, clipped to it
    pub fn draw_safe_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
    ) -> Result<usize, PanelError> {
        self.ensure_initialized()?;
        let g = &self.config.geometry;
        let (px, py) = g.safe_point(x, y);
        let limit = g.safe_area;
        self.draw_line_within(px, py, text, fg, bg, scale, limit)
    }

    /// Draw text relative to the safe area with word wrap
    ///
    /// Returns the extent covered so callers can place more text below.
    /// Fails with [`PanelError::InvalidBounds`] if no glyph fits at the
    /// origin; text past the bottom of the safe area is dropped.
    pub fn draw_wrapped_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
    ) -> Result<TextBounds, PanelError> {
        self.ensure_initialized()?;
        let safe = self.config.geometry.safe_area;
        let mut layout = WrapLayout::new(text, x, y, scale, safe.width, safe.height)?;
        for placement in layout.by_ref() {
            self.draw_glyph(
                placement.x + safe.x,
                placement.y + safe.y,
                placement.ch,
                fg,
                bg,
                scale,
            )?;
        }
        Ok(layout.bounds())
    }

    /// Format and draw wrapped text
    ///
    /// Output past [`FORMAT_BUFFER_LEN`] bytes is cut off.
    pub fn draw_fmt(
        &mut self,
        x: u16,
        y: u16,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
        args: fmt::Arguments<'_>,
    ) -> Result<TextBounds, PanelError> {
        self.ensure_initialized()?;
        let text: TruncatingBuffer<FORMAT_BUFFER_LEN> = format_truncated(args);
        self.draw_wrapped_text(x, y, text.as_str(), fg, bg, scale)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line_within(
        &mut self,
        x: u32,
        y: u32,
        text: &str,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
        limit: Rect,
    ) -> Result<usize, PanelError> {
        let extent = glyph_extent(scale) as u32;
        if x < limit.x as u32 || y < limit.y as u32 || y + extent > limit.bottom() {
            return Ok(0);
        }

        let mut cursor = x;
        let mut drawn = 0;
        for ch in text.chars() {
            if cursor + extent > limit.right() {
                break;
            }
            // Both coordinates are inside `limit`, so they fit in u16
            self.draw_glyph(cursor as u16, y as u16, ch, fg, bg, scale)?;
            cursor += extent;
            drawn += 1;
        }
        Ok(drawn)
    }

    fn ensure_initialized(&self) -> Result<(), PanelError> {
        if self.initialized {
            Ok(())
        } else {
            Err(PanelError::NotInitialized)
        }
    }

    fn write_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), PanelError> {
        let g = &self.config.geometry;
        let cols = window_bytes(g.controller_col(x0), g.controller_col(x1));
        let rows = window_bytes(g.controller_row(y0), g.controller_row(y1));

        self.command(cmd::CASET, &cols)?;
        self.command(cmd::RASET, &rows)?;
        self.write_command(cmd::RAMWR)
    }

    /// Stream `pixels` copies of one color as pixel data
    fn stream_solid(&mut self, color: Rgb565, pixels: usize) -> Result<(), PanelError> {
        let bytes = color.to_be_bytes();
        let prepared = pixels.min(CHUNK_PIXELS);
        for px in self.chunk[..prepared * 2].chunks_exact_mut(2) {
            px.copy_from_slice(&bytes);
        }

        self.dc.set_high().map_err(|_| PanelError::Peripheral)?;
        let mut remaining = pixels;
        while remaining > 0 {
            let count = remaining.min(CHUNK_PIXELS);
            self.write_chunk(count * 2)?;
            remaining -= count;
        }
        Ok(())
    }

    fn write_chunk(&mut self, len: usize) -> Result<(), PanelError> {
        self.spi
            .write(&self.chunk[..len])
            .map_err(|_| PanelError::Peripheral)
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), PanelError> {
        self.write_command(command)?;
        if !params.is_empty() {
            self.write_data(params)?;
        }
        Ok(())
    }

    fn write_command(&mut self, command: u8) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Peripheral)?;
        self.spi
            .write(&[command])
            .map_err(|_| PanelError::Peripheral)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), PanelError> {
        self.dc.set_high().map_err(|_| PanelError::Peripheral)?;
        self.spi.write(data).map_err(|_| PanelError::Peripheral)
    }
}

/// Start/end address pair, both big-endian
fn window_bytes(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}
