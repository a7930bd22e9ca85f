//! Board configuration
//!
//! Pin assignments and peripheral settings for the Waveshare
//! ESP32-C6-LCD-1.47. A board layer passes these to the chip HAL when it
//! claims the SPI bus, GPIOs and pulse channel, then hands the resulting
//! peripherals to the drivers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::ColorOrder;

/// Default LCD SPI clock
pub const LCD_SPI_FREQ_HZ: u32 = 40_000_000;

/// Default pulse channel resolution (1 tick = 100 ns)
pub const LED_RESOLUTION_HZ: u32 = 10_000_000;

/// Default pulse channel memory block size in symbols
pub const LED_MEM_BLOCK_SYMBOLS: u16 = 48;

/// Backlight level applied at boot, in percent
pub const DEFAULT_BACKLIGHT_PERCENT: u8 = 78;

/// LCD wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelPins {
    /// SPI MOSI (shared with the SD slot)
    pub mosi: u8,
    /// SPI clock (shared with the SD slot)
    pub sclk: u8,
    /// Chip select
    pub cs: u8,
    /// Data/command select
    pub dc: u8,
    /// Controller reset (active low)
    pub rst: u8,
    /// Backlight PWM output
    pub backlight: u8,
}

impl Default for PanelPins {
    fn default() -> Self {
        Self {
            mosi: 6,
            sclk: 7,
            cs: 14,
            dc: 15,
            rst: 21,
            backlight: 22,
        }
    }
}

/// Panel bus settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelBoardConfig {
    pub pins: PanelPins,
    /// SPI clock in Hz
    pub spi_frequency: u32,
    /// SPI mode (0-3)
    pub spi_mode: u8,
    /// Backlight level at boot (0-100)
    pub backlight_percent: u8,
}

impl Default for PanelBoardConfig {
    fn default() -> Self {
        Self {
            pins: PanelPins::default(),
            spi_frequency: LCD_SPI_FREQ_HZ,
            spi_mode: 0,
            backlight_percent: DEFAULT_BACKLIGHT_PERCENT,
        }
    }
}

/// Status LED wiring and channel settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedBoardConfig {
    /// Data pin
    pub data_pin: u8,
    /// Pulse channel tick rate
    pub resolution_hz: u32,
    /// Symbols per channel memory block
    pub mem_block_symbols: u16,
    /// Component order on the wire
    pub color_order: ColorOrder,
}

impl Default for LedBoardConfig {
    fn default() -> Self {
        Self {
            data_pin: 8,
            resolution_hz: LED_RESOLUTION_HZ,
            mem_block_symbols: LED_MEM_BLOCK_SYMBOLS,
            color_order: ColorOrder::Grb,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub panel: PanelBoardConfig,
    pub led: LedBoardConfig,
}

impl BoardConfig {
    /// Check for settings no driver can work with
    ///
    /// Returns the name of the first offending field.
    pub fn validate(&self) -> Result<(), &'static str> {
        let p = &self.panel.pins;
        let panel_pins = [p.mosi, p.sclk, p.cs, p.dc, p.rst, p.backlight];
        for (i, a) in panel_pins.iter().enumerate() {
            if panel_pins[i + 1..].contains(a) {
                return Err("panel.pins");
            }
        }
        if panel_pins.contains(&self.led.data_pin) {
            return Err("led.data_pin");
        }
        if self.panel.spi_frequency == 0 {
            return Err("panel.spi_frequency");
        }
        if self.panel.spi_mode > 3 {
            return Err("panel.spi_mode");
        }
        if self.panel.backlight_percent > 100 {
            return Err("panel.backlight_percent");
        }
        if self.led.resolution_hz == 0 {
            return Err("led.resolution_hz");
        }
        if self.led.mem_block_symbols == 0 {
            return Err("led.mem_block_symbols");
        }
        Ok(())
    }
}
