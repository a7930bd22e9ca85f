//! WS2812 status LED
//!
//! [`PulseEncoder`] owns the data pin and a pulse channel. Each color update
//! is three bytes in the configured wire order, encoded to one symbol per
//! bit plus a trailing reset symbol, and handed to the channel one memory
//! block at a time. The call returns only after the last symbol has left
//! the pin, so two updates never overlap.

pub mod encoder;

use embedded_hal::digital::OutputPin;
use heapless::Vec;

use lumen_core::color::{hsv_degrees_to_rgb, ColorOrder, Rgb};
use lumen_core::config::LedBoardConfig;
use lumen_core::timing::{BitTiming, TickTable, REFERENCE_RESOLUTION_HZ, WS2812_TIMING};
use lumen_core::LedError;
use lumen_hal::{ChannelConfig, PulseChannel, PulseSymbol, MAX_SYMBOL_TICKS};

pub use encoder::{BytesEncoder, EncodeProgress, EncodeState, MAX_BLOCK_SYMBOLS};

/// LED driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// Pulse channel tick rate
    pub resolution_hz: u32,
    /// Symbols per channel memory block
    pub mem_block_symbols: usize,
    /// Component order on the wire
    pub color_order: ColorOrder,
    pub timing: BitTiming,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            resolution_hz: REFERENCE_RESOLUTION_HZ,
            mem_block_symbols: 48,
            color_order: ColorOrder::Grb,
            timing: WS2812_TIMING,
        }
    }
}

impl LedConfig {
    /// Driver configuration for a board description
    pub fn from_board(board: &LedBoardConfig) -> Self {
        Self {
            resolution_hz: board.resolution_hz,
            mem_block_symbols: board.mem_block_symbols as usize,
            color_order: board.color_order,
            ..Self::default()
        }
    }

    /// Symbols per block the encoder actually fills
    pub fn block_symbols(&self) -> usize {
        self.mem_block_symbols.clamp(1, MAX_BLOCK_SYMBOLS)
    }
}

/// Resources held while the LED is initialized
struct Active<P, C> {
    pin: P,
    channel: C,
    encoder: BytesEncoder,
}

/// WS2812 driver over a pulse channel
pub struct PulseEncoder<P, C> {
    config: LedConfig,
    active: Option<Active<P, C>>,
    /// Last color successfully sent
    color: Rgb,
}

impl<P, C> PulseEncoder<P, C>
where
    P: OutputPin,
    C: PulseChannel,
{
    /// Create an uninitialized driver
    pub const fn new(config: LedConfig) -> Self {
        Self {
            config,
            active: None,
            color: Rgb::OFF,
        }
    }

    /// Take the pin and channel and prepare them for transmission
    ///
    /// Tick counts are computed before any hardware is touched, so a bad
    /// resolution fails with [`LedError::Configuration`] and nothing is
    /// transmitted. An already initialized LED is released first.
    pub fn initialize(&mut self, mut pin: P, mut channel: C) -> Result<(), LedError> {
        if self.active.is_some() {
            self.deinitialize()?;
        }

        let ticks = TickTable::new(&self.config.timing, self.config.resolution_hz, MAX_SYMBOL_TICKS)?;

        pin.set_low().map_err(|_| LedError::Peripheral)?;

        let channel_config = ChannelConfig {
            resolution_hz: self.config.resolution_hz,
            mem_block_symbols: self.config.block_symbols(),
            idle_high: false,
        };
        channel
            .configure(&channel_config)
            .map_err(|_| LedError::Peripheral)?;
        let encoder = BytesEncoder::new(&ticks);
        channel.enable().map_err(|_| LedError::Peripheral)?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "LED ticks at {} Hz: T0 {}/{} T1 {}/{} reset {}",
            self.config.resolution_hz,
            ticks.t0h,
            ticks.t0l,
            ticks.t1h,
            ticks.t1l,
            ticks.reset_ticks()
        );

        self.active = Some(Active {
            pin,
            channel,
            encoder,
        });
        self.color = Rgb::OFF;
        Ok(())
    }

    /// Check if the pin and channel are held
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Last color sent; the LED itself cannot be read back
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Component order used on the wire
    pub fn color_order(&self) -> ColorOrder {
        self.config.color_order
    }

    /// Send a color and wait for the transmission to finish
    pub fn set_color(&mut self, color: Rgb) -> Result<(), LedError> {
        let order = self.config.color_order;
        let limit = self.config.block_symbols();
        let active = self.active.as_mut().ok_or(LedError::NotInitialized)?;

        active
            .channel
            .wait_idle()
            .map_err(|_| LedError::Transmit)?;

        let bytes = order.arrange(color);
        if let Err(err) = transmit(active, &bytes, limit) {
            active.encoder.reset();
            #[cfg(feature = "defmt")]
            defmt::warn!("LED transmit failed: {}", err);
            return Err(err);
        }

        self.color = color;
        Ok(())
    }

    /// Send a color given as separate components
    pub fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LedError> {
        self.set_color(Rgb::new(r, g, b))
    }

    /// Set the color from hue (degrees) and saturation/value (percent)
    ///
    /// Out-of-range inputs are clamped.
    pub fn set_hsv(&mut self, hue: u16, saturation: u8, value: u8) -> Result<(), LedError> {
        self.set_color(hsv_degrees_to_rgb(hue, saturation, value))
    }

    /// Send black
    pub fn turn_off(&mut self) -> Result<(), LedError> {
        self.set_color(Rgb::OFF)
    }

    /// Turn the LED off and give back the pin and channel
    ///
    /// Returns `Ok(None)` if the LED was not initialized. On error the LED
    /// stays initialized.
    pub fn deinitialize(&mut self) -> Result<Option<(P, C)>, LedError> {
        if self.active.is_none() {
            return Ok(None);
        }

        self.turn_off()?;
        if let Some(active) = self.active.as_mut() {
            active
                .channel
                .disable()
                .map_err(|_| LedError::Peripheral)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("LED released");

        Ok(self.active.take().map(|a| (a.pin, a.channel)))
    }
}

fn transmit<P, C: PulseChannel>(
    active: &mut Active<P, C>,
    bytes: &[u8],
    limit: usize,
) -> Result<(), LedError> {
    let mut block: Vec<PulseSymbol, MAX_BLOCK_SYMBOLS> = Vec::new();
    loop {
        let progress = active.encoder.encode(bytes, &mut block, limit);
        active
            .channel
            .write_block(&block)
            .map_err(|_| LedError::Transmit)?;
        block.clear();
        if progress == EncodeProgress::Complete {
            break;
        }
    }
    active.channel.wait_idle().map_err(|_| LedError::Transmit)
}
