//! Pulse-generation channel abstraction
//!
//! Models a peripheral that plays back a list of two-level pulse symbols
//! with tick-exact durations, such as the ESP32 RMT transmitter. Each
//! symbol holds two (level, duration) halves; durations are counted in
//! ticks of the channel resolution and must fit the hardware's 15-bit
//! duration field.
//!
//! The channel owns a small symbol memory block. Callers hand it one block
//! at a time with [`PulseChannel::write_block`]; the channel appends the
//! block to the running transmission. [`PulseChannel::wait_idle`] blocks
//! until every submitted symbol has left the pin.

/// Largest duration a single symbol half can encode
pub const MAX_SYMBOL_TICKS: u16 = 0x7FFF;

/// One pulse symbol: two consecutive level/duration pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseSymbol {
    /// Level of the first half (true = high)
    pub level0: bool,
    /// Duration of the first half in ticks
    pub duration0: u16,
    /// Level of the second half (true = high)
    pub level1: bool,
    /// Duration of the second half in ticks
    pub duration1: u16,
}

impl PulseSymbol {
    /// A high pulse followed by a low pulse
    pub const fn high_low(high_ticks: u16, low_ticks: u16) -> Self {
        Self {
            level0: true,
            duration0: high_ticks,
            level1: false,
            duration1: low_ticks,
        }
    }

    /// A symbol that holds the line low for both halves
    pub const fn low(first_ticks: u16, second_ticks: u16) -> Self {
        Self {
            level0: false,
            duration0: first_ticks,
            level1: false,
            duration1: second_ticks,
        }
    }

    /// Total duration of both halves in ticks
    pub const fn total_ticks(&self) -> u32 {
        self.duration0 as u32 + self.duration1 as u32
    }
}

/// Channel allocation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelConfig {
    /// Tick frequency in Hz
    pub resolution_hz: u32,
    /// Number of symbols the channel memory block holds
    pub mem_block_symbols: usize,
    /// Line level while the channel is idle
    pub idle_high: bool,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            resolution_hz: 10_000_000,
            mem_block_symbols: 48,
            idle_high: false,
        }
    }
}

/// Pulse-generation channel
///
/// Implementations drive the actual peripheral. All calls block the caller
/// until the hardware has accepted (or, for `wait_idle`, finished) the
/// request.
pub trait PulseChannel {
    /// Error type for channel operations
    type Error;

    /// Allocate and configure the channel
    fn configure(&mut self, config: &ChannelConfig) -> Result<(), Self::Error>;

    /// Enable the channel so it can transmit
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Disable the channel and release its resources
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Append a block of symbols to the current transmission
    ///
    /// The block never exceeds `mem_block_symbols` from the configuration.
    fn write_block(&mut self, symbols: &[PulseSymbol]) -> Result<(), Self::Error>;

    /// Wait until every submitted symbol has been transmitted
    fn wait_idle(&mut self) -> Result<(), Self::Error>;
}
