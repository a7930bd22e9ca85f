//! Error types shared by the panel and LED drivers

use core::fmt;

/// Errors from the panel driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Drawing attempted before `initialize` succeeded
    NotInitialized,
    /// Target geometry falls outside the addressable area
    InvalidBounds,
    /// The bus or a control pin rejected a transaction
    Peripheral,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::NotInitialized => f.write_str("panel not initialized"),
            PanelError::InvalidBounds => f.write_str("coordinates outside panel"),
            PanelError::Peripheral => f.write_str("panel bus transaction failed"),
        }
    }
}

/// Pulse timing conversion errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// A duration rounded to zero ticks at the channel resolution
    ZeroTicks,
    /// A duration does not fit the symbol duration field
    DurationOverflow,
}

impl fmt::Display for TimingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimingError::ZeroTicks => f.write_str("pulse duration rounds to zero ticks"),
            TimingError::DurationOverflow => f.write_str("pulse duration exceeds symbol range"),
        }
    }
}

/// Errors from the LED pulse encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// Operation attempted before `initialize` succeeded
    NotInitialized,
    /// The channel rejected a transmission
    Transmit,
    /// Pin or channel setup failed
    Peripheral,
    /// Derived timing values are unusable
    Configuration(TimingError),
}

impl From<TimingError> for LedError {
    fn from(err: TimingError) -> Self {
        LedError::Configuration(err)
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::NotInitialized => f.write_str("LED not initialized"),
            LedError::Transmit => f.write_str("LED transmission rejected"),
            LedError::Peripheral => f.write_str("LED channel setup failed"),
            LedError::Configuration(err) => write!(f, "LED configuration error: {}", err),
        }
    }
}
