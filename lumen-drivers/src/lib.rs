//! Peripheral drivers for the Lumen display board
//!
//! Two independent protocol engines plus the status helpers built on them:
//!
//! - ST7789 SPI panel (address windows, fills, 8x8 text with wrap)
//! - PWM backlight
//! - WS2812 status LED over a pulse channel
//! - Status page rendering and LED status indication
//!
//! The engines share no state. Each one is an owned object and callers
//! serialize access to it.

#![no_std]
#![deny(unsafe_code)]

pub mod led;
pub mod panel;
pub mod status;

#[cfg(test)]
mod mock;

pub use led::{LedConfig, PulseEncoder};
pub use panel::{Backlight, PanelConfig, PanelDriver, SetupErrorPolicy};
pub use status::{StatusIndicator, StatusScreen};
