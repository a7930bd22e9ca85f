//! Lumen Hardware Abstraction Layer
//!
//! This crate defines the hardware seams that a chip-specific HAL has to
//! fill in before the Lumen drivers can run on it. Digital pins, delays,
//! PWM and the SPI device itself come from `embedded-hal` 1.0; this crate
//! only covers what `embedded-hal` does not model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / status coordinator       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  lumen-drivers (panel, pulse encoder)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  lumen-hal    │
//! │ SPI/GPIO/PWM  │       │ PulseChannel  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`pulse::PulseChannel`] - Timed two-level pulse generation (RMT-style)
//! - [`spi::SpiConfig`] - Bus settings handed to the board layer

#![no_std]
#![deny(unsafe_code)]

pub mod pulse;
pub mod spi;

pub use pulse::{ChannelConfig, PulseChannel, PulseSymbol, MAX_SYMBOL_TICKS};
pub use spi::{Mode, Phase, Polarity, SpiConfig};
