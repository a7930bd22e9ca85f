//! Board-agnostic core logic for the Lumen display board
//!
//! This crate contains everything that does not touch hardware:
//!
//! - Color space conversion (RGB565 packing, HSV, LED wire order)
//! - Panel geometry and safe-area translation
//! - 8x8 bitmap font and word-wrap layout
//! - LED pulse timing tables
//! - Board default configuration
//! - Connectivity status model and notifications

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod font;
pub mod geometry;
pub mod status;
pub mod text;
pub mod timing;

pub use color::{ColorOrder, Rgb, Rgb565};
pub use error::{LedError, PanelError, TimingError};
pub use geometry::{PanelGeometry, Rect};
pub use text::TextBounds;
