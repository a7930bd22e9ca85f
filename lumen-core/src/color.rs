//! Color space utilities
//!
//! Conversions shared by the panel and LED drivers:
//! - RGB888 to packed RGB565 for the LCD controller
//! - HSV to RGB888 for the status LED
//! - Reordering of RGB888 components into LED wire order

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 24-bit color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);
    pub const MAGENTA: Self = Self::new(255, 0, 255);
    pub const CYAN: Self = Self::new(0, 255, 255);
    pub const ORANGE: Self = Self::new(255, 165, 0);
    pub const PURPLE: Self = Self::new(128, 0, 128);

    /// Create a color from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if all channels are zero
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Pack into RGB565, dropping the low bits of each channel
    pub const fn to_rgb565(self) -> Rgb565 {
        Rgb565::from_rgb(self.r, self.g, self.b)
    }
}

/// 16-bit packed pixel: 5 bits red, 6 bits green, 5 bits blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const CYAN: Self = Self(0x07FF);

    /// Pack 8-bit channels into RGB565
    ///
    /// Red and blue lose their low 3 bits, green its low 2 bits.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// Raw packed value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// 5-bit red field
    pub const fn red5(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1F
    }

    /// 6-bit green field
    pub const fn green6(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3F
    }

    /// 5-bit blue field
    pub const fn blue5(self) -> u8 {
        self.0 as u8 & 0x1F
    }

    /// Bytes in controller wire order (high byte first)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<Rgb> for Rgb565 {
    fn from(color: Rgb) -> Self {
        color.to_rgb565()
    }
}

/// Maximum hue in degrees
pub const HUE_MAX: u16 = 360;

/// Maximum saturation/value in percent
pub const PERCENT_MAX: u8 = 100;

/// Convert HSV to RGB using the six-region integer algorithm
///
/// `hue` is in the wrapped 0-255 representation; saturation and value are
/// 0-255. Each region spans 43 hue steps.
pub fn hsv_to_rgb(hue: u8, saturation: u8, value: u8) -> Rgb {
    if saturation == 0 {
        return Rgb::new(value, value, value);
    }

    let h = hue as u32;
    let s = saturation as u32;
    let v = value as u32;

    let region = h / 43;
    let remainder = (h - region * 43) * 6;

    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;

    match region {
        0 => Rgb::new(value, t, p),
        1 => Rgb::new(q, value, p),
        2 => Rgb::new(p, value, t),
        3 => Rgb::new(p, q, value),
        4 => Rgb::new(t, p, value),
        _ => Rgb::new(value, p, q),
    }
}

/// Convert HSV given in degrees and percent to RGB
///
/// Inputs are clamped to hue 0-360 and saturation/value 0-100 before the
/// percentages are rescaled to 0-255 and the hue is wrapped to 0-255.
pub fn hsv_degrees_to_rgb(hue: u16, saturation: u8, value: u8) -> Rgb {
    let hue = hue.min(HUE_MAX);
    let saturation = saturation.min(PERCENT_MAX);
    let value = value.min(PERCENT_MAX);

    let h8 = (hue as u32 * 255 / HUE_MAX as u32) as u8;
    let s8 = (saturation as u32 * 255 / PERCENT_MAX as u32) as u8;
    let v8 = (value as u32 * 255 / PERCENT_MAX as u32) as u8;

    hsv_to_rgb(h8, s8, v8)
}

/// Order in which color components go out on the LED data line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorOrder {
    /// Red, green, blue
    Rgb,
    /// Green, red, blue (WS2812 datasheet order)
    #[default]
    Grb,
    /// Blue, red, green
    Brg,
    /// Blue, green, red
    Bgr,
    /// Red, blue, green
    Rbg,
    /// Green, blue, red
    Gbr,
}

impl ColorOrder {
    /// Arrange a color into the three bytes sent on the wire
    pub const fn arrange(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            ColorOrder::Rgb => [r, g, b],
            ColorOrder::Grb => [g, r, b],
            ColorOrder::Brg => [b, r, g],
            ColorOrder::Bgr => [b, g, r],
            ColorOrder::Rbg => [r, b, g],
            ColorOrder::Gbr => [g, b, r],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rgb565_named_colors() {
        assert_eq!(Rgb::RED.to_rgb565(), Rgb565::RED);
        assert_eq!(Rgb::GREEN.to_rgb565(), Rgb565::GREEN);
        assert_eq!(Rgb::BLUE.to_rgb565(), Rgb565::BLUE);
        assert_eq!(Rgb::WHITE.to_rgb565(), Rgb565::WHITE);
        assert_eq!(Rgb::YELLOW.to_rgb565(), Rgb565::YELLOW);
        assert_eq!(Rgb::CYAN.to_rgb565(), Rgb565::CYAN);
        assert_eq!(Rgb::MAGENTA.to_rgb565(), Rgb565::MAGENTA);
        assert_eq!(Rgb::OFF.to_rgb565(), Rgb565::BLACK);
    }

    #[test]
    fn test_rgb565_truncates_low_bits() {
        // 0x07 in red/blue and 0x03 in green are all below the kept precision
        assert_eq!(Rgb565::from_rgb(0x07, 0x03, 0x07), Rgb565::BLACK);
        assert_eq!(Rgb565::from_rgb(0x08, 0x04, 0x08).raw(), 0x0821);
    }

    #[test]
    fn test_rgb565_wire_bytes() {
        assert_eq!(Rgb565::RED.to_be_bytes(), [0xF8, 0x00]);
        assert_eq!(Rgb565::BLUE.to_be_bytes(), [0x00, 0x1F]);
    }

    #[test]
    fn test_hsv_primary_regions() {
        // Full saturation, full value at region starts
        assert_eq!(hsv_to_rgb(0, 255, 255), Rgb::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(86, 255, 255).g, 255);
        assert_eq!(hsv_to_rgb(172, 255, 255).b, 255);
    }

    #[test]
    fn test_hsv_degrees_clamping() {
        assert_eq!(hsv_degrees_to_rgb(361, 100, 100), hsv_degrees_to_rgb(360, 100, 100));
        assert_eq!(hsv_degrees_to_rgb(120, 150, 50), hsv_degrees_to_rgb(120, 100, 50));
        assert_eq!(hsv_degrees_to_rgb(120, 50, 200), hsv_degrees_to_rgb(120, 50, 100));
    }

    #[test]
    fn test_hsv_degrees_zero_value_is_off() {
        assert!(hsv_degrees_to_rgb(200, 100, 0).is_off());
    }

    #[test]
    fn test_color_order_arrange() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(ColorOrder::Rgb.arrange(c), [1, 2, 3]);
        assert_eq!(ColorOrder::Grb.arrange(c), [2, 1, 3]);
        assert_eq!(ColorOrder::Brg.arrange(c), [3, 1, 2]);
        assert_eq!(ColorOrder::Bgr.arrange(c), [3, 2, 1]);
        assert_eq!(ColorOrder::Rbg.arrange(c), [1, 3, 2]);
        assert_eq!(ColorOrder::Gbr.arrange(c), [2, 3, 1]);
        assert_eq!(ColorOrder::default(), ColorOrder::Grb);
    }

    proptest! {
        #[test]
        fn prop_rgb565_keeps_top_bits(r: u8, g: u8, b: u8) {
            let packed = Rgb565::from_rgb(r, g, b);
            prop_assert_eq!(packed.red5(), r >> 3);
            prop_assert_eq!(packed.green6(), g >> 2);
            prop_assert_eq!(packed.blue5(), b >> 3);
        }

        #[test]
        fn prop_zero_saturation_is_gray(hue in 0u16..=360, value in 0u8..=255) {
            let h8 = (hue as u32 * 255 / 360) as u8;
            prop_assert_eq!(hsv_to_rgb(h8, 0, value), Rgb::new(value, value, value));
        }

        #[test]
        fn prop_zero_saturation_degrees_is_gray(hue in 0u16..=360, value in 0u8..=100) {
            let rgb = hsv_degrees_to_rgb(hue, 0, value);
            prop_assert_eq!(rgb.r, rgb.g);
            prop_assert_eq!(rgb.g, rgb.b);
        }

        #[test]
        fn prop_hue_clamped_above_360(hue in 361u16..=u16::MAX, s in 0u8..=100, v in 0u8..=100) {
            prop_assert_eq!(hsv_degrees_to_rgb(hue, s, v), hsv_degrees_to_rgb(360, s, v));
        }

        #[test]
        fn prop_saturation_clamped_above_100(hue in 0u16..=360, s in 101u8..=255, v in 0u8..=100) {
            prop_assert_eq!(hsv_degrees_to_rgb(hue, s, v), hsv_degrees_to_rgb(hue, 100, v));
        }
    }
}
