//! Status presentation
//!
//! Renders a [`StatusSnapshot`] to the panel and mirrors the connectivity
//! state on the status LED.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use lumen_core::status::{StatusSnapshot, UtcOffset};
use lumen_core::{LedError, PanelError, Rgb, Rgb565};
use lumen_hal::PulseChannel;

use crate::led::PulseEncoder;
use crate::panel::PanelDriver;

/// Space between stacked status lines
const SECTION_GAP: u16 = 6;

/// Text-only status page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusScreen {
    pub title: &'static str,
    pub fg: Rgb565,
    pub bg: Rgb565,
    /// Title and clock color
    pub accent: Rgb565,
    /// Scale of the body lines
    pub scale: u8,
    /// Zone the clock is shown in
    pub utc_offset: UtcOffset,
}

impl Default for StatusScreen {
    fn default() -> Self {
        Self {
            title: "Lumen",
            fg: Rgb565::WHITE,
            bg: Rgb565::BLACK,
            accent: Rgb565::CYAN,
            scale: 1,
            utc_offset: UtcOffset::UTC,
        }
    }
}

impl StatusScreen {
    /// Redraw the whole page
    ///
    /// Each line starts right below the previous one. Returns the
    /// safe-area y coordinate just past the last line.
    pub fn render<SPI, DC, RST, D>(
        &self,
        panel: &mut PanelDriver<SPI, DC, RST, D>,
        status: &StatusSnapshot,
    ) -> Result<u16, PanelError>
    where
        SPI: SpiDevice,
        DC: OutputPin,
        RST: OutputPin,
        D: DelayNs,
    {
        panel.fill_safe_area(self.bg)?;

        let mut y = 0;
        let bounds = panel.draw_wrapped_text(0, y, self.title, self.accent, self.bg, 2)?;
        y += bounds.height + SECTION_GAP;

        let wifi_color = match status.indicator_color() {
            Rgb::OFF => self.fg,
            c => c.to_rgb565(),
        };
        let bounds = panel.draw_fmt(
            0,
            y,
            wifi_color,
            self.bg,
            self.scale,
            format_args!("WiFi: {}", status.wifi.label()),
        )?;
        y += bounds.height + SECTION_GAP;

        let bounds = match status.ip {
            Some(ip) => panel.draw_fmt(0, y, self.fg, self.bg, self.scale, format_args!("IP: {}", ip))?,
            None => panel.draw_wrapped_text(0, y, "IP: --", self.fg, self.bg, self.scale)?,
        };
        y += bounds.height + SECTION_GAP;

        let bounds = match status.rssi {
            Some(rssi) => panel.draw_fmt(
                0,
                y,
                self.fg,
                self.bg,
                self.scale,
                format_args!("RSSI: {} dBm", rssi),
            )?,
            None => panel.draw_wrapped_text(0, y, "RSSI: --", self.fg, self.bg, self.scale)?,
        };
        y += bounds.height + SECTION_GAP;

        let bounds = panel.draw_fmt(
            0,
            y,
            self.fg,
            self.bg,
            self.scale,
            format_args!("Time ({}): {}", self.utc_offset, status.time_sync.label()),
        )?;
        y += bounds.height + SECTION_GAP;

        let bounds = match status.local_time_of_day(self.utc_offset) {
            Some(time) => panel.draw_fmt(
                0,
                y,
                self.accent,
                self.bg,
                2,
                format_args!("{}", time),
            )?,
            None => panel.draw_wrapped_text(0, y, "--:--:--", self.accent, self.bg, 2)?,
        };
        Ok(y + bounds.height)
    }
}

/// Drives the status LED from connectivity state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusIndicator {
    /// Color last sent, if any
    shown: Option<Rgb>,
}

impl StatusIndicator {
    /// Create an indicator that has shown nothing yet
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Show the color for `status`, skipping the update if it is unchanged
    ///
    /// Returns true if the LED was updated.
    pub fn update<P, C>(
        &mut self,
        led: &mut PulseEncoder<P, C>,
        status: &StatusSnapshot,
    ) -> Result<bool, LedError>
    where
        P: OutputPin,
        C: PulseChannel,
    {
        let color = status.indicator_color();
        if self.shown == Some(color) {
            return Ok(false);
        }
        led.set_color(color)?;
        self.shown = Some(color);
        Ok(true)
    }

    /// Forget the shown color so the next update always transmits
    pub fn invalidate(&mut self) {
        self.shown = None;
    }
}
