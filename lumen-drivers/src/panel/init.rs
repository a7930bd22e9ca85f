//! ST7789 command set and power-on sequence

/// ST7789 commands
#[allow(dead_code)]
pub mod cmd {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
    pub const PORCTRL: u8 = 0xB2;
    pub const GCTRL: u8 = 0xB7;
    pub const VCOMS: u8 = 0xBB;
    pub const LCMCTRL: u8 = 0xC0;
    pub const VDVVRHEN: u8 = 0xC2;
    pub const VRHS: u8 = 0xC3;
    pub const VDVS: u8 = 0xC4;
    pub const FRCTRL2: u8 = 0xC6;
    pub const PWCTRL1: u8 = 0xD0;
    pub const PVGAMCTRL: u8 = 0xE0;
    pub const NVGAMCTRL: u8 = 0xE1;
}

/// 16 bits per pixel, RGB565
pub const COLMOD_RGB565: u8 = 0x55;

/// One step of the power-on sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitCommand {
    pub cmd: u8,
    pub params: &'static [u8],
    /// Settle time after the command
    pub delay_ms: u32,
}

impl InitCommand {
    const fn new(cmd: u8, params: &'static [u8], delay_ms: u32) -> Self {
        Self {
            cmd,
            params,
            delay_ms,
        }
    }
}

/// Power-on sequence for the 172x320 glass in portrait orientation
#[rustfmt::skip]
pub static INIT_SEQUENCE: [InitCommand; 17] = [
    InitCommand::new(cmd::SWRESET, &[], 150),
    InitCommand::new(cmd::SLPOUT, &[], 120),
    InitCommand::new(cmd::COLMOD, &[COLMOD_RGB565], 10),
    // Top-to-bottom, left-to-right, RGB order
    InitCommand::new(cmd::MADCTL, &[0x00], 0),
    InitCommand::new(cmd::PORCTRL, &[0x0C, 0x0C, 0x00, 0x33, 0x33], 0),
    InitCommand::new(cmd::GCTRL, &[0x35], 0),
    InitCommand::new(cmd::VCOMS, &[0x35], 0),
    InitCommand::new(cmd::LCMCTRL, &[0x2C], 0),
    InitCommand::new(cmd::VDVVRHEN, &[0x01], 0),
    InitCommand::new(cmd::VRHS, &[0x13], 0),
    InitCommand::new(cmd::VDVS, &[0x20], 0),
    // 60 Hz
    InitCommand::new(cmd::FRCTRL2, &[0x0F], 0),
    InitCommand::new(cmd::PWCTRL1, &[0xA4, 0xA1], 0),
    InitCommand::new(cmd::PVGAMCTRL, &[
        0xF0, 0xF0, 0x00, 0x04, 0x04, 0x04, 0x05, 0x29,
        0x33, 0x3E, 0x38, 0x12, 0x12, 0x28, 0x30,
    ], 0),
    InitCommand::new(cmd::NVGAMCTRL, &[
        0xF0, 0x07, 0x0A, 0x0D, 0x0B, 0x07, 0x28, 0x33,
        0x3E, 0x36, 0x14, 0x14, 0x29, 0x32,
    ], 0),
    // This glass needs inverted colors for RGB565 values to show as written
    InitCommand::new(cmd::INVON, &[], 0),
    InitCommand::new(cmd::DISPON, &[], 20),
];
