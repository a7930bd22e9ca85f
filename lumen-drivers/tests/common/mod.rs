//! Host-side stand-ins for the board peripherals

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::pwm::{ErrorType as PwmErrorType, SetDutyCycle};
use embedded_hal::spi::{ErrorType as SpiErrorType, Operation, SpiDevice};
use lumen_hal::{ChannelConfig, PulseChannel, PulseSymbol};

/// Bytes written to the panel, tagged with the DC level at the time
#[derive(Debug, Default)]
pub struct Wire {
    pub dc_high: bool,
    pub writes: Vec<(bool, Vec<u8>)>,
    pub delay_ms: u32,
}

impl Wire {
    pub fn commands(&self) -> Vec<u8> {
        self.writes
            .iter()
            .filter(|(data, _)| !data)
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }

    pub fn data_len(&self) -> usize {
        self.writes
            .iter()
            .filter(|(data, _)| *data)
            .map(|(_, bytes)| bytes.len())
            .sum()
    }
}

pub type SharedWire = Rc<RefCell<Wire>>;

pub struct Spi(pub SharedWire);

impl SpiErrorType for Spi {
    type Error = Infallible;
}

impl SpiDevice for Spi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut wire = self.0.borrow_mut();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                let dc = wire.dc_high;
                wire.writes.push((dc, bytes.to_vec()));
            }
        }
        Ok(())
    }
}

pub struct Dc(pub SharedWire);

impl PinErrorType for Dc {
    type Error = Infallible;
}

impl OutputPin for Dc {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().dc_high = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct Pin {
    pub high: bool,
}

impl PinErrorType for Pin {
    type Error = Infallible;
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high = true;
        Ok(())
    }
}

pub struct Delay(pub SharedWire);

impl DelayNs for Delay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().delay_ms += ms;
    }
}

pub struct Pwm {
    pub duty: u16,
}

impl PwmErrorType for Pwm {
    type Error = Infallible;
}

impl SetDutyCycle for Pwm {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
        self.duty = duty;
        Ok(())
    }
}

#[derive(Default)]
pub struct Channel {
    pub config: Option<ChannelConfig>,
    pub enabled: bool,
    pub symbols: Vec<PulseSymbol>,
}

impl PulseChannel for Channel {
    type Error = Infallible;

    fn configure(&mut self, config: &ChannelConfig) -> Result<(), Infallible> {
        self.config = Some(*config);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Infallible> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Infallible> {
        self.enabled = false;
        Ok(())
    }

    fn write_block(&mut self, symbols: &[PulseSymbol]) -> Result<(), Infallible> {
        self.symbols.extend_from_slice(symbols);
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Decode the data bytes of every transmission in `symbols`
///
/// Reset symbols separate transmissions.
pub fn decode_frames(symbols: &[PulseSymbol]) -> Vec<Vec<u8>> {
    symbols
        .split(|s| !s.level0)
        .filter(|frame| !frame.is_empty())
        .map(|frame| {
            frame
                .chunks(8)
                .map(|bits| {
                    bits.iter()
                        .fold(0u8, |acc, s| (acc << 1) | (s.duration0 > s.duration1) as u8)
                })
                .collect()
        })
        .collect()
}

pub fn wire() -> SharedWire {
    Rc::new(RefCell::new(Wire::default()))
}
