//! Recording peripherals for driver tests

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};
use lumen_hal::{ChannelConfig, PulseChannel, PulseSymbol};

/// Something that happened on the panel interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    Command(u8),
    Data(Vec<u8>),
    Reset(bool),
    DelayMs(u32),
}

#[derive(Debug, Default)]
pub struct BusLog {
    dc_high: bool,
    pub events: Vec<BusEvent>,
    /// Reject writes of this command byte
    pub fail_command: Option<u8>,
    /// Reject every data write
    pub fail_data: bool,
}

impl BusLog {
    /// Commands in the order they were sent
    pub fn commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Command(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Data bytes sent after the most recent occurrence of `cmd`, up to the next command
    pub fn data_after(&self, cmd: u8) -> Vec<u8> {
        let start = self
            .events
            .iter()
            .rposition(|e| *e == BusEvent::Command(cmd));
        let Some(start) = start else {
            return Vec::new();
        };
        self.events[start + 1..]
            .iter()
            .take_while(|e| !matches!(e, BusEvent::Command(_)))
            .flat_map(|e| match e {
                BusEvent::Data(d) => d.clone(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Number of separate data writes after the most recent `cmd`
    pub fn data_writes_after(&self, cmd: u8) -> usize {
        let Some(start) = self
            .events
            .iter()
            .rposition(|e| *e == BusEvent::Command(cmd))
        else {
            return 0;
        };
        self.events[start + 1..]
            .iter()
            .take_while(|e| !matches!(e, BusEvent::Command(_)))
            .filter(|e| matches!(e, BusEvent::Data(_)))
            .count()
    }

    pub fn total_delay_ms(&self) -> u32 {
        self.events
            .iter()
            .map(|e| match e {
                BusEvent::DelayMs(ms) => *ms,
                _ => 0,
            })
            .sum()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

pub type SharedLog = Rc<RefCell<BusLog>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl spi::Error for MockError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for MockError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

/// SPI device that classifies writes by the shared DC level
pub struct MockSpi {
    log: SharedLog,
}

impl spi::ErrorType for MockSpi {
    type Error = MockError;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), MockError> {
        let mut log = self.log.borrow_mut();
        // All data writes in one transaction land in a single event
        let mut data = Vec::new();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                if log.dc_high {
                    if log.fail_data {
                        return Err(MockError);
                    }
                    data.extend_from_slice(bytes);
                } else {
                    for &b in bytes.iter() {
                        if log.fail_command == Some(b) {
                            return Err(MockError);
                        }
                        log.events.push(BusEvent::Command(b));
                    }
                }
            }
        }
        if !data.is_empty() {
            log.events.push(BusEvent::Data(data));
        }
        Ok(())
    }
}

/// Data/command select pin
pub struct MockDc {
    log: SharedLog,
}

impl digital::ErrorType for MockDc {
    type Error = Infallible;
}

impl OutputPin for MockDc {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.borrow_mut().dc_high = true;
        Ok(())
    }
}

/// Reset pin, optionally failing
pub struct MockRst {
    log: SharedLog,
    pub fail: bool,
}

impl digital::ErrorType for MockRst {
    type Error = MockError;
}

impl OutputPin for MockRst {
    fn set_low(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.log.borrow_mut().events.push(BusEvent::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.log.borrow_mut().events.push(BusEvent::Reset(true));
        Ok(())
    }
}

pub struct MockDelay {
    log: SharedLog,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.log.borrow_mut().events.push(BusEvent::DelayMs(ms));
    }
}

/// A full set of panel peripherals sharing one log
pub fn panel_parts() -> (SharedLog, MockSpi, MockDc, MockRst, MockDelay) {
    let log: SharedLog = Rc::new(RefCell::new(BusLog::default()));
    (
        log.clone(),
        MockSpi { log: log.clone() },
        MockDc { log: log.clone() },
        MockRst {
            log: log.clone(),
            fail: false,
        },
        MockDelay { log },
    )
}

/// Simple output pin tracking its level
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub fail: bool,
}

impl digital::ErrorType for MockPin {
    type Error = MockError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.high = true;
        Ok(())
    }
}

/// Pulse channel recording every block written
#[derive(Debug, Default)]
pub struct MockChannel {
    pub config: Option<ChannelConfig>,
    pub enabled: bool,
    pub blocks: Vec<Vec<PulseSymbol>>,
    pub idle_waits: usize,
    pub fail_configure: bool,
    pub fail_write: bool,
    pub fail_disable: bool,
}

impl MockChannel {
    /// All symbols written since the last `clear`
    pub fn symbols(&self) -> Vec<PulseSymbol> {
        self.blocks.iter().flatten().copied().collect()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.idle_waits = 0;
    }
}

impl PulseChannel for MockChannel {
    type Error = MockError;

    fn configure(&mut self, config: &ChannelConfig) -> Result<(), MockError> {
        if self.fail_configure {
            return Err(MockError);
        }
        self.config = Some(*config);
        Ok(())
    }

    fn enable(&mut self) -> Result<(), MockError> {
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), MockError> {
        if self.fail_disable {
            return Err(MockError);
        }
        self.enabled = false;
        Ok(())
    }

    fn write_block(&mut self, symbols: &[PulseSymbol]) -> Result<(), MockError> {
        if self.fail_write || !self.enabled {
            return Err(MockError);
        }
        if let Some(config) = &self.config {
            assert!(symbols.len() <= config.mem_block_symbols);
        }
        self.blocks.push(symbols.to_vec());
        Ok(())
    }

    fn wait_idle(&mut self) -> Result<(), MockError> {
        self.idle_waits += 1;
        Ok(())
    }
}
