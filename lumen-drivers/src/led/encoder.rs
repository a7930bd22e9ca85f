//! Byte-to-symbol encoder for single-wire LEDs
//!
//! Serializes bytes MSB first into one pulse symbol per bit, then appends a
//! reset symbol. The output is produced in blocks no larger than the
//! channel's symbol memory; when a block fills up the encoder stops and
//! picks up at the same bit on the next call.

use heapless::Vec;
use lumen_core::timing::TickTable;
use lumen_hal::PulseSymbol;

/// Largest symbol block the encoder ever builds
pub const MAX_BLOCK_SYMBOLS: usize = 64;

/// Where the encoder is within one transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeState {
    /// Emitting data bits
    SendingColorBytes,
    /// Data done, reset symbol still pending
    SendingResetPulse,
}

/// Result of one [`BytesEncoder::encode`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeProgress {
    /// The block is full; call again with the same data for the rest
    MemoryFull,
    /// All bits and the reset symbol have been emitted
    Complete,
}

/// Symbol templates plus per-transmission progress
#[derive(Debug, Clone)]
pub struct BytesEncoder {
    bit0: PulseSymbol,
    bit1: PulseSymbol,
    reset: PulseSymbol,
    state: EncodeState,
    /// Next bit to emit, counted from the first byte's MSB
    bit_pos: usize,
}

impl BytesEncoder {
    /// Build the bit and reset templates from a tick table
    pub fn new(ticks: &TickTable) -> Self {
        Self {
            bit0: PulseSymbol::high_low(ticks.t0h, ticks.t0l),
            bit1: PulseSymbol::high_low(ticks.t1h, ticks.t1l),
            reset: PulseSymbol::low(ticks.reset_first, ticks.reset_second),
            state: EncodeState::SendingColorBytes,
            bit_pos: 0,
        }
    }

    /// Current position within the transmission
    pub fn state(&self) -> EncodeState {
        self.state
    }

    /// Abandon the current transmission
    pub fn reset(&mut self) {
        self.state = EncodeState::SendingColorBytes;
        self.bit_pos = 0;
    }

    /// Append symbols for `data` to `block` until it holds `limit` symbols
    ///
    /// `limit` is capped at the block capacity and treated as at least 1.
    /// A zero-capacity block never makes progress.
    pub fn encode<const N: usize>(
        &mut self,
        data: &[u8],
        block: &mut Vec<PulseSymbol, N>,
        limit: usize,
    ) -> EncodeProgress {
        if N == 0 {
            return EncodeProgress::MemoryFull;
        }
        let limit = limit.max(1).min(N);

        if self.state == EncodeState::SendingColorBytes {
            let total_bits = data.len() * 8;
            while self.bit_pos < total_bits {
                if block.len() >= limit {
                    return EncodeProgress::MemoryFull;
                }
                let byte = data[self.bit_pos / 8];
                let bit = byte & (0x80 >> (self.bit_pos % 8)) != 0;
                let symbol = if bit { self.bit1 } else { self.bit0 };
                if block.push(symbol).is_err() {
                    return EncodeProgress::MemoryFull;
                }
                self.bit_pos += 1;
            }
            self.state = EncodeState::SendingResetPulse;
        }

        if block.len() >= limit || block.push(self.reset).is_err() {
            return EncodeProgress::MemoryFull;
        }
        self.reset();
        EncodeProgress::Complete
    }
}
