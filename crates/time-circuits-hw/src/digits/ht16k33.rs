//! HT16K33 seven-segment backpack.
//!
//! Display RAM layout for the four-digit backpack:
//! - Address 0x00 starts the write
//! - Digits occupy RAM rows 0, 1, 3 and 4 (low byte of each 16-bit row)
//! - Row 2 drives the colon (bit 1)
//! - Command bytes: 0x21 (oscillator on), 0x81 (display on), 0xE0 | n (dimming)

use tracing::debug;

use super::{text_cells, DigitGroup, NumberFormat};
use crate::i2c::RegisterBus;
use crate::segments::encode;
use crate::{Result, DIGIT_CELLS, MAX_BRIGHTNESS};

/// Frame size: address byte + 5 RAM rows of two bytes.
pub const FRAME_SIZE: usize = 11;

/// Oscillator on.
const CMD_OSCILLATOR_ON: u8 = 0x21;

/// Display on, blinking off.
const CMD_DISPLAY_ON: u8 = 0x81;

/// Dimming command base.
const CMD_DIMMING: u8 = 0xE0;

/// Colon bit in RAM row 2.
const COLON_BIT: u8 = 0x02;

/// Builds a display RAM frame for four cells.
pub fn build_frame(cells: &[char; DIGIT_CELLS], colon: bool) -> [u8; FRAME_SIZE] {
    let segments = encode(cells);
    let mut frame = [0u8; FRAME_SIZE];
    frame[1] = segments[0];
    frame[3] = segments[1];
    frame[5] = if colon { COLON_BIT } else { 0x00 };
    frame[7] = segments[2];
    frame[9] = segments[3];
    frame
}

/// Maps a 0-7 level onto the chip's sixteen dimming steps.
pub fn dimming_command(level: u8) -> u8 {
    CMD_DIMMING | (level.min(MAX_BRIGHTNESS) * 2 + 1)
}

/// HT16K33 backpack on a register bus.
pub struct Ht16k33<B: RegisterBus> {
    bus: B,
}

impl<B: RegisterBus> Ht16k33<B> {
    /// Starts the oscillator and switches the display on.
    pub fn new(mut bus: B) -> Result<Self> {
        bus.write(&[CMD_OSCILLATOR_ON])?;
        bus.write(&[CMD_DISPLAY_ON])?;
        bus.write(&[dimming_command(MAX_BRIGHTNESS)])?;
        debug!("HT16K33 initialized");
        Ok(Self { bus })
    }

    fn write_cells(&mut self, cells: &[char; DIGIT_CELLS], colon: bool) -> Result<()> {
        self.bus.write(&build_frame(cells, colon))
    }
}

impl<B: RegisterBus> DigitGroup for Ht16k33<B> {
    fn clear(&mut self) -> Result<()> {
        self.write_cells(&[' '; DIGIT_CELLS], false)
    }

    fn write_number(&mut self, value: u16, format: NumberFormat) -> Result<()> {
        self.write_cells(&format.cells(value), format.colon)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.write_cells(&text_cells(text), false)
    }

    fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.bus.write(&[dimming_command(level)])
    }
}
