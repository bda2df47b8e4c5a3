//! Four-digit seven-segment display groups.
//!
//! Every physical module (HT16K33 backpack, TM1637 board) exposes the same
//! small capability set so that a clock row can be built from any mix of
//! them. Writes always replace the whole group: cells outside the written
//! range are blanked, so nothing from an earlier frame stays lit.

mod disabled;
mod ht16k33;
mod memory;
mod tm1637;

pub use disabled::DisabledDigits;
pub use ht16k33::Ht16k33;
pub use memory::VirtualDigits;
pub use tm1637::Tm1637;

use crate::{Result, DIGIT_CELLS};

/// Capability set of one addressable digit group.
pub trait DigitGroup {
    /// Blanks every cell and the colon.
    fn clear(&mut self) -> Result<()>;

    /// Shows a number laid out according to `format`.
    fn write_number(&mut self, value: u16, format: NumberFormat) -> Result<()>;

    /// Shows up to four characters, left-aligned.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Sets the intensity, 0 (dimmest) to 7 (brightest). Higher levels are
    /// treated as 7.
    fn set_brightness(&mut self, level: u8) -> Result<()>;
}

/// Placement of a number inside a four-cell group.
///
/// The value is right-aligned in cells `position .. position + width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    /// Pad the range with `0` instead of blanks.
    pub leading_zeros: bool,
    /// Number of cells the value may occupy.
    pub width: u8,
    /// First cell of the range.
    pub position: u8,
    /// Light the colon between the second and third cell.
    pub colon: bool,
}

impl NumberFormat {
    /// Creates a format for `width` cells starting at `position`.
    pub const fn new(width: u8, position: u8) -> Self {
        Self {
            leading_zeros: false,
            width,
            position,
            colon: false,
        }
    }

    /// Uses all four cells.
    pub const fn full() -> Self {
        Self::new(DIGIT_CELLS as u8, 0)
    }

    /// Enables zero padding.
    pub const fn zero_padded(mut self) -> Self {
        self.leading_zeros = true;
        self
    }

    /// Sets the colon state.
    pub const fn with_colon(mut self, colon: bool) -> Self {
        self.colon = colon;
        self
    }

    /// Lays `value` out into cells. Digits that do not fit are dropped from
    /// the left.
    pub fn cells(&self, value: u16) -> [char; DIGIT_CELLS] {
        let mut cells = [' '; DIGIT_CELLS];
        let position = (self.position as usize).min(DIGIT_CELLS);
        let width = (self.width as usize).min(DIGIT_CELLS - position);
        if width == 0 {
            return cells;
        }

        let last = position + width - 1;
        let mut rest = value as u32;
        for i in (position..=last).rev() {
            if self.leading_zeros || i == last || rest != 0 {
                cells[i] = char::from(b'0' + (rest % 10) as u8);
            }
            rest /= 10;
        }
        cells
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::full()
    }
}

/// Lays text out into cells, left-aligned and truncated to four characters.
pub fn text_cells(text: &str) -> [char; DIGIT_CELLS] {
    let mut cells = [' '; DIGIT_CELLS];
    for (cell, c) in cells.iter_mut().zip(text.chars()) {
        *cell = c;
    }
    cells
}
