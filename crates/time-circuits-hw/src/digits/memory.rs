//! In-memory digit group.

use std::sync::{Arc, Mutex};

use super::{text_cells, DigitGroup, NumberFormat};
use crate::{Result, DIGIT_CELLS, MAX_BRIGHTNESS};

#[derive(Debug, Clone, Copy)]
struct Cells {
    cells: [char; DIGIT_CELLS],
    colon: bool,
    brightness: u8,
}

/// Digit group that keeps its contents in memory.
///
/// Clones share the same cells, so one handle can be installed in a clock
/// row while another observes what the row shows.
#[derive(Debug, Clone)]
pub struct VirtualDigits {
    state: Arc<Mutex<Cells>>,
}

impl VirtualDigits {
    /// Creates a blank group at full brightness.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(Cells {
                cells: [' '; DIGIT_CELLS],
                colon: false,
                brightness: MAX_BRIGHTNESS,
            })),
        }
    }

    /// Returns all four cells, blanks included.
    pub fn text(&self) -> String {
        self.state.lock().unwrap().cells.iter().collect()
    }

    /// Returns the lit cells with surrounding blanks trimmed.
    pub fn digits(&self) -> String {
        self.text().trim().to_string()
    }

    /// Returns true if the colon is lit.
    pub fn colon(&self) -> bool {
        self.state.lock().unwrap().colon
    }

    /// Returns true if nothing is lit.
    pub fn is_blank(&self) -> bool {
        let state = self.state.lock().unwrap();
        !state.colon && state.cells.iter().all(|c| *c == ' ')
    }

    /// Returns the current brightness level.
    pub fn brightness(&self) -> u8 {
        self.state.lock().unwrap().brightness
    }
}

impl Default for VirtualDigits {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitGroup for VirtualDigits {
    fn clear(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cells = [' '; DIGIT_CELLS];
        state.colon = false;
        Ok(())
    }

    fn write_number(&mut self, value: u16, format: NumberFormat) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cells = format.cells(value);
        state.colon = format.colon;
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.cells = text_cells(text);
        state.colon = false;
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<()> {
        self.state.lock().unwrap().brightness = level.min(MAX_BRIGHTNESS);
        Ok(())
    }
}
