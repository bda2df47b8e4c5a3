//! Digit group stand-in for builds without display hardware.

use tracing::debug;

use super::{DigitGroup, NumberFormat};
use crate::Result;

/// Accepts every write and drops it.
#[derive(Debug, Clone)]
pub struct DisabledDigits {
    label: String,
}

impl DisabledDigits {
    /// Creates a disabled group; `label` only appears in logs.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

impl DigitGroup for DisabledDigits {
    fn clear(&mut self) -> Result<()> {
        debug!("Display disabled, clear skipped for {}", self.label);
        Ok(())
    }

    fn write_number(&mut self, value: u16, _format: NumberFormat) -> Result<()> {
        debug!("Display disabled, {} skipped: {}", self.label, value);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        debug!("Display disabled, {} skipped: {:?}", self.label, text);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<()> {
        debug!("Display disabled, {} brightness skipped: {}", self.label, level);
        Ok(())
    }
}
