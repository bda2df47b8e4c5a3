//! Digital output lines (AM/PM indicators, TM1637 clock and data).

use linux_embedded_hal::sysfs_gpio::Direction;
use linux_embedded_hal::SysfsPin as HalPin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::{Error, Result};

/// A single binary output.
pub trait OutputPin {
    /// Drives the line high (`true`) or low (`false`).
    fn set_active(&mut self, active: bool) -> Result<()>;
}

/// GPIO line driven through `/sys/class/gpio`.
pub struct SysfsPin {
    pin: HalPin,
    line: u32,
}

impl SysfsPin {
    /// Exports `line` if needed, configures it as an output and drives it low.
    pub fn open(line: u32) -> Result<Self> {
        let pin = HalPin::new(u64::from(line));
        pin.export().map_err(|e| Error::Gpio {
            line,
            message: e.to_string(),
        })?;
        pin.set_direction(Direction::Low).map_err(|e| Error::Gpio {
            line,
            message: e.to_string(),
        })?;

        debug!("GPIO line {} opened as output", line);
        Ok(Self { pin, line })
    }
}

impl OutputPin for SysfsPin {
    fn set_active(&mut self, active: bool) -> Result<()> {
        self.pin
            .set_value(u8::from(active))
            .map_err(|e| Error::Gpio {
                line: self.line,
                message: e.to_string(),
            })
    }
}

/// Output line that only remembers its level. Clones share the level.
#[derive(Debug, Clone, Default)]
pub struct VirtualPin {
    level: Arc<AtomicBool>,
}

impl VirtualPin {
    /// Creates a pin that starts low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the pin is driven high.
    pub fn is_active(&self) -> bool {
        self.level.load(Ordering::Relaxed)
    }
}

impl OutputPin for VirtualPin {
    fn set_active(&mut self, active: bool) -> Result<()> {
        self.level.store(active, Ordering::Relaxed);
        Ok(())
    }
}

/// Output line for builds without the LED wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPin;

impl OutputPin for DisabledPin {
    fn set_active(&mut self, _active: bool) -> Result<()> {
        Ok(())
    }
}
