//! Linux I2C transport via `/dev/i2c-N`.

use embedded_hal::i2c::I2c;
use linux_embedded_hal::I2cdev;
use tracing::{debug, info};

use crate::{Error, Result};

/// Byte-oriented register bus used by I2C display controllers.
pub trait RegisterBus {
    /// Sends one complete write transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;
}

/// One slave address on a Linux I2C adapter.
pub struct I2cDevice {
    dev: I2cdev,
    bus: String,
    address: u8,
}

impl I2cDevice {
    /// Opens `bus` (e.g. `/dev/i2c-1`). Every write is addressed to `address`.
    pub fn open(bus: &str, address: u8) -> Result<Self> {
        let dev = I2cdev::new(bus).map_err(|e| {
            debug!("Failed to open {}: {}", bus, e);
            Error::I2cBusNotFound(bus.to_string())
        })?;

        info!("I2C device opened at {} address 0x{:02X}", bus, address);
        Ok(Self {
            dev,
            bus: bus.to_string(),
            address,
        })
    }
}

impl RegisterBus for I2cDevice {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        I2c::write(&mut self.dev, self.address, bytes).map_err(|e| Error::I2cWrite {
            bus: self.bus.clone(),
            address: self.address,
            message: e.to_string(),
        })
    }
}
