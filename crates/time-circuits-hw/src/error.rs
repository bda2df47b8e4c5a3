//! Error types for the time circuits hardware library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when interacting with the hardware.
#[derive(Error, Debug)]
pub enum Error {
    /// I2C bus device node missing or could not be opened.
    #[error("I2C bus not found at {0}")]
    I2cBusNotFound(String),

    /// Write transaction to an I2C device failed.
    #[error("I2C write to 0x{address:02X} on {bus} failed: {message}")]
    I2cWrite {
        bus: String,
        address: u8,
        message: String,
    },

    /// GPIO line could not be exported, configured or driven.
    #[error("GPIO line {line} unavailable: {message}")]
    Gpio { line: u32, message: String },

    /// DFPlayer serial port not found.
    #[error("DFPlayer not found at {0}")]
    PlayerNotFound(String),

    /// Serial port communication error.
    #[error("Serial port error: {0}")]
    Serial(#[from] tokio_serial::Error),

    /// Device I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown display backend name.
    #[error("Invalid display backend: {0}")]
    InvalidBackend(String),

    /// DFPlayer volume outside 0-30.
    #[error("Invalid volume (must be 0-30): {0}")]
    InvalidVolume(u8),

    /// DFPlayer track index outside 1-2999.
    #[error("Invalid track index: {0}")]
    InvalidTrack(u16),
}
