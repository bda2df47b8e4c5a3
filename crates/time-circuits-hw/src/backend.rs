//! Display backend selection.

use crate::{Error, Result};
use std::str::FromStr;

/// Physical display family a clock is wired with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// HT16K33 backpacks on I2C.
    Ht16k33,
    /// TM1637 modules on GPIO clock/data lines.
    Tm1637,
    /// In-memory displays, contents visible in logs.
    #[default]
    Virtual,
    /// No display hardware; every write is dropped.
    Disabled,
}

impl FromStr for Backend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ht16k33" | "i2c" => Ok(Backend::Ht16k33),
            "tm1637" => Ok(Backend::Tm1637),
            "virtual" => Ok(Backend::Virtual),
            "disabled" | "none" => Ok(Backend::Disabled),
            _ => Err(Error::InvalidBackend(s.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Ht16k33 => write!(f, "ht16k33"),
            Backend::Tm1637 => write!(f, "tm1637"),
            Backend::Virtual => write!(f, "virtual"),
            Backend::Disabled => write!(f, "disabled"),
        }
    }
}
