//! Time Circuits Hardware Library
//!
//! Provides hardware abstraction for the prop clock: four-digit seven-segment
//! groups (HT16K33 backpacks and TM1637 modules), indicator output pins,
//! the Linux I2C transport, and the DFPlayer Mini MP3 module.

pub mod audio;
pub mod backend;
pub mod digits;
pub mod error;
pub mod i2c;
pub mod pin;
pub mod segments;

pub use audio::DfPlayer;
pub use backend::Backend;
pub use digits::{DigitGroup, DisabledDigits, Ht16k33, NumberFormat, Tm1637, VirtualDigits};
pub use error::{Error, Result};
pub use i2c::{I2cDevice, RegisterBus};
pub use pin::{DisabledPin, OutputPin, SysfsPin, VirtualPin};

/// Number of digit cells on every supported display module.
pub const DIGIT_CELLS: usize = 4;

/// Highest brightness level accepted by [`DigitGroup::set_brightness`].
pub const MAX_BRIGHTNESS: u8 = 7;
