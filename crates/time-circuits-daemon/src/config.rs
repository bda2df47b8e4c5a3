//! Configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::settings::ClockSettings;
use crate::sound::cues;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Normal-time render interval in milliseconds
    #[serde(default = "default_refresh")]
    pub refresh: u64,

    /// Sound configuration
    #[serde(default)]
    pub sound: SoundConfig,

    /// Display hardware configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Initial clock settings
    #[serde(default)]
    pub clock: ClockSettings,

    /// Automatic time-travel sequence
    #[serde(default)]
    pub travel: TravelConfig,
}

/// Sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    /// Send cues to the DFPlayer (false = log only)
    #[serde(default)]
    pub enable: bool,

    /// DFPlayer serial port
    #[serde(default = "default_sound_device")]
    pub device: String,

    /// Directory mirroring the player's storage
    #[serde(default = "default_sound_directory")]
    pub directory: String,

    /// Name substituted for missing cues
    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Names checked at startup
    #[serde(default = "default_expected")]
    pub expected: Vec<String>,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enable: false,
            device: default_sound_device(),
            directory: default_sound_directory(),
            fallback: default_fallback(),
            expected: default_expected(),
        }
    }
}

/// Wiring of one clock row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowWiring {
    /// I2C bus device node (ht16k33)
    pub bus: String,

    /// I2C addresses of the month, day, year and time groups (ht16k33)
    pub addresses: [u8; 4],

    /// Shared TM1637 clock line (tm1637)
    #[serde(default)]
    pub clk_pin: Option<u32>,

    /// TM1637 data lines of the month, day, year and time groups (tm1637)
    #[serde(default)]
    pub dio_pins: Option<[u32; 4]>,

    /// AM indicator GPIO line
    #[serde(default)]
    pub am_pin: Option<u32>,

    /// PM indicator GPIO line
    #[serde(default)]
    pub pm_pin: Option<u32>,
}

impl RowWiring {
    fn on_bus(bus: &str, first_address: u8) -> Self {
        Self {
            bus: bus.to_string(),
            addresses: [
                first_address,
                first_address + 1,
                first_address + 2,
                first_address + 3,
            ],
            clk_pin: None,
            dio_pins: None,
            am_pin: None,
            pm_pin: None,
        }
    }
}

/// Display hardware configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// "ht16k33", "tm1637", "virtual" or "disabled"
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Destination Time row
    #[serde(default = "default_destination_wiring")]
    pub destination: RowWiring,

    /// Present Time row
    #[serde(default = "default_present_wiring")]
    pub present: RowWiring,

    /// Last Time Departed row
    #[serde(default = "default_last_departed_wiring")]
    pub last_departed: RowWiring,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            destination: default_destination_wiring(),
            present: default_present_wiring(),
            last_departed: default_last_departed_wiring(),
        }
    }
}

/// Automatic time-travel sequence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelConfig {
    /// Run the sequence periodically
    #[serde(default)]
    pub enable: bool,

    /// Seconds between sequences
    #[serde(default = "default_travel_interval")]
    pub interval: u64,

    /// Flicker duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration: u64,

    /// Milliseconds between flicker frames
    #[serde(default = "default_frame_interval")]
    pub frame_interval: u64,

    /// Milliseconds per mph step of the speed ramp
    #[serde(default = "default_ramp_step")]
    pub ramp_step: u64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            enable: false,
            interval: default_travel_interval(),
            animation_duration: default_animation_duration(),
            frame_interval: default_frame_interval(),
            ramp_step: default_ramp_step(),
        }
    }
}

// Default value functions
fn default_refresh() -> u64 {
    1000
}

fn default_sound_device() -> String {
    "/dev/ttyUSB0".to_string()
}

fn default_sound_directory() -> String {
    "sounds".to_string()
}

fn default_fallback() -> String {
    cues::NOT_FOUND.to_string()
}

fn default_expected() -> Vec<String> {
    [
        cues::TIME_TRAVEL,
        "EASTER_EGG",
        "SLEEP_ON",
        cues::CONFIRM_ON,
        "CONFIRM_OFF",
        "ACCELERATION",
        cues::WARP_WHOOSH,
        cues::ARRIVAL_THUD,
        cues::NOT_FOUND,
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_backend() -> String {
    "virtual".to_string()
}

fn default_destination_wiring() -> RowWiring {
    RowWiring::on_bus("/dev/i2c-1", 0x70)
}

fn default_present_wiring() -> RowWiring {
    RowWiring::on_bus("/dev/i2c-1", 0x74)
}

fn default_last_departed_wiring() -> RowWiring {
    RowWiring::on_bus("/dev/i2c-2", 0x70)
}

fn default_travel_interval() -> u64 {
    3600
}

fn default_animation_duration() -> u64 {
    3000
}

fn default_frame_interval() -> u64 {
    80
}

fn default_ramp_step() -> u64 {
    40
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse configuration")?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh: default_refresh(),
            sound: SoundConfig::default(),
            display: DisplayConfig::default(),
            clock: ClockSettings::default(),
            travel: TravelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.refresh, 1000);
        assert_eq!(config.display.backend, "virtual");
        assert_eq!(config.display.present.addresses, [0x74, 0x75, 0x76, 0x77]);
        assert_eq!(config.display.last_departed.bus, "/dev/i2c-2");
        assert_eq!(config.sound.fallback, "NOT_FOUND");
        assert!(config.sound.expected.contains(&"TIME_TRAVEL".to_string()));
        assert!(!config.travel.enable);
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            refresh = 500

            [sound]
            enable = true
            directory = "/srv/mp3"

            [display]
            backend = "tm1637"

            [display.present]
            bus = "/dev/i2c-1"
            addresses = [0x74, 0x75, 0x76, 0x77]
            clk_pin = 18
            dio_pins = [19, 20, 21, 22]
            am_pin = 5
            pm_pin = 6

            [clock]
            brightness = 4
            display_format_24h = true

            [clock.destination]
            year = 2015
            month = 10
            day = 21
            hour = 16
            minute = 29
            "#,
        )
        .unwrap();

        assert_eq!(config.refresh, 500);
        assert!(config.sound.enable);
        assert_eq!(config.sound.device, "/dev/ttyUSB0");
        assert_eq!(config.display.present.dio_pins, Some([19, 20, 21, 22]));
        assert_eq!(config.display.present.am_pin, Some(5));
        assert_eq!(config.display.destination.addresses[0], 0x70);
        assert_eq!(config.clock.brightness(), 4);
        assert!(config.clock.display_format_24h);
        assert_eq!(config.clock.destination.year, 2015);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(Config::load("/nonexistent/tcircuitsd.toml").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[travel]\nenable = true\ninterval = 60\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert!(config.travel.enable);
        assert_eq!(config.travel.interval, 60);
        assert_eq!(config.travel.frame_interval, 80);
    }
}
