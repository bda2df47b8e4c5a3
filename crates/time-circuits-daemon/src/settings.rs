//! Clock settings shared by the render loop and the time-travel sequence.

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};
use time_circuits_hw::MAX_BRIGHTNESS;

use crate::display::TimeSnapshot;

/// Unit used by the speed readout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    /// Miles per hour; speeds are tracked in mph so this is the identity.
    #[default]
    Mph,
    /// Kilometres per hour.
    Kph,
}

impl SpeedUnit {
    /// Three-character label shown in the month group.
    pub fn label(&self) -> &'static str {
        match self {
            SpeedUnit::Mph => "MPH",
            SpeedUnit::Kph => "KPH",
        }
    }

    /// Factor applied to an mph value before display.
    pub fn factor(&self) -> f32 {
        match self {
            SpeedUnit::Mph => 1.0,
            SpeedUnit::Kph => 1.609_344,
        }
    }
}

/// A fixed date and time shown on the Destination or Last Departed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeSetting {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DateTimeSetting {
    /// Returns the snapshot to render, with out-of-range fields clamped.
    pub fn snapshot(&self) -> TimeSnapshot {
        TimeSnapshot::new(self.year, self.month, self.day, self.hour, self.minute)
    }
}

impl From<TimeSnapshot> for DateTimeSetting {
    fn from(snapshot: TimeSnapshot) -> Self {
        Self {
            year: snapshot.year,
            month: snapshot.month,
            day: snapshot.day,
            hour: snapshot.hour,
            minute: snapshot.minute,
        }
    }
}

/// Settings read before each render.
///
/// Brightness is private: it only changes through
/// [`ClockFace::set_global_brightness`](crate::display::ClockFace::set_global_brightness),
/// which keeps this value and the hardware in step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSettings {
    /// Display intensity (0-7).
    #[serde(default = "default_brightness")]
    brightness: u8,

    /// Show hours 0-23 instead of 1-12.
    #[serde(default)]
    pub display_format_24h: bool,

    /// Destination Time row.
    #[serde(default = "default_destination")]
    pub destination: DateTimeSetting,

    /// Last Time Departed row.
    #[serde(default = "default_last_departed")]
    pub last_departed: DateTimeSetting,

    /// Fixed UTC offset for the Present Time row (None = system local time).
    #[serde(default)]
    pub present_utc_offset_minutes: Option<i32>,

    /// Unit of the speed readout.
    #[serde(default)]
    pub speed_unit: SpeedUnit,

    /// DFPlayer volume (0-30).
    #[serde(default = "default_volume")]
    pub notification_volume: u8,

    /// Play cues during the time-travel sequence.
    #[serde(default = "default_true")]
    pub time_travel_sound: bool,
}

fn default_brightness() -> u8 {
    MAX_BRIGHTNESS
}

fn default_destination() -> DateTimeSetting {
    DateTimeSetting {
        year: 1985,
        month: 10,
        day: 26,
        hour: 1,
        minute: 21,
    }
}

fn default_last_departed() -> DateTimeSetting {
    DateTimeSetting {
        year: 1985,
        month: 10,
        day: 26,
        hour: 1,
        minute: 20,
    }
}

fn default_volume() -> u8 {
    20
}

fn default_true() -> bool {
    true
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            brightness: default_brightness(),
            display_format_24h: false,
            destination: default_destination(),
            last_departed: default_last_departed(),
            present_utc_offset_minutes: None,
            speed_unit: SpeedUnit::default(),
            notification_volume: default_volume(),
            time_travel_sound: default_true(),
        }
    }
}

impl ClockSettings {
    /// Current brightness, always within 0-7.
    pub fn brightness(&self) -> u8 {
        self.brightness.min(MAX_BRIGHTNESS)
    }

    /// Stores a clamped brightness and returns the stored value.
    pub(crate) fn set_brightness(&mut self, level: u8) -> u8 {
        self.brightness = level.min(MAX_BRIGHTNESS);
        self.brightness
    }

    /// Snapshot for the Present Time row at `now`.
    pub fn present_time(&self, now: DateTime<Utc>) -> TimeSnapshot {
        match self
            .present_utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
        {
            Some(offset) => TimeSnapshot::from(now.with_timezone(&offset)),
            None => TimeSnapshot::from(now.with_timezone(&Local)),
        }
    }
}
