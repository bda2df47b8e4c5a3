//! Clock display rows.
//!
//! A row is one physical clock face made of four digit groups (month, day,
//! year, time) and the AM/PM indicators. [`render`] paints a single row;
//! [`ClockFace`] owns the three rows and addresses them by role.

mod face;
mod mirror;
pub mod render;
mod row;

pub use face::ClockFace;
pub use mirror::RowMirror;
pub use row::{Digits, DisplayRow, Indicator};

use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone, Timelike};

/// Three-letter month abbreviations as shown on the month group.
const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Which of the three clock faces a row is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowRole {
    /// Destination Time (top row).
    Destination,
    /// Present Time (middle row).
    Present,
    /// Last Time Departed (bottom row), doubles as the speedometer.
    LastDeparted,
}

impl RowRole {
    /// All roles, top to bottom.
    pub const ALL: [RowRole; 3] = [RowRole::Destination, RowRole::Present, RowRole::LastDeparted];

    /// Position of the row on the prop, top to bottom.
    pub fn index(&self) -> usize {
        match self {
            RowRole::Destination => 0,
            RowRole::Present => 1,
            RowRole::LastDeparted => 2,
        }
    }
}

impl std::fmt::Display for RowRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowRole::Destination => write!(f, "destination"),
            RowRole::Present => write!(f, "present"),
            RowRole::LastDeparted => write!(f, "last-departed"),
        }
    }
}

/// A date and time to show on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSnapshot {
    /// Four-digit year.
    pub year: u16,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub day: u8,
    /// 0-23.
    pub hour: u8,
    /// 0-59.
    pub minute: u8,
}

impl TimeSnapshot {
    /// Creates a snapshot, clamping every field into its range.
    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8) -> Self {
        Self {
            year: year.min(9999),
            month: month.clamp(1, 12),
            day: day.clamp(1, 31),
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// Upper-case three-letter month abbreviation.
    pub fn month_abbrev(&self) -> &'static str {
        MONTHS[(self.month.clamp(1, 12) - 1) as usize]
    }

    fn from_parts<T: Datelike + Timelike>(value: &T) -> Self {
        Self::new(
            value.year().clamp(0, 9999) as u16,
            value.month() as u8,
            value.day() as u8,
            value.hour() as u8,
            value.minute() as u8,
        )
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeSnapshot {
    fn from(value: DateTime<Tz>) -> Self {
        Self::from_parts(&value)
    }
}

impl From<NaiveDateTime> for TimeSnapshot {
    fn from(value: NaiveDateTime) -> Self {
        Self::from_parts(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_month_abbrev() {
        assert_eq!(TimeSnapshot::new(1985, 1, 1, 0, 0).month_abbrev(), "JAN");
        assert_eq!(TimeSnapshot::new(1985, 10, 26, 1, 21).month_abbrev(), "OCT");
        assert_eq!(TimeSnapshot::new(1985, 12, 1, 0, 0).month_abbrev(), "DEC");
    }

    #[test]
    fn test_new_clamps() {
        let snapshot = TimeSnapshot::new(12000, 0, 40, 24, 75);
        assert_eq!(snapshot, TimeSnapshot::new(9999, 1, 31, 23, 59));
    }

    #[test]
    fn test_from_naive() {
        let value = NaiveDate::from_ymd_opt(1955, 11, 5)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert_eq!(TimeSnapshot::from(value), TimeSnapshot::new(1955, 11, 5, 6, 0));
    }

    #[test]
    fn test_role_order() {
        for (i, role) in RowRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
        assert_eq!(RowRole::LastDeparted.to_string(), "last-departed");
    }
}
