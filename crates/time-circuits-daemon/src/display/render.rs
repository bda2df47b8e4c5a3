//! Painting a single row.
//!
//! These functions hold no state of their own. Hardware results are
//! consumed here: a failed write is logged at trace level and the remaining
//! groups and both indicators are still written, so one dead or missing
//! module never blanks the rest of the row.

use fastrand::Rng;
use time_circuits_hw::{NumberFormat, Result, MAX_BRIGHTNESS};
use tracing::trace;

use super::{DisplayRow, TimeSnapshot};
use crate::settings::SpeedUnit;

/// Day of month: two cells, zero padded.
const DAY_FORMAT: NumberFormat = NumberFormat::new(2, 0).zero_padded();

/// Four-digit year.
const YEAR_FORMAT: NumberFormat = NumberFormat::full().zero_padded();

/// HHMM with the colon lit.
const TIME_FORMAT: NumberFormat = NumberFormat::full().zero_padded().with_colon(true);

/// Month group contents while the row is flickering.
const ANIMATION_MONTH: &str = " ---";

/// Largest value the time group can show.
const MAX_SPEED: u16 = 9999;

fn best_effort(row: &DisplayRow, part: &str, result: Result<()>) {
    if let Err(e) = result {
        trace!("{} {} write failed: {}", row.role, part, e);
    }
}

/// Hour as shown on the time group.
///
/// In 12-hour mode midnight shows as 12 and afternoon hours drop by 12.
pub fn display_hour(hour: u8, format_24h: bool) -> u8 {
    if format_24h {
        return hour;
    }
    match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    }
}

/// Shows a date and time.
pub fn render_date_time(row: &mut DisplayRow, snapshot: &TimeSnapshot, format_24h: bool) {
    let month = format!("{:>4}", snapshot.month_abbrev());
    let result = row.month.write_text(&month);
    best_effort(row, "month", result);

    let result = row.day.write_number(snapshot.day as u16, DAY_FORMAT);
    best_effort(row, "day", result);

    let result = row.year.write_number(snapshot.year, YEAR_FORMAT);
    best_effort(row, "year", result);

    let hour = display_hour(snapshot.hour, format_24h) as u16;
    let result = row
        .time
        .write_number(hour * 100 + snapshot.minute as u16, TIME_FORMAT);
    best_effort(row, "time", result);

    set_indicators(row, snapshot.hour < 12, snapshot.hour >= 12);
}

/// Paints one frame of the pre-travel flicker. Groups are independent;
/// the row does not show a coherent date.
pub fn render_animation_tick(row: &mut DisplayRow, rng: &mut Rng) {
    let result = row.month.write_text(ANIMATION_MONTH);
    best_effort(row, "month", result);

    let result = row.day.write_number(rng.u16(1..=31), NumberFormat::new(2, 0));
    best_effort(row, "day", result);

    let result = row.year.write_number(rng.u16(1000..=9999), YEAR_FORMAT);
    best_effort(row, "year", result);

    let format = NumberFormat::full().zero_padded().with_colon(rng.bool());
    let result = row.time.write_number(rng.u16(0..=2399), format);
    best_effort(row, "time", result);

    set_indicators(row, rng.bool(), rng.bool());
}

/// Converts a speed to the integer shown, truncating after conversion.
pub fn speed_value(speed: f32, unit: SpeedUnit) -> u16 {
    let value = (speed * unit.factor()).trunc();
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= MAX_SPEED as f32 {
        MAX_SPEED
    } else {
        value as u16
    }
}

/// Right-aligns a speed without leading zeros.
fn speed_format(value: u16) -> NumberFormat {
    match value {
        0..=9 => NumberFormat::new(1, 3),
        10..=99 => NumberFormat::new(2, 2),
        _ => NumberFormat::full(),
    }
}

/// Turns the row into a speedometer: unit label in the month group, the
/// speed in the time group, everything else dark.
pub fn render_speed_overlay(row: &mut DisplayRow, speed: f32, unit: SpeedUnit) {
    let result = row.month.write_text(unit.label());
    best_effort(row, "month", result);

    let result = row.day.clear();
    best_effort(row, "day", result);

    let result = row.year.clear();
    best_effort(row, "year", result);

    let value = speed_value(speed, unit);
    let result = row.time.write_number(value, speed_format(value));
    best_effort(row, "time", result);

    set_indicators(row, false, false);
}

/// Blanks every group and switches both indicators off.
pub fn clear(row: &mut DisplayRow) {
    let result = row.month.clear();
    best_effort(row, "month", result);

    let result = row.day.clear();
    best_effort(row, "day", result);

    let result = row.year.clear();
    best_effort(row, "year", result);

    let result = row.time.clear();
    best_effort(row, "time", result);

    set_indicators(row, false, false);
}

/// Applies a brightness level to every group of the row and returns the
/// clamped level. The shared setting is not touched here; see
/// [`ClockFace::set_global_brightness`](super::ClockFace::set_global_brightness).
pub fn set_brightness(row: &mut DisplayRow, level: u8) -> u8 {
    let level = level.min(MAX_BRIGHTNESS);

    let result = row.month.set_brightness(level);
    best_effort(row, "month", result);

    let result = row.day.set_brightness(level);
    best_effort(row, "day", result);

    let result = row.year.set_brightness(level);
    best_effort(row, "year", result);

    let result = row.time.set_brightness(level);
    best_effort(row, "time", result);

    level
}

fn set_indicators(row: &mut DisplayRow, am: bool, pm: bool) {
    let result = row.am.set_active(am);
    best_effort(row, "am", result);

    let result = row.pm.set_active(pm);
    best_effort(row, "pm", result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{RowMirror, RowRole};
    use proptest::prelude::*;
    use time_circuits_hw::{DigitGroup, Error, VirtualDigits, VirtualPin};

    fn mirrored() -> (DisplayRow, RowMirror) {
        let mirror = RowMirror::new();
        (mirror.build(RowRole::Present), mirror)
    }

    /// Digit group whose every write fails.
    struct DeadDigits;

    impl DigitGroup for DeadDigits {
        fn clear(&mut self) -> Result<()> {
            Err(Error::I2cBusNotFound("/dev/i2c-9".to_string()))
        }

        fn write_number(&mut self, _value: u16, _format: NumberFormat) -> Result<()> {
            Err(Error::I2cBusNotFound("/dev/i2c-9".to_string()))
        }

        fn write_text(&mut self, _text: &str) -> Result<()> {
            Err(Error::I2cBusNotFound("/dev/i2c-9".to_string()))
        }

        fn set_brightness(&mut self, _level: u8) -> Result<()> {
            Err(Error::I2cBusNotFound("/dev/i2c-9".to_string()))
        }
    }

    #[test]
    fn test_display_hour_examples() {
        assert_eq!(display_hour(0, false), 12);
        assert_eq!(display_hour(13, false), 1);
        assert_eq!(display_hour(23, false), 11);
        assert_eq!(display_hour(12, false), 12);
        assert_eq!(display_hour(11, false), 11);
        assert_eq!(display_hour(0, true), 0);
        assert_eq!(display_hour(23, true), 23);
    }

    #[test]
    fn test_render_date_time_evening_12h() {
        let (mut row, mirror) = mirrored();
        render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 4, 22, 4), false);

        assert_eq!(mirror.month.digits(), "OCT");
        assert_eq!(mirror.day.digits(), "04");
        assert_eq!(mirror.year.digits(), "1985");
        assert_eq!(mirror.time.digits(), "1004");
        assert!(mirror.time.colon());
        assert!(mirror.pm.is_active());
        assert!(!mirror.am.is_active());
    }

    #[test]
    fn test_render_date_time_24h() {
        let (mut row, mirror) = mirrored();
        render_date_time(&mut row, &TimeSnapshot::new(2015, 10, 21, 16, 29), true);
        assert_eq!(mirror.time.digits(), "1629");
        assert!(mirror.pm.is_active());
    }

    #[test]
    fn test_render_date_time_midnight() {
        let (mut row, mirror) = mirrored();
        render_date_time(&mut row, &TimeSnapshot::new(1955, 11, 12, 0, 7), false);
        assert_eq!(mirror.time.digits(), "1207");
        assert!(mirror.am.is_active());
        assert!(!mirror.pm.is_active());
    }

    #[test]
    fn test_render_replaces_speed_overlay() {
        let (mut row, mirror) = mirrored();
        render_speed_overlay(&mut row, 88.0, SpeedUnit::Mph);
        render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 26, 1, 21), false);
        assert_eq!(mirror.summary(), " OCT|26  |1985|01:21|AM");
    }

    #[test]
    fn test_animation_tick_ranges() {
        let (mut row, mirror) = mirrored();
        let mut rng = Rng::with_seed(88);
        for _ in 0..200 {
            render_animation_tick(&mut row, &mut rng);
            assert_eq!(mirror.month.text(), " ---");
            let day: u16 = mirror.day.digits().parse().unwrap();
            assert!((1..=31).contains(&day));
            let year: u16 = mirror.year.digits().parse().unwrap();
            assert!((1000..=9999).contains(&year));
            let time: u16 = mirror.time.digits().parse().unwrap();
            assert!(time <= 2399);
            assert_eq!(mirror.time.text().len(), 4);
        }
    }

    #[test]
    fn test_speed_value() {
        assert_eq!(speed_value(88.9, SpeedUnit::Mph), 88);
        assert_eq!(speed_value(88.0, SpeedUnit::Kph), 141);
        assert_eq!(speed_value(-3.0, SpeedUnit::Mph), 0);
        assert_eq!(speed_value(f32::NAN, SpeedUnit::Mph), 0);
        assert_eq!(speed_value(20000.0, SpeedUnit::Mph), 9999);
    }

    #[test]
    fn test_speed_overlay_alignment() {
        let (mut row, mirror) = mirrored();

        render_speed_overlay(&mut row, 7.5, SpeedUnit::Mph);
        assert_eq!(mirror.time.text(), "   7");

        render_speed_overlay(&mut row, 88.0, SpeedUnit::Mph);
        assert_eq!(mirror.time.text(), "  88");
        assert_eq!(mirror.month.digits(), "MPH");

        render_speed_overlay(&mut row, 88.0, SpeedUnit::Kph);
        assert_eq!(mirror.time.text(), " 141");
        assert_eq!(mirror.month.digits(), "KPH");
    }

    #[test]
    fn test_speed_overlay_blanks_date_and_indicators() {
        let (mut row, mirror) = mirrored();
        render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 26, 13, 21), false);
        render_speed_overlay(&mut row, 42.0, SpeedUnit::Mph);
        assert!(mirror.day.is_blank());
        assert!(mirror.year.is_blank());
        assert!(!mirror.time.colon());
        assert!(!mirror.am.is_active());
        assert!(!mirror.pm.is_active());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (mut row, mirror) = mirrored();
        render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 26, 13, 21), false);
        clear(&mut row);
        assert!(mirror.is_blank());
        clear(&mut row);
        assert!(mirror.is_blank());
    }

    #[test]
    fn test_failed_group_does_not_stop_the_row() {
        let year = VirtualDigits::new();
        let time = VirtualDigits::new();
        let am = VirtualPin::new();
        let pm = VirtualPin::new();
        let mut row = DisplayRow::new(
            RowRole::Present,
            Box::new(DeadDigits),
            Box::new(DeadDigits),
            Box::new(year.clone()),
            Box::new(time.clone()),
            Box::new(am.clone()),
            Box::new(pm.clone()),
        );

        render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 26, 13, 21), false);
        assert_eq!(year.digits(), "1985");
        assert_eq!(time.digits(), "0121");
        assert!(pm.is_active());
        assert!(!am.is_active());
    }

    #[test]
    fn test_set_brightness_applies_to_every_group() {
        let (mut row, mirror) = mirrored();
        assert_eq!(set_brightness(&mut row, 2), 2);
        for group in [&mirror.month, &mirror.day, &mirror.year, &mirror.time] {
            assert_eq!(group.brightness(), 2);
        }
    }

    proptest! {
        #[test]
        fn prop_display_hour_12h(hour in 0u8..24) {
            let shown = display_hour(hour, false);
            prop_assert!((1..=12).contains(&shown));
            let expected = match hour {
                0 => 12,
                h if h > 12 => h - 12,
                h => h,
            };
            prop_assert_eq!(shown, expected);
        }

        #[test]
        fn prop_exactly_one_indicator(
            hour in 0u8..24,
            minute in 0u8..60,
            format_24h in any::<bool>(),
        ) {
            let (mut row, mirror) = mirrored();
            render_date_time(&mut row, &TimeSnapshot::new(2015, 10, 21, hour, minute), format_24h);
            prop_assert!(mirror.am.is_active() != mirror.pm.is_active());
            prop_assert_eq!(mirror.am.is_active(), hour < 12);
        }

        #[test]
        fn prop_brightness_clamp(level in 8u8..=255) {
            let (mut high_row, high) = mirrored();
            let (mut max_row, max) = mirrored();
            prop_assert_eq!(set_brightness(&mut high_row, level), 7);
            set_brightness(&mut max_row, 7);
            prop_assert_eq!(high.time.brightness(), max.time.brightness());
            prop_assert_eq!(high.month.brightness(), max.month.brightness());
        }

        #[test]
        fn prop_brightness_idempotent(level in any::<u8>()) {
            let (mut once_row, once) = mirrored();
            let (mut twice_row, twice) = mirrored();
            set_brightness(&mut once_row, level);
            set_brightness(&mut twice_row, level);
            set_brightness(&mut twice_row, level);
            prop_assert_eq!(once.day.brightness(), twice.day.brightness());
        }
    }
}
