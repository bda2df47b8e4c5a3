//! The three-row time circuits ensemble.

use fastrand::Rng;
use tracing::{debug, info};

use super::{render, DisplayRow, RowRole, TimeSnapshot};
use crate::settings::{ClockSettings, SpeedUnit};

/// Destination, Present and Last Departed rows addressed by role.
pub struct ClockFace {
    rows: [DisplayRow; 3],
}

impl ClockFace {
    /// Creates the face. Each row must carry the role of its position.
    pub fn new(destination: DisplayRow, present: DisplayRow, last_departed: DisplayRow) -> Self {
        debug_assert_eq!(destination.role(), RowRole::Destination);
        debug_assert_eq!(present.role(), RowRole::Present);
        debug_assert_eq!(last_departed.role(), RowRole::LastDeparted);
        Self {
            rows: [destination, present, last_departed],
        }
    }

    fn row_mut(&mut self, role: RowRole) -> &mut DisplayRow {
        &mut self.rows[role.index()]
    }

    /// Shows a date and time on one row using the configured hour format.
    pub fn show_normal_time(
        &mut self,
        role: RowRole,
        snapshot: &TimeSnapshot,
        settings: &ClockSettings,
    ) {
        render::render_date_time(self.row_mut(role), snapshot, settings.display_format_24h);
    }

    /// Paints one flicker frame on one row.
    pub fn show_animation_frame(&mut self, role: RowRole, rng: &mut Rng) {
        render::render_animation_tick(self.row_mut(role), rng);
    }

    /// Shows a speed on the Last Departed row after blanking the other two,
    /// so the face never mixes clock and speed data.
    pub fn show_speed(&mut self, speed: f32, unit: SpeedUnit) {
        render::clear(self.row_mut(RowRole::Destination));
        render::clear(self.row_mut(RowRole::Present));
        render::render_speed_overlay(self.row_mut(RowRole::LastDeparted), speed, unit);
    }

    /// Blanks all three rows.
    pub fn blank_all(&mut self) {
        for row in &mut self.rows {
            render::clear(row);
        }
        debug!("All displays blanked");
    }

    /// Clamps `level`, stores it in `settings` and applies it to every row.
    /// Returns the stored level.
    pub fn set_global_brightness(&mut self, settings: &mut ClockSettings, level: u8) -> u8 {
        let level = settings.set_brightness(level);
        for row in &mut self.rows {
            render::set_brightness(row, level);
        }
        info!("Display brightness set to {}", level);
        level
    }

    /// Pushes the stored brightness to the hardware.
    pub fn apply_settings(&mut self, settings: &ClockSettings) {
        let level = settings.brightness();
        for row in &mut self.rows {
            render::set_brightness(row, level);
        }
    }
}
