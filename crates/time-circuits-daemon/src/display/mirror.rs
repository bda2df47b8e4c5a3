//! Rows built from in-memory parts.

use time_circuits_hw::{VirtualDigits, VirtualPin};

use super::{DisplayRow, RowRole};

/// Observer handles for a row made of virtual digit groups and pins.
///
/// [`RowMirror::build`] hands out a row whose parts share state with the
/// mirror, so whatever is rendered into the row can be read back here.
#[derive(Debug, Clone, Default)]
pub struct RowMirror {
    pub month: VirtualDigits,
    pub day: VirtualDigits,
    pub year: VirtualDigits,
    pub time: VirtualDigits,
    pub am: VirtualPin,
    pub pm: VirtualPin,
}

impl RowMirror {
    /// Creates blank virtual parts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row wired to this mirror.
    pub fn build(&self, role: RowRole) -> DisplayRow {
        DisplayRow::new(
            role,
            Box::new(self.month.clone()),
            Box::new(self.day.clone()),
            Box::new(self.year.clone()),
            Box::new(self.time.clone()),
            Box::new(self.am.clone()),
            Box::new(self.pm.clone()),
        )
    }

    /// Returns true if every group is blank and both indicators are off.
    pub fn is_blank(&self) -> bool {
        self.month.is_blank()
            && self.day.is_blank()
            && self.year.is_blank()
            && self.time.is_blank()
            && !self.am.is_active()
            && !self.pm.is_active()
    }

    /// One-line rendering of the row, e.g. `" OCT|26  |1985|01:21|AM"`.
    pub fn summary(&self) -> String {
        let time = self.time.text();
        let time: String = if self.time.colon() {
            time.chars()
                .take(2)
                .chain(std::iter::once(':'))
                .chain(time.chars().skip(2))
                .collect()
        } else {
            time
        };
        let indicator = match (self.am.is_active(), self.pm.is_active()) {
            (true, false) => "AM",
            (false, true) => "PM",
            (true, true) => "AP",
            (false, false) => "  ",
        };
        format!(
            "{}|{}|{}|{}|{}",
            self.month.text(),
            self.day.text(),
            self.year.text(),
            time,
            indicator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{render, TimeSnapshot};

    #[test]
    fn test_summary() {
        let mirror = RowMirror::new();
        let mut row = mirror.build(RowRole::Destination);
        render::render_date_time(&mut row, &TimeSnapshot::new(1985, 10, 26, 1, 21), false);
        assert_eq!(mirror.summary(), " OCT|26  |1985|01:21|AM");
    }

    #[test]
    fn test_new_mirror_is_blank() {
        assert!(RowMirror::new().is_blank());
    }
}
