//! One physical clock face.

use time_circuits_hw::{DigitGroup, OutputPin};

use super::RowRole;

/// Boxed digit group as stored in a row.
pub type Digits = Box<dyn DigitGroup + Send>;

/// Boxed indicator line as stored in a row.
pub type Indicator = Box<dyn OutputPin + Send>;

/// Four digit groups and the AM/PM indicators of one clock face.
///
/// Rows are built once at startup and only change through the functions in
/// [`render`](super::render), each of which leaves every group and both
/// indicators showing the same value when it returns.
pub struct DisplayRow {
    pub(super) role: RowRole,
    pub(super) month: Digits,
    pub(super) day: Digits,
    pub(super) year: Digits,
    pub(super) time: Digits,
    pub(super) am: Indicator,
    pub(super) pm: Indicator,
}

impl DisplayRow {
    /// Assembles a row from its parts.
    pub fn new(
        role: RowRole,
        month: Digits,
        day: Digits,
        year: Digits,
        time: Digits,
        am: Indicator,
        pm: Indicator,
    ) -> Self {
        Self {
            role,
            month,
            day,
            year,
            time,
            am,
            pm,
        }
    }

    /// Returns which clock face this row is.
    pub fn role(&self) -> RowRole {
        self.role
    }
}

impl std::fmt::Debug for DisplayRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayRow")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
