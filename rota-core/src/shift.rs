//! Shift slots, their time-of-day labels, and preferred shifts.
//!
//! Time labels exist only for the three-shift hospital day. Every other
//! `(shifts_per_day, slot)` pair resolves to [`UNKNOWN_SHIFT_TIME`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Label used when no time-of-day is defined for a slot.
pub const UNKNOWN_SHIFT_TIME: &str = "Unknown";

/// Known `(shifts_per_day, slot, label)` entries.
const SHIFT_TIMES: &[(u32, u32, &str)] = &[
    (3, 0, "07:00-15:00"),
    (3, 1, "15:00-23:00"),
    (3, 2, "23:00-07:00"),
];

/// Time-of-day label for a zero-based `slot` on a day of `shifts_per_day`.
///
/// # Examples
/// ```
/// use rota_core::shift_time_label;
///
/// assert_eq!(shift_time_label(3, 0), "07:00-15:00");
/// assert_eq!(shift_time_label(2, 0), "Unknown");
/// ```
#[must_use]
pub fn shift_time_label(shifts_per_day: u32, slot: u32) -> &'static str {
    SHIFT_TIMES
        .iter()
        .find(|(per_day, index, _)| *per_day == shifts_per_day && *index == slot)
        .map_or(UNKNOWN_SHIFT_TIME, |&(_, _, label)| label)
}

/// Shift a staff member would rather work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PreferredShift {
    /// First slot of the day.
    Morning,
    /// Second slot of the day.
    Evening,
    /// Third slot of the day.
    Night,
}

impl PreferredShift {
    /// All preferred shifts in slot order.
    pub const ALL: [Self; 3] = [Self::Morning, Self::Evening, Self::Night];

    /// Zero-based slot index this preference targets.
    #[must_use]
    pub const fn slot(self) -> u32 {
        match self {
            Self::Morning => 0,
            Self::Evening => 1,
            Self::Night => 2,
        }
    }

    /// Label used in preference records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }

    /// Time-of-day label of the targeted slot on a three-shift day.
    #[must_use]
    pub fn shift_time(self) -> &'static str {
        shift_time_label(3, self.slot())
    }

    /// Whether the targeted slot exists on a day of `shifts_per_day`.
    #[must_use]
    pub const fn fits(self, shifts_per_day: u32) -> bool {
        self.slot() < shifts_per_day
    }

    /// Recover the preferred shift from a roster `Shift_Time` value.
    ///
    /// Matching uses the start-time prefix, so `"07:00-15:00"` and
    /// `"07:00"` both map to [`PreferredShift::Morning`].
    ///
    /// # Examples
    /// ```
    /// use rota_core::PreferredShift;
    ///
    /// assert_eq!(PreferredShift::from_shift_time("23:00-07:00"), Some(PreferredShift::Night));
    /// assert_eq!(PreferredShift::from_shift_time("Unknown"), None);
    /// ```
    #[must_use]
    pub fn from_shift_time(shift_time: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shift| {
            shift
                .shift_time()
                .split('-')
                .next()
                .is_some_and(|start| shift_time.starts_with(start))
        })
    }
}

impl fmt::Display for PreferredShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a preferred shift label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preferred shift: {0}")]
pub struct ParseShiftError(pub String);

impl FromStr for PreferredShift {
    type Err = ParseShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shift| shift.label() == s)
            .ok_or_else(|| ParseShiftError(s.to_owned()))
    }
}
