//! Soft shift preferences keyed by staff index.

use std::collections::BTreeMap;

use crate::{PreferredShift, StaffTable};

/// A single staff member's declared preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaffPreference {
    /// The shift the staff member would rather work.
    pub preferred_shift: PreferredShift,
}

/// Mapping from staff index to preferred shift.
///
/// Entries never constrain a solve; solvers treat them as a low-weight
/// objective term.
///
/// # Examples
/// ```
/// use rota_core::{PreferredShift, Preferences};
///
/// let prefs = Preferences::new().with(0, PreferredShift::Night);
/// assert_eq!(prefs.get(0), Some(PreferredShift::Night));
/// assert!(prefs.get(1).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Preferences {
    entries: BTreeMap<usize, StaffPreference>,
}

impl Preferences {
    /// Create an empty preference map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a preference while returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, staff: usize, shift: PreferredShift) -> Self {
        self.insert(staff, shift);
        self
    }

    /// Set the preference for `staff`, replacing any previous entry.
    pub fn insert(&mut self, staff: usize, shift: PreferredShift) {
        self.entries.insert(
            staff,
            StaffPreference {
                preferred_shift: shift,
            },
        );
    }

    /// Preferred shift for `staff`, if declared.
    pub fn get(&self, staff: usize) -> Option<PreferredShift> {
        self.entries.get(&staff).map(|pref| pref.preferred_shift)
    }

    /// Iterate `(staff, shift)` pairs in staff order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, PreferredShift)> + '_ {
        self.entries
            .iter()
            .map(|(staff, pref)| (*staff, pref.preferred_shift))
    }

    /// Number of declared preferences.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no preferences are declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derive default preferences from staff roles.
    ///
    /// Senior staff prefer mornings, doctors evenings, everyone else nights.
    pub fn from_roles(staff: &StaffTable) -> Self {
        staff
            .iter()
            .map(|(index, member)| {
                let shift = if member.role.contains("Senior") {
                    PreferredShift::Morning
                } else if member.role.contains("Doctor") {
                    PreferredShift::Evening
                } else {
                    PreferredShift::Night
                };
                (index, shift)
            })
            .collect()
    }
}

impl FromIterator<(usize, PreferredShift)> for Preferences {
    fn from_iter<I: IntoIterator<Item = (usize, PreferredShift)>>(iter: I) -> Self {
        let mut prefs = Self::new();
        for (staff, shift) in iter {
            prefs.insert(staff, shift);
        }
        prefs
    }
}
