//! Summary statistics for a roster table.
//!
//! Metrics depend only on the table's shape, so they work on hand-built
//! rosters as well as solver output. An absent or empty roster yields all
//! zeros.

use crate::{PreferredShift, Preferences, Roster, RosterRow, StaffTable};

/// Fixed-key summary of a roster.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterMetrics {
    /// Number of rows.
    pub total_shifts: usize,
    /// Mean `Staff_Count` per row.
    pub avg_staff_per_shift: f64,
    /// Percentage of rows with at least one staff member.
    pub coverage: f64,
    /// `sum(Staff_Count) / rows * 100`; an assignment density, not a share
    /// of staff capacity.
    pub staff_utilization: f64,
    /// Percentage of counted assignments that match a preference.
    pub preference_satisfaction: f64,
}

/// How assignments are matched against preferences.
#[derive(Debug, Clone, Copy)]
pub enum PreferenceMatching<'a> {
    /// Match each assignment against the staff member's declared preferred
    /// shift. Only assignments of staff with a declaration are counted.
    Declared {
        /// Staff table used to resolve names to indices.
        staff: &'a StaffTable,
        /// Declared preferences keyed by staff index.
        preferences: &'a Preferences,
    },
    /// Count an assignment as preferred when the shift starts at `07:00`,
    /// `15:00` or `23:00` and the staff *name* contains `Morning`,
    /// `Evening` or `Night` respectively. Every comma-separated entry is
    /// counted, including empty ones.
    LegacyNameSubstring,
}

impl<'a> PreferenceMatching<'a> {
    /// Match against declared preferences.
    pub const fn declared(staff: &'a StaffTable, preferences: &'a Preferences) -> Self {
        Self::Declared { staff, preferences }
    }

    fn counts(&self, roster: &Roster) -> (usize, usize) {
        match self {
            Self::Declared { staff, preferences } => declared_counts(roster, staff, preferences),
            Self::LegacyNameSubstring => legacy_counts(roster),
        }
    }
}

fn declared_counts(
    roster: &Roster,
    staff: &StaffTable,
    preferences: &Preferences,
) -> (usize, usize) {
    let mut matched = 0;
    let mut counted = 0;
    for (row, name) in roster.assignments() {
        let Some(preferred) = staff
            .indices_named(name)
            .find_map(|index| preferences.get(index))
        else {
            continue;
        };
        counted += 1;
        if PreferredShift::from_shift_time(&row.shift_time) == Some(preferred) {
            matched += 1;
        }
    }
    (matched, counted)
}

fn legacy_counts(roster: &Roster) -> (usize, usize) {
    let mut matched = 0;
    let mut counted = 0;
    for row in roster.rows() {
        for name in row.staff.split(',').map(str::trim) {
            counted += 1;
            if legacy_match(row, name) {
                matched += 1;
            }
        }
    }
    (matched, counted)
}

fn legacy_match(row: &RosterRow, name: &str) -> bool {
    [
        ("07:00", "Morning"),
        ("15:00", "Evening"),
        ("23:00", "Night"),
    ]
    .iter()
    .any(|(start, word)| row.shift_time.starts_with(start) && name.contains(word))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "roster sizes are far below f64 mantissa range"
)]
#[expect(clippy::float_arithmetic, reason = "percentages are inherently fractional")]
fn ratio(numerator: usize, denominator: usize, scale: f64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * scale
}

/// Compute metrics for `roster`.
///
/// # Examples
/// ```
/// use rota_core::{PreferenceMatching, calculate_roster_metrics};
///
/// let metrics = calculate_roster_metrics(None, PreferenceMatching::LegacyNameSubstring);
/// assert_eq!(metrics.total_shifts, 0);
/// assert_eq!(metrics.coverage, 0.0);
/// ```
pub fn calculate_roster_metrics(
    roster: Option<&Roster>,
    matching: PreferenceMatching<'_>,
) -> RosterMetrics {
    let Some(table) = roster.filter(|r| !r.is_empty()) else {
        return RosterMetrics::default();
    };
    let rows = table.len();
    let assigned = table.total_assignments();
    let covered = table.rows().iter().filter(|row| row.staff_count > 0).count();
    let (matched, counted) = matching.counts(table);
    RosterMetrics {
        total_shifts: rows,
        avg_staff_per_shift: ratio(assigned, rows, 1.0),
        coverage: ratio(covered, rows, 100.0),
        staff_utilization: ratio(assigned, rows, 100.0),
        preference_satisfaction: ratio(matched, counted, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PreferredShift, RosterRow, Staff};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn approx(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
    }

    #[fixture]
    fn roster() -> Roster {
        Roster::from_rows(vec![
            RosterRow::new(1, date(), 1, "07:00-15:00", ["Ada", "Grace"]),
            RosterRow::new(1, date(), 2, "15:00-23:00", ["Linus"]),
            RosterRow::new(1, date(), 3, "23:00-07:00", ["Ada", "Grace", "Linus"]),
        ])
    }

    #[fixture]
    fn staff() -> StaffTable {
        StaffTable::new(vec![Staff::new("Ada"), Staff::new("Grace"), Staff::new("Linus")])
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Roster::default()))]
    fn empty_or_absent_roster_is_all_zero(#[case] roster: Option<Roster>) {
        let metrics =
            calculate_roster_metrics(roster.as_ref(), PreferenceMatching::LegacyNameSubstring);
        assert_eq!(metrics, RosterMetrics::default());
    }

    #[rstest]
    fn density_metrics_follow_staff_counts(roster: Roster) {
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::LegacyNameSubstring);
        assert_eq!(metrics.total_shifts, 3);
        assert!(approx(metrics.avg_staff_per_shift, 2.0));
        assert!(approx(metrics.coverage, 100.0));
        assert!(approx(metrics.staff_utilization, 200.0));
    }

    #[rstest]
    fn coverage_counts_hand_built_empty_rows() {
        let mut empty = RosterRow::new(1, date(), 2, "15:00-23:00", Vec::<&str>::new());
        empty.staff = "No staff assigned".to_owned();
        let roster = Roster::from_rows(vec![
            RosterRow::new(1, date(), 1, "07:00-15:00", ["Ada"]),
            empty,
        ]);
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::LegacyNameSubstring);
        assert!(approx(metrics.coverage, 50.0));
        assert!(approx(metrics.staff_utilization, 50.0));
    }

    #[rstest]
    fn declared_matching_counts_only_declared_staff(roster: Roster, staff: StaffTable) {
        let prefs = Preferences::new()
            .with(0, PreferredShift::Morning)
            .with(2, PreferredShift::Morning);
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::declared(&staff, &prefs));
        // Ada: morning (hit), night (miss). Linus: evening, night (misses).
        assert!(approx(metrics.preference_satisfaction, 25.0));
    }

    #[rstest]
    fn declared_matching_without_preferences_is_zero(roster: Roster, staff: StaffTable) {
        let prefs = Preferences::new();
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::declared(&staff, &prefs));
        assert!(approx(metrics.preference_satisfaction, 0.0));
    }

    #[rstest]
    fn legacy_matching_inspects_names() {
        let roster = Roster::from_rows(vec![
            RosterRow::new(1, date(), 1, "07:00-15:00", ["Morning Star", "Ada"]),
            RosterRow::new(1, date(), 3, "23:00-07:00", ["Night Owl", "Morning Star"]),
        ]);
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::LegacyNameSubstring);
        assert!(approx(metrics.preference_satisfaction, 50.0));
    }

    #[rstest]
    fn legacy_matching_counts_blank_entries() {
        let mut row = RosterRow::new(1, date(), 1, "07:00-15:00", ["Morning Star"]);
        row.staff = "Morning Star, ".to_owned();
        let roster = Roster::from_rows(vec![row]);
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::LegacyNameSubstring);
        assert!(approx(metrics.preference_satisfaction, 50.0));
    }

    #[rstest]
    fn normal_names_never_satisfy_legacy_matching(roster: Roster) {
        let metrics =
            calculate_roster_metrics(Some(&roster), PreferenceMatching::LegacyNameSubstring);
        assert!(approx(metrics.preference_satisfaction, 0.0));
    }
}
