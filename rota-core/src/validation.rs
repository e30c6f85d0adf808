//! Business-rule checks over a finished roster.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::{LeaveCalendar, PlanningHorizon, Roster, StaffTable};

/// A rule broken by a roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterViolation {
    /// A row lists nobody.
    #[error("day {day} shift {shift} has no staff")]
    EmptyShift {
        /// One-based day number.
        day: u32,
        /// One-based shift number.
        shift: u32,
    },
    /// `Staff_Count` disagrees with the names listed.
    #[error("day {day} shift {shift} reports {reported} staff but lists {listed}")]
    StaffCountMismatch {
        /// One-based day number.
        day: u32,
        /// One-based shift number.
        shift: u32,
        /// The row's `Staff_Count`.
        reported: usize,
        /// Names parsed from the row's `Staff` field.
        listed: usize,
    },
    /// A listed name has no staff row.
    #[error("day {day} shift {shift} lists unknown staff member {name}")]
    UnknownStaff {
        /// One-based day number.
        day: u32,
        /// One-based shift number.
        shift: u32,
        /// The unmatched name.
        name: String,
    },
    /// A staff member works more than one shift on a date.
    #[error("{name} works {count} shifts on {date}")]
    DoubleBooked {
        /// Staff name.
        name: String,
        /// Date affected.
        date: NaiveDate,
        /// Shifts worked that date.
        count: usize,
    },
    /// A staff member works on a day of approved leave.
    #[error("{name} is rostered on {date} while on leave")]
    WorkedOnLeave {
        /// Staff name.
        name: String,
        /// Date affected.
        date: NaiveDate,
    },
    /// A staff member works two adjacent shifts of the same day.
    #[error("{name} works consecutive shifts {shift} and {} on day {day}", .shift + 1)]
    ConsecutiveShifts {
        /// Staff name.
        name: String,
        /// One-based day number.
        day: u32,
        /// The earlier one-based shift.
        shift: u32,
    },
}

/// Check `roster` against staffing rules.
///
/// Violations are reported in row order per rule: row-level checks first,
/// then per-date double booking and consecutive shifts.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rota_core::{LeaveCalendar, PlanningHorizon, Roster, RosterRow, StaffTable, validate_roster};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
/// let horizon = PlanningHorizon::new(start, 1).expect("in range");
/// let staff = StaffTable::from_names(["Ada"]);
/// let roster = Roster::from_rows(vec![RosterRow::new(1, start, 1, "07:00-15:00", ["Ada"])]);
/// let leave = LeaveCalendar::empty(staff.len());
/// assert!(validate_roster(&roster, &staff, &leave, &horizon).is_empty());
/// ```
pub fn validate_roster(
    roster: &Roster,
    staff: &StaffTable,
    leave: &LeaveCalendar,
    horizon: &PlanningHorizon,
) -> Vec<RosterViolation> {
    let mut violations = Vec::new();
    let mut worked: BTreeMap<(NaiveDate, &str), Vec<(u32, u32)>> = BTreeMap::new();

    for row in roster.rows() {
        let names: Vec<&str> = row.staff_names().collect();
        if names.is_empty() {
            violations.push(RosterViolation::EmptyShift {
                day: row.day,
                shift: row.shift,
            });
        }
        if names.len() != row.staff_count {
            violations.push(RosterViolation::StaffCountMismatch {
                day: row.day,
                shift: row.shift,
                reported: row.staff_count,
                listed: names.len(),
            });
        }
        let day = horizon.day_of(row.date);
        for name in names {
            if staff.index_of(name).is_none() {
                violations.push(RosterViolation::UnknownStaff {
                    day: row.day,
                    shift: row.shift,
                    name: name.to_owned(),
                });
            }
            let on_leave = day.is_some_and(|offset| {
                staff
                    .indices_named(name)
                    .any(|index| leave.is_on_leave(index, offset))
            });
            if on_leave {
                violations.push(RosterViolation::WorkedOnLeave {
                    name: name.to_owned(),
                    date: row.date,
                });
            }
            worked
                .entry((row.date, name))
                .or_default()
                .push((row.day, row.shift));
        }
    }

    for ((date, name), mut shifts) in worked {
        if shifts.len() > 1 {
            violations.push(RosterViolation::DoubleBooked {
                name: name.to_owned(),
                date,
                count: shifts.len(),
            });
        }
        shifts.sort_unstable();
        for pair in shifts.windows(2) {
            if let [(day, earlier), (_, later)] = pair
                && *later == earlier + 1
            {
                violations.push(RosterViolation::ConsecutiveShifts {
                    name: name.to_owned(),
                    day: *day,
                    shift: *earlier,
                });
            }
        }
    }
    violations
}
