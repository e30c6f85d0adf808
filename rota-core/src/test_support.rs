//! Fixtures and a deterministic solver shared by unit, behaviour, and
//! solver-backend tests.

use chrono::{Days, NaiveDate};

use crate::{
    Diagnostics, LeaveRequest, Roster, RosterRow, SchedulingParameters, SolveError, SolveFailure,
    SolveRequest, SolveResponse, SolveStatus, Solver, StaffTable, shift_time_label,
};

/// Monday 1 January 2024, the start date used by fixed-date requests.
pub fn fixed_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Staff table of `count` members named `Nurse 01`, `Nurse 02`, ...
///
/// Zero padding keeps every name from being a substring of another.
pub fn staff_named(count: usize) -> StaffTable {
    StaffTable::from_names((1..=count).map(|n| format!("Nurse {n:02}")))
}

/// Approved leave for `name` covering `days` days from `start`.
pub fn approved_leave(name: &str, start: NaiveDate, days: u64) -> LeaveRequest {
    let end = start
        .checked_add_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(start);
    LeaveRequest::approved(name, start, end)
}

/// Request starting at [`fixed_start`] with no leave or preferences.
pub fn fixed_request(staff: StaffTable, parameters: SchedulingParameters) -> SolveRequest {
    SolveRequest::new(staff, parameters).with_start_date(fixed_start())
}

/// Deterministic [`Solver`] that fills shifts round-robin.
///
/// Each `(day, shift)` receives up to `min_staff_per_shift` staff who are
/// neither on leave nor already working that day. The weekly cap is not
/// considered. Pre-checks and the empty-solution rule match real backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRosterSolver;

impl Solver for FixedRosterSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveFailure> {
        let mut trail = crate::DebugTrail::new();
        if let Err(error) = request.validate(&mut trail) {
            return Err(SolveFailure::new(error, trail));
        }
        let horizon = match request.horizon() {
            Ok(horizon) => horizon,
            Err(error) => return Err(SolveFailure::new(error, trail)),
        };
        let leave = request.leave_calendar(&horizon);
        let params = request.parameters;
        let staff_count = request.staff.len();
        let wanted = usize::try_from(params.min_staff_per_shift).unwrap_or(usize::MAX);
        let mut next = 0_usize;
        let mut rows = Vec::new();
        for (day, date) in horizon.dates().iter().enumerate() {
            let mut busy = vec![false; staff_count];
            for shift in 0..params.shifts_per_day {
                let mut names = Vec::new();
                for _ in 0..staff_count {
                    if names.len() >= wanted {
                        break;
                    }
                    let candidate = next;
                    next = if next + 1 == staff_count { 0 } else { next + 1 };
                    let free = busy.get(candidate).is_some_and(|b| !*b);
                    if free && !leave.is_on_leave(candidate, day) {
                        if let Some(slot) = busy.get_mut(candidate) {
                            *slot = true;
                        }
                        if let Some(name) = request.staff.name(candidate) {
                            names.push(name);
                        }
                    }
                }
                if !names.is_empty() {
                    let day_number = u32::try_from(day + 1).unwrap_or(u32::MAX);
                    rows.push(RosterRow::new(
                        day_number,
                        *date,
                        shift + 1,
                        shift_time_label(params.shifts_per_day, shift),
                        names,
                    ));
                }
            }
        }
        let roster = Roster::from_rows(rows);
        trail.record(format!("Total assignments made: {}", roster.total_assignments()));
        if roster.is_empty() {
            return Err(SolveFailure::new(SolveError::EmptySolution, trail));
        }
        Ok(SolveResponse {
            diagnostics: Diagnostics {
                total_assignments: roster.total_assignments(),
                debug_trail: trail,
                ..Diagnostics::default()
            },
            roster,
            status: SolveStatus::Optimal,
        })
    }
}
