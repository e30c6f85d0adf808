//! Solve requests, responses and the backend trait.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::{
    CapacityCheck, DebugTrail, LeaveCalendar, LeaveRequest, ModelStage, PlanningHorizon,
    Preferences, Roster, SchedulingParameters, SolveError, SolveFailure, StaffTable,
};

/// Inputs for a single roster solve.
///
/// The request is a read-only snapshot: solvers never mutate it. When
/// `start_date` is `None` the horizon starts at the local current date.
///
/// # Examples
/// ```rust
/// use rota_core::{SchedulingParameters, SolveRequest, StaffTable};
///
/// let request = SolveRequest::new(
///     StaffTable::from_names(["Ada", "Grace"]),
///     SchedulingParameters::new(7, 3, 1, 5),
/// );
/// assert!(request.leave_requests.is_empty());
/// assert!(request.start_date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Staff rows; position is identity.
    pub staff: StaffTable,
    /// Roster shape and limits.
    pub parameters: SchedulingParameters,
    /// Soft shift preferences.
    #[cfg_attr(feature = "serde", serde(default))]
    pub preferences: Preferences,
    /// Leave requests; only approved ones are honoured.
    #[cfg_attr(feature = "serde", serde(default))]
    pub leave_requests: Vec<LeaveRequest>,
    /// First day of the horizon.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_date: Option<NaiveDate>,
}

impl SolveRequest {
    /// Create a request with no preferences or leave, starting today.
    pub fn new(staff: StaffTable, parameters: SchedulingParameters) -> Self {
        Self {
            staff,
            parameters,
            preferences: Preferences::new(),
            leave_requests: Vec::new(),
            start_date: None,
        }
    }

    /// Set preferences while returning `self` for chaining.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Set leave requests while returning `self` for chaining.
    #[must_use]
    pub fn with_leave(mut self, leave_requests: Vec<LeaveRequest>) -> Self {
        self.leave_requests = leave_requests;
        self
    }

    /// Fix the first day of the horizon while returning `self` for chaining.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Run the pre-checks, recording the capacity figures in `trail`.
    ///
    /// Checks run in order: non-empty staff table, separator-free names,
    /// positive parameters, then capacity.
    ///
    /// # Errors
    /// Returns [`SolveError::EmptyStaff`], [`SolveError::InvalidStaffName`],
    /// [`SolveError::InvalidParameters`] or [`SolveError::Capacity`].
    pub fn validate(&self, trail: &mut DebugTrail) -> Result<CapacityCheck, SolveError> {
        if self.staff.is_empty() {
            return Err(SolveError::EmptyStaff);
        }
        if let Some((_, member)) = self
            .staff
            .iter()
            .find(|(_, member)| member.name.contains(','))
        {
            return Err(SolveError::InvalidStaffName {
                name: member.name.clone(),
            });
        }
        self.parameters.validate()?;
        trail.record(format!("Total staff members: {}", self.staff.len()));
        let check = self.parameters.capacity(self.staff.len());
        trail.record(format!("Total shifts needed: {}", check.total_shifts));
        trail.record(format!(
            "Total staff slots needed: {}",
            check.total_slots_needed
        ));
        trail.record(format!(
            "Maximum available staff slots: {}",
            check.max_available_slots
        ));
        trail.record(format!("Weeks in period: {}", check.weeks_in_period));
        check.ensure_sufficient().map_err(SolveError::from)
    }

    /// Resolve the planning horizon.
    ///
    /// # Errors
    /// Returns [`SolveError::ModelConstruction`] when the horizon runs past
    /// the supported calendar range.
    pub fn horizon(&self) -> Result<PlanningHorizon, SolveError> {
        let days = self.parameters.num_days;
        self.start_date
            .map_or_else(
                || PlanningHorizon::starting_today(days),
                |start| PlanningHorizon::new(start, days),
            )
            .ok_or_else(|| SolveError::ModelConstruction {
                stage: ModelStage::Variables,
                message: format!("a horizon of {days} days exceeds the supported calendar"),
            })
    }

    /// Derive the approved-leave calendar over `horizon`.
    pub fn leave_calendar(&self, horizon: &PlanningHorizon) -> LeaveCalendar {
        LeaveCalendar::from_requests(&self.staff, &self.leave_requests, horizon)
    }
}

/// Termination status reported by a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Proven optimal by the solver.
    Optimal,
    /// A solution was found but optimality was not proven.
    Feasible,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// The objective is unbounded.
    Unbounded,
    /// The solver stopped without a conclusion.
    Unknown,
}

impl SolveStatus {
    /// Whether the status carries a usable assignment.
    pub const fn has_solution(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Optimal => "OPTIMAL",
            Self::Feasible => "FEASIBLE",
            Self::Infeasible => "INFEASIBLE",
            Self::Unbounded => "UNBOUNDED",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Figures describing how a solve went.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    /// Wall-clock time spent in the solver.
    pub solve_time: Duration,
    /// Staff assignments in the roster.
    pub total_assignments: usize,
    /// Weighted penalty of the returned assignment.
    pub objective: f64,
    /// Key figures recorded during the call.
    pub debug_trail: DebugTrail,
}

/// A successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResponse {
    /// Non-empty roster table.
    pub roster: Roster,
    /// Status the solver finished with.
    pub status: SolveStatus,
    /// Timing, objective and trail.
    pub diagnostics: Diagnostics,
}

/// Produce a roster for a request.
///
/// Implementations must run the request's pre-checks before building a
/// model and must return a [`SolveFailure`] rather than panic. Each call is
/// self-contained: a solver may be shared across threads and called
/// concurrently with independent requests.
pub trait Solver: Send + Sync {
    /// Solve a request, producing a roster or a failure with its trail.
    ///
    /// # Errors
    /// Returns [`SolveFailure`] when a pre-check fails, the model cannot be
    /// built, the backend errors, or no usable assignment is found.
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterError, RosterRow};
    use rstest::rstest;

    struct DummySolver;

    impl Solver for DummySolver {
        fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveFailure> {
            let mut trail = DebugTrail::new();
            if let Err(error) = request.validate(&mut trail) {
                return Err(SolveFailure::new(error, trail));
            }
            let horizon = request.horizon()?;
            let date = horizon.start_date();
            Ok(SolveResponse {
                roster: Roster::from_rows(vec![RosterRow::new(1, date, 1, "07:00-15:00", ["A"])]),
                status: SolveStatus::Optimal,
                diagnostics: Diagnostics {
                    debug_trail: trail,
                    ..Diagnostics::default()
                },
            })
        }
    }

    fn request(staff: &[&str], params: SchedulingParameters) -> SolveRequest {
        SolveRequest::new(StaffTable::from_names(staff.iter().copied()), params)
    }

    #[rstest]
    fn returns_response_on_valid_request() {
        let req = request(&["A", "B"], SchedulingParameters::new(1, 1, 1, 1));
        let response = DummySolver.solve(&req).expect("valid request");
        assert_eq!(response.roster.len(), 1);
        assert_eq!(
            response.diagnostics.debug_trail.entries().first().map(String::as_str),
            Some("Total staff members: 2")
        );
    }

    #[rstest]
    fn empty_staff_fails_before_recording() {
        let req = request(&[], SchedulingParameters::new(7, 3, 1, 5));
        let failure = DummySolver.solve(&req).expect_err("empty staff");
        assert_eq!(failure.error, SolveError::EmptyStaff);
        assert!(failure.debug_trail.is_empty());
    }

    #[rstest]
    fn comma_in_staff_name_is_rejected() {
        let req = request(&["Ada", "Smith, John"], SchedulingParameters::new(1, 1, 1, 1));
        let failure = DummySolver.solve(&req).expect_err("comma in name");
        assert_eq!(
            failure.error,
            SolveError::InvalidStaffName {
                name: "Smith, John".to_owned()
            }
        );
        assert!(failure.error.is_precheck());
        assert!(failure.debug_trail.is_empty());
    }

    #[rstest]
    fn invalid_parameters_fail_fast() {
        let req = request(&["A"], SchedulingParameters::new(7, 3, 1, 0));
        let failure = DummySolver.solve(&req).expect_err("zero cap");
        assert_eq!(
            failure.error,
            SolveError::InvalidParameters(ParameterError::MaxShiftsPerWeek)
        );
    }

    #[rstest]
    fn capacity_failure_keeps_figures_in_trail() {
        let req = request(&["A", "B"], SchedulingParameters::new(7, 3, 3, 5));
        let failure = DummySolver.solve(&req).expect_err("insufficient capacity");
        assert!(matches!(failure.error, SolveError::Capacity(_)));
        let rendered = failure.debug_trail.render();
        assert!(rendered.contains("Total staff slots needed: 63"));
        assert!(rendered.contains("Maximum available staff slots: 10"));
    }

    #[rstest]
    fn fixed_start_date_drives_horizon() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).expect("valid date");
        let req = request(&["A"], SchedulingParameters::new(3, 3, 1, 5)).with_start_date(start);
        let horizon = req.horizon().expect("in range");
        assert_eq!(
            horizon.date_for(2),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
    }

    #[rstest]
    #[case(SolveStatus::Optimal, "OPTIMAL", true)]
    #[case(SolveStatus::Feasible, "FEASIBLE", true)]
    #[case(SolveStatus::Infeasible, "INFEASIBLE", false)]
    #[case(SolveStatus::Unknown, "UNKNOWN", false)]
    fn status_display_and_usability(
        #[case] status: SolveStatus,
        #[case] label: &str,
        #[case] usable: bool,
    ) {
        assert_eq!(status.to_string(), label);
        assert_eq!(status.has_solution(), usable);
    }
}
