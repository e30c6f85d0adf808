//! Pre-check and leave-derivation tests for `SolveRequest`.

use chrono::NaiveDate;
use rota_core::{
    DebugTrail, LeaveRequest, LeaveStatus, ParameterError, SchedulingParameters, SolveError,
    SolveRequest, StaffTable,
};
use rstest::{fixture, rstest};

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap_or_default()
}

#[fixture]
fn fourteen_staff() -> StaffTable {
    StaffTable::from_names((1..=14).map(|n| format!("Nurse {n:02}")))
}

#[rstest]
#[case(SchedulingParameters::new(0, 3, 2, 5), "Number of days must be positive")]
#[case(SchedulingParameters::new(7, 0, 2, 5), "Shifts per day must be positive")]
#[case(SchedulingParameters::new(7, 3, 0, 5), "Minimum staff per shift must be positive")]
#[case(SchedulingParameters::new(7, 3, 2, 0), "Maximum shifts per week must be positive")]
fn parameter_errors_name_the_parameter(
    fourteen_staff: StaffTable,
    #[case] params: SchedulingParameters,
    #[case] message: &str,
) {
    let request = SolveRequest::new(fourteen_staff, params);
    let mut trail = DebugTrail::new();
    let err = request.validate(&mut trail).expect_err("invalid parameters");
    assert!(matches!(err, SolveError::InvalidParameters(_)));
    assert_eq!(err.to_string(), message);
}

#[rstest]
fn empty_staff_is_checked_before_parameters() {
    let request = SolveRequest::new(StaffTable::default(), SchedulingParameters::new(0, 0, 0, 0));
    let mut trail = DebugTrail::new();
    let err = request.validate(&mut trail).expect_err("no staff");
    assert_eq!(err.to_string(), "No staff data provided");
    assert_ne!(err, SolveError::InvalidParameters(ParameterError::NumDays));
}

#[rstest]
fn capacity_figures_are_recorded(fourteen_staff: StaffTable) {
    let request = SolveRequest::new(fourteen_staff, SchedulingParameters::new(7, 3, 2, 5));
    let mut trail = DebugTrail::new();
    let check = request.validate(&mut trail).expect("sufficient capacity");
    assert_eq!(check.total_slots_needed, 42);
    assert_eq!(check.max_available_slots, 70);
    assert_eq!(
        trail.entries(),
        &[
            "Total staff members: 14".to_owned(),
            "Total shifts needed: 21".to_owned(),
            "Total staff slots needed: 42".to_owned(),
            "Maximum available staff slots: 70".to_owned(),
            "Weeks in period: 1".to_owned(),
        ]
    );
}

#[rstest]
fn leave_calendar_uses_request_horizon(fourteen_staff: StaffTable) {
    let mut pending = LeaveRequest::approved("Nurse 02", date(1), date(7));
    pending.status = LeaveStatus::Pending;
    let request = SolveRequest::new(fourteen_staff, SchedulingParameters::new(7, 3, 2, 5))
        .with_start_date(date(3))
        .with_leave(vec![
            LeaveRequest::approved("Nurse 01", date(1), date(4)),
            pending,
        ]);
    let horizon = request.horizon().expect("in range");
    let calendar = request.leave_calendar(&horizon);
    assert_eq!(calendar.days_for(0).collect::<Vec<_>>(), vec![0, 1]);
    assert_eq!(calendar.staff_on_leave_count(), 1);
}

#[cfg(feature = "serde")]
#[rstest]
fn request_loads_from_json() {
    let json = r#"{
        "staff": [{"name": "Ada", "role": "Senior Nurse"}, {"name": "Grace"}],
        "parameters": {
            "num_days": 7,
            "shifts_per_day": 3,
            "min_staff_per_shift": 1,
            "max_shifts_per_week": 5
        },
        "preferences": {"1": {"preferred_shift": "Night"}},
        "leave_requests": [{
            "staff_member": "Ada",
            "status": "Approved",
            "start_date": "2024-01-02",
            "end_date": "2024-01-03",
            "leave_type": "Annual Leave"
        }],
        "start_date": "2024-01-01"
    }"#;
    let request: SolveRequest = serde_json::from_str(json).expect("valid request");
    assert_eq!(request.staff.len(), 2);
    assert_eq!(request.start_date, Some(date(1)));
    let horizon = request.horizon().expect("in range");
    let calendar = request.leave_calendar(&horizon);
    assert_eq!(calendar.days_for(0).collect::<Vec<_>>(), vec![1, 2]);
}
