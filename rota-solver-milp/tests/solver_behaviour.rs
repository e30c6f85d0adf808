//! Behavioural tests for `MilpSolver` using rstest-bdd.


use std::cell::RefCell;

use rota_core::test_support::{approved_leave, fixed_start, staff_named};
use rota_core::{
    LeaveRequest, RosterOutcome, RosterViolation, SchedulingParameters, SolveRequest, StaffTable,
    optimize_roster, validate_roster,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use solver_support::quick_solver;

#[derive(Debug)]
struct SolverWorld {
    staff: RefCell<StaffTable>,
    parameters: RefCell<SchedulingParameters>,
    leave: RefCell<Vec<LeaveRequest>>,
    request: RefCell<Option<SolveRequest>>,
    outcome: RefCell<Option<RosterOutcome>>,
}

impl SolverWorld {
    fn new() -> Self {
        Self {
            staff: RefCell::new(StaffTable::default()),
            parameters: RefCell::new(SchedulingParameters::new(7, 3, 2, 5)),
            leave: RefCell::new(Vec::new()),
            request: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> RosterOutcome {
        self.outcome
            .borrow()
            .clone()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_report(&self) -> String {
        self.expect_outcome()
            .error_report()
            .expect("a failed outcome should carry a report")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_request(&self) -> SolveRequest {
        self.request
            .borrow()
            .clone()
            .expect("request should be built before assertions")
    }
}

#[fixture]
fn world() -> SolverWorld {
    SolverWorld::new()
}

#[given("two staff members")]
fn given_two_staff(world: &SolverWorld) {
    world.staff.replace(staff_named(2));
}

#[given("fourteen staff members")]
fn given_fourteen_staff(world: &SolverWorld) {
    world.staff.replace(staff_named(14));
}

#[given("no staff members")]
fn given_no_staff(world: &SolverWorld) {
    world.staff.replace(StaffTable::default());
}

#[given("a week of three shifts needing three staff each")]
fn given_three_per_shift(world: &SolverWorld) {
    world.parameters.replace(SchedulingParameters::new(7, 3, 3, 5));
}

#[given("a week of three shifts needing two staff each")]
fn given_two_per_shift(world: &SolverWorld) {
    world.parameters.replace(SchedulingParameters::new(7, 3, 2, 5));
}

#[given("Nurse 05 has approved leave for the whole week")]
fn given_week_of_leave(world: &SolverWorld) {
    world
        .leave
        .borrow_mut()
        .push(approved_leave("Nurse 05", fixed_start(), 7));
}

#[when("I optimise the roster")]
fn when_optimise(world: &SolverWorld) {
    let request = SolveRequest::new(world.staff.borrow().clone(), *world.parameters.borrow())
        .with_leave(world.leave.borrow().clone())
        .with_start_date(fixed_start());
    let outcome = optimize_roster(&quick_solver(), &request);
    world.request.replace(Some(request));
    world.outcome.replace(Some(outcome));
}

#[then("the optimisation fails")]
fn then_fails(world: &SolverWorld) {
    let outcome = world.expect_outcome();
    assert!(!outcome.is_success());
    assert!(outcome.roster.is_none());
}

#[then("the report states that 63 slots are needed but only 10 are available")]
fn then_capacity_report(world: &SolverWorld) {
    let report = world.expect_report();
    assert!(
        report.starts_with("Not enough staff capacity. Need 63 slots but only have 10 available."),
        "{report}"
    );
    assert!(report.contains("1. Increase staff members (need at least 13)"));
}

#[then("the report says no staff data was provided")]
fn then_empty_staff_report(world: &SolverWorld) {
    assert_eq!(world.expect_report(), "No staff data provided");
}

#[then("a roster is produced")]
fn then_roster_produced(world: &SolverWorld) {
    let outcome = world.expect_outcome();
    assert!(outcome.is_success(), "{:?}", outcome.error_report());
    assert!(outcome.status.is_some_and(|status| status.has_solution()));
}

#[then("the roster has at most twenty-one rows")]
fn then_at_most_21_rows(world: &SolverWorld) {
    let rows = world.expect_outcome().roster.map_or(0, |roster| roster.len());
    assert!((1..=21).contains(&rows), "{rows} rows");
}

#[then("nobody works more than one shift per day")]
fn then_no_double_booking(world: &SolverWorld) {
    let request = world.expect_request();
    let outcome = world.expect_outcome();
    let Some(roster) = outcome.roster else {
        panic!("roster should be produced");
    };
    let Ok(horizon) = request.horizon() else {
        panic!("horizon should be in range");
    };
    let leave = request.leave_calendar(&horizon);
    let violations = validate_roster(&roster, &request.staff, &leave, &horizon);
    assert!(
        !violations
            .iter()
            .any(|v| matches!(v, RosterViolation::DoubleBooked { .. })),
        "{violations:?}"
    );
}

#[then("Nurse 05 does not appear in the roster")]
fn then_nurse_absent(world: &SolverWorld) {
    let outcome = world.expect_outcome();
    let Some(roster) = outcome.roster else {
        panic!("roster should be produced");
    };
    assert!(roster.rows().iter().all(|row| !row.lists("Nurse 05")));
}

#[scenario(path = "tests/features/solver.feature", index = 0)]
fn capacity_failure(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 1)]
fn well_staffed_week(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 2)]
fn leave_is_honoured(world: SolverWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/solver.feature", index = 3)]
fn empty_staff(world: SolverWorld) {
    let _ = world;
}
