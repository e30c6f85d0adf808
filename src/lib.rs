//! Facade crate for the Rota staff rostering engine.
//!
//! This crate re-exports the core domain types and exposes optional solver
//! implementations behind feature flags.

#![forbid(unsafe_code)]

pub use rota_core::{
    CapacityCheck, CapacityError, DebugTrail, Diagnostics, LeaveCalendar, LeaveRequest,
    LeaveStatus, ModelStage, ParameterError, PlanningHorizon, PreferenceMatching, PreferredShift,
    Preferences, Roster, RosterMetrics, RosterOutcome, RosterRow, RosterViolation,
    SchedulingParameters, SolveError, SolveFailure, SolveRequest, SolveResponse, SolveStatus,
    Solver, Staff, StaffPreference, StaffTable, calculate_roster_metrics, optimize_roster,
    shift_time_label, validate_roster,
};

#[cfg(feature = "test-support")]
pub use rota_core::test_support;

#[cfg(feature = "solver-milp")]
pub use rota_solver_milp::{MilpSolver, MilpSolverConfig, PenaltyWeights, PenaltyWeightsError};
