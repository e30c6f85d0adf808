//! Core domain types for the Rota rostering engine.
//!
//! The crate describes a staffing problem (staff table, approved leave,
//! scheduling parameters and soft preferences), the roster table a solver
//! produces, and the metrics used to evaluate it. Solver backends implement
//! the [`Solver`] trait; callers that want the structured, never-failing
//! boundary use [`optimize_roster`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod horizon;
pub mod leave;
pub mod metrics;
pub mod outcome;
pub mod params;
pub mod preferences;
pub mod roster;
pub mod shift;
pub mod solver;
pub mod staff;
pub mod trail;
pub mod validation;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use error::{ModelStage, SolveError, SolveFailure};
pub use horizon::PlanningHorizon;
pub use leave::{LeaveCalendar, LeaveParseError, LeaveRequest, LeaveStatus};
pub use metrics::{PreferenceMatching, RosterMetrics, calculate_roster_metrics};
pub use outcome::{RosterOutcome, optimize_roster};
pub use params::{CapacityCheck, CapacityError, ParameterError, SchedulingParameters};
pub use preferences::{Preferences, StaffPreference};
pub use roster::{Roster, RosterRow};
pub use shift::{ParseShiftError, PreferredShift, UNKNOWN_SHIFT_TIME, shift_time_label};
pub use solver::{Diagnostics, SolveRequest, SolveResponse, SolveStatus, Solver};
pub use staff::{Staff, StaffTable};
pub use trail::DebugTrail;
pub use validation::{RosterViolation, validate_roster};
