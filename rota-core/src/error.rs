//! Errors raised while producing a roster.

use std::fmt;

use thiserror::Error;

use crate::{CapacityError, DebugTrail, ParameterError, SolveStatus};

/// Stage of model construction that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    /// Allocating decision and slack variables.
    Variables,
    /// Building the weighted objective.
    Objective,
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variables => "variables",
            Self::Objective => "objective",
        })
    }
}

/// Errors returned by [`crate::Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The staff table had no rows.
    #[error("No staff data provided")]
    EmptyStaff,
    /// A staff name contains the comma used to join the `Staff` column.
    #[error("Staff name {name:?} must not contain a comma")]
    InvalidStaffName {
        /// The offending name.
        name: String,
    },
    /// A scheduling parameter was not positive.
    #[error(transparent)]
    InvalidParameters(#[from] ParameterError),
    /// Minimum coverage cannot fit within the weekly cap.
    #[error(transparent)]
    Capacity(#[from] CapacityError),
    /// The model could not be built.
    #[error("Failed to build optimization model ({stage}): {message}")]
    ModelConstruction {
        /// Stage that failed.
        stage: ModelStage,
        /// Description of the failure.
        message: String,
    },
    /// The solver backend raised an error.
    #[error("Solver failed: {0}")]
    Solver(String),
    /// The solver finished without a usable assignment.
    #[error(
        "Could not find a feasible solution. Status: {status}. This might be due to \
         conflicting constraints, insufficient staff capacity, or too many approved leaves."
    )]
    NoFeasibleSolution {
        /// Status reported by the solver.
        status: SolveStatus,
    },
    /// The solver reported success but assigned nobody.
    #[error("No valid assignments found in the solution")]
    EmptySolution,
}

impl SolveError {
    /// Whether the error arose before any model was built.
    ///
    /// Pre-check failures carry their own explanation; later failures are
    /// reported together with the debug trail.
    pub const fn is_precheck(&self) -> bool {
        matches!(
            self,
            Self::EmptyStaff
                | Self::InvalidStaffName { .. }
                | Self::InvalidParameters(_)
                | Self::Capacity(_)
        )
    }
}

/// A [`SolveError`] together with the trail gathered before it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct SolveFailure {
    /// What went wrong.
    #[source]
    pub error: SolveError,
    /// Figures recorded before the failure.
    pub debug_trail: DebugTrail,
}

impl SolveFailure {
    /// Pair an error with the trail recorded so far.
    pub const fn new(error: SolveError, debug_trail: DebugTrail) -> Self {
        Self { error, debug_trail }
    }
}

impl From<SolveError> for SolveFailure {
    fn from(error: SolveError) -> Self {
        Self::new(error, DebugTrail::new())
    }
}
