//! Structured, never-failing boundary around a [`Solver`].

use log::{info, warn};

use crate::{
    DebugTrail, PreferenceMatching, Roster, RosterMetrics, SolveError, SolveRequest, SolveStatus,
    Solver, calculate_roster_metrics,
};

/// Heading placed before the debug trail in failure reports.
const TRAIL_HEADING: &str = "Optimization failed with the following issues:";

/// Result of one [`optimize_roster`] call.
///
/// Exactly one of `roster` and `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterOutcome {
    /// The roster on success.
    pub roster: Option<Roster>,
    /// Solver status, when a solve ran to completion.
    pub status: Option<SolveStatus>,
    /// The failure, if any.
    pub error: Option<SolveError>,
    /// Figures recorded during the call.
    pub debug_trail: DebugTrail,
}

impl RosterOutcome {
    /// Whether a roster was produced.
    pub const fn is_success(&self) -> bool {
        self.roster.is_some()
    }

    /// Human-readable failure report, or `None` on success.
    ///
    /// Pre-check failures report their own message. Later failures also
    /// list the debug trail so the figures behind the failure are visible.
    pub fn error_report(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        if error.is_precheck() || self.debug_trail.is_empty() {
            return Some(error.to_string());
        }
        Some(format!("{error}\n\n{TRAIL_HEADING}\n{}", self.debug_trail))
    }

    /// Metrics for the produced roster; all zeros on failure.
    pub fn metrics(&self, matching: PreferenceMatching<'_>) -> RosterMetrics {
        calculate_roster_metrics(self.roster.as_ref(), matching)
    }
}

/// Run `solver` on `request`, folding every failure into the outcome.
///
/// # Examples
/// ```
/// use rota_core::{
///     SchedulingParameters, SolveError, SolveFailure, SolveRequest, SolveResponse, Solver,
///     StaffTable, optimize_roster,
/// };
///
/// struct Unavailable;
///
/// impl Solver for Unavailable {
///     fn solve(&self, _: &SolveRequest) -> Result<SolveResponse, SolveFailure> {
///         Err(SolveError::Solver("backend offline".to_owned()).into())
///     }
/// }
///
/// let request = SolveRequest::new(
///     StaffTable::from_names(["Ada"]),
///     SchedulingParameters::new(1, 1, 1, 1),
/// );
/// let outcome = optimize_roster(&Unavailable, &request);
/// assert!(!outcome.is_success());
/// assert_eq!(outcome.error_report().as_deref(), Some("Solver failed: backend offline"));
/// ```
pub fn optimize_roster<S>(solver: &S, request: &SolveRequest) -> RosterOutcome
where
    S: Solver + ?Sized,
{
    match solver.solve(request) {
        Ok(response) => {
            info!(
                "roster produced: {} rows, status {}",
                response.roster.len(),
                response.status
            );
            RosterOutcome {
                roster: Some(response.roster),
                status: Some(response.status),
                error: None,
                debug_trail: response.diagnostics.debug_trail,
            }
        }
        Err(failure) => {
            warn!("roster optimization failed: {}", failure.error);
            let status = match &failure.error {
                SolveError::NoFeasibleSolution { status } => Some(*status),
                _ => None,
            };
            RosterOutcome {
                roster: None,
                status,
                error: Some(failure.error),
                debug_trail: failure.debug_trail,
            }
        }
    }
}
