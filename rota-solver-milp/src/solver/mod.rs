//! `MilpSolver` implementation backed by `good_lp` and HiGHS.

use std::time::{Duration, Instant};

use good_lp::solvers::highs::highs;
use good_lp::{ResolutionError, Solution, SolutionStatus, SolverModel};
use log::{debug, info, warn};
use rota_core::{
    DebugTrail, Diagnostics, Roster, SolveError, SolveFailure, SolveRequest, SolveResponse,
    SolveStatus, Solver,
};

use crate::MilpSolverConfig;
use crate::extract::AssignmentMatrix;
use crate::model::{ModelInput, RosterModel};

/// Mixed-integer roster solver.
///
/// Each call builds a fresh model from the request, so one solver may be
/// shared across threads.
///
/// # Examples
/// ```no_run
/// use rota_core::{SchedulingParameters, SolveRequest, Solver, StaffTable};
/// use rota_solver_milp::MilpSolver;
///
/// let staff = StaffTable::from_names((1..=14).map(|n| format!("Nurse {n}")));
/// let request = SolveRequest::new(staff, SchedulingParameters::new(7, 3, 2, 5));
/// let response = MilpSolver::new().solve(&request).expect("roster");
/// assert!(response.roster.len() <= 21);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MilpSolver {
    config: MilpSolverConfig,
}

/// What a successful backend run hands back to [`MilpSolver::solve`].
struct Solved {
    roster: Roster,
    status: SolveStatus,
    objective: f64,
    solve_time: Duration,
}

impl MilpSolver {
    /// Construct a solver using default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: MilpSolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &MilpSolverConfig {
        &self.config
    }

    fn run(&self, request: &SolveRequest, trail: &mut DebugTrail) -> Result<Solved, SolveError> {
        request.validate(trail)?;
        let horizon = request.horizon()?;
        let leave = request.leave_calendar(&horizon);
        trail.record(format!("Staff on leave: {}", leave.staff_on_leave_count()));

        let input = ModelInput {
            staff: &request.staff,
            parameters: request.parameters,
            leave: &leave,
            preferences: &request.preferences,
        };
        let RosterModel {
            problem,
            shifts,
            objective,
            constraints,
            stats,
        } = RosterModel::build(&input, self.config.weights, trail)?;
        debug!("model built: {stats:?}");

        let threads = i32::try_from(self.config.workers).unwrap_or(i32::MAX);
        let seed = i32::try_from(self.config.random_seed).unwrap_or(i32::MAX);
        let configured = problem
            .minimise(objective.clone())
            .using(highs)
            .set_option("time_limit", self.config.time_limit.as_secs_f64())
            .set_option("threads", threads)
            .set_option("random_seed", seed)
            .set_option("output_flag", self.config.log_to_console)
            .set_option("log_to_console", self.config.log_to_console);
        let model = constraints
            .into_iter()
            .fold(configured, |acc, constraint| acc.with(constraint));

        trail.record("Starting optimization...");
        info!(
            "solving roster for {} staff over {} days",
            request.staff.len(),
            request.parameters.num_days
        );
        let started_at = Instant::now();
        let outcome = model.solve();
        let solve_time = started_at.elapsed();

        let solution = match outcome {
            Ok(solution) => solution,
            Err(error) => {
                let Some(status) = failure_status(&error) else {
                    return Err(SolveError::Solver(error.to_string()));
                };
                trail.record(format!("Optimization status: {status}"));
                return Err(SolveError::NoFeasibleSolution { status });
            }
        };

        let status = solution_status(solution.status());
        trail.record(format!("Optimization status: {status}"));
        info!("solver finished with status {status} in {solve_time:?}");

        let matrix = AssignmentMatrix::from_values(&shifts, |var| solution.value(var));
        let roster = matrix.to_roster(&request.staff, &leave, &horizon)?;
        trail.record(format!(
            "Total assignments made: {}",
            roster.total_assignments()
        ));
        Ok(Solved {
            roster,
            status,
            objective: solution.eval(&objective),
            solve_time,
        })
    }
}

/// Status of a run that produced an assignment.
///
/// Stopping at the time or gap limit leaves optimality unproven.
const fn solution_status(status: SolutionStatus) -> SolveStatus {
    match status {
        SolutionStatus::Optimal => SolveStatus::Optimal,
        SolutionStatus::GapLimit | SolutionStatus::TimeLimit => SolveStatus::Feasible,
    }
}

/// Status of a run that ended without an assignment.
///
/// `None` marks a backend failure rather than a solver verdict.
fn failure_status(error: &ResolutionError) -> Option<SolveStatus> {
    match error {
        ResolutionError::Infeasible => Some(SolveStatus::Infeasible),
        ResolutionError::Unbounded => Some(SolveStatus::Unbounded),
        ResolutionError::Other("NoSolutionFound" | "Unknown") => Some(SolveStatus::Unknown),
        ResolutionError::Other(_) | ResolutionError::Str(_) => None,
    }
}

impl Solver for MilpSolver {
    fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveFailure> {
        let mut trail = DebugTrail::new();
        match self.run(request, &mut trail) {
            Ok(solved) => Ok(SolveResponse {
                diagnostics: Diagnostics {
                    solve_time: solved.solve_time,
                    total_assignments: solved.roster.total_assignments(),
                    objective: solved.objective,
                    debug_trail: trail,
                },
                roster: solved.roster,
                status: solved.status,
            }),
            Err(error) => {
                warn!("roster solve failed: {error}");
                Err(SolveFailure::new(error, trail))
            }
        }
    }
}
