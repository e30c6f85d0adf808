//! Configuration for [`crate::MilpSolver`].

use std::time::Duration;

use thiserror::Error;

/// Objective weights for the soft constraints.
///
/// The weights must keep the strict ranking
/// `coverage > rest_period > weekly_cap > preference > 0`; only their order
/// matters to the solver, so they may be rescaled freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenaltyWeights {
    /// Penalty per missing staff member on a shift.
    pub coverage: u32,
    /// Penalty per evening/night/next-morning run.
    pub rest_period: u32,
    /// Penalty per shift worked above the weekly cap.
    pub weekly_cap: u32,
    /// Penalty per day a staff member works a shift they did not prefer.
    pub preference: u32,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            coverage: 1000,
            rest_period: 750,
            weekly_cap: 500,
            preference: 10,
        }
    }
}

/// Weights that break the required ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PenaltyWeightsError {
    /// The lowest weight was zero.
    #[error("{name} weight must be positive")]
    NonPositive {
        /// Name of the weight.
        name: &'static str,
    },
    /// A weight did not exceed the one ranked below it.
    #[error("{higher} weight ({higher_value}) must exceed {lower} weight ({lower_value})")]
    Misordered {
        /// Name of the weight expected to be larger.
        higher: &'static str,
        /// Its value.
        higher_value: u32,
        /// Name of the weight expected to be smaller.
        lower: &'static str,
        /// Its value.
        lower_value: u32,
    },
}

impl PenaltyWeights {
    /// Check the ranking `coverage > rest_period > weekly_cap > preference > 0`.
    ///
    /// # Errors
    /// Returns the first pair found out of order, or
    /// [`PenaltyWeightsError::NonPositive`] when `preference` is zero.
    pub fn validate(&self) -> Result<(), PenaltyWeightsError> {
        let ranked = [
            ("coverage", self.coverage),
            ("rest_period", self.rest_period),
            ("weekly_cap", self.weekly_cap),
            ("preference", self.preference),
        ];
        for pair in ranked.windows(2) {
            if let &[(higher, higher_value), (lower, lower_value)] = pair
                && higher_value <= lower_value
            {
                return Err(PenaltyWeightsError::Misordered {
                    higher,
                    higher_value,
                    lower,
                    lower_value,
                });
            }
        }
        if self.preference == 0 {
            return Err(PenaltyWeightsError::NonPositive { name: "preference" });
        }
        Ok(())
    }
}

/// Configuration for [`crate::MilpSolver`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use rota_solver_milp::MilpSolverConfig;
///
/// let config = MilpSolverConfig::default().with_time_limit(Duration::from_secs(30));
/// assert_eq!(config.workers, 8);
/// assert_eq!(config.time_limit, Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilpSolverConfig {
    /// Wall-clock budget for one solve.
    pub time_limit: Duration,
    /// Parallel search threads requested from HiGHS.
    ///
    /// HiGHS fixes its thread pool on first use, so every solver in a
    /// process should request the same count.
    pub workers: u32,
    /// Seed for the solver's internal randomisation.
    pub random_seed: u32,
    /// Whether HiGHS prints its own progress log.
    pub log_to_console: bool,
    /// Soft-constraint weights.
    pub weights: PenaltyWeights,
}

impl Default for MilpSolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(120),
            workers: 8,
            random_seed: 0,
            log_to_console: false,
            weights: PenaltyWeights::default(),
        }
    }
}

impl MilpSolverConfig {
    /// Set the time budget.
    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Set the worker count.
    #[must_use]
    pub const fn with_workers(mut self, workers: u32) -> Self {
        self.workers = workers;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_random_seed(mut self, random_seed: u32) -> Self {
        self.random_seed = random_seed;
        self
    }

    /// Enable or disable HiGHS console output.
    #[must_use]
    pub const fn with_console_log(mut self, log_to_console: bool) -> Self {
        self.log_to_console = log_to_console;
        self
    }

    /// Replace the objective weights.
    #[must_use]
    pub const fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }
}
