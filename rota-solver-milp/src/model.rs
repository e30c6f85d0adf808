//! Mixed-integer formulation of the rostering problem.
//!
//! One binary variable per `(staff, day, slot)` decides assignments. Hard
//! rules fix variables or bound sums; soft rules carry a slack variable
//! whose weighted value enters the minimised objective.

use good_lp::{Constraint, Expression, ProblemVariables, Variable, constraint, variable};
use log::{debug, warn};
use rota_core::{
    DebugTrail, LeaveCalendar, ModelStage, PreferredShift, Preferences, SchedulingParameters,
    SolveError, StaffTable,
};

use crate::PenaltyWeights;

/// Largest number of extra shifts the weekly cap may be exceeded by.
const WEEKLY_SLACK_LIMIT: u32 = 3;

/// Slots involved in the rest-period rule.
const MORNING: usize = 0;
const EVENING: usize = 1;
const NIGHT: usize = 2;

/// Inputs the model is built from.
pub(crate) struct ModelInput<'a> {
    pub(crate) staff: &'a StaffTable,
    pub(crate) parameters: SchedulingParameters,
    pub(crate) leave: &'a LeaveCalendar,
    pub(crate) preferences: &'a Preferences,
}

/// Dense `(staff, day, slot)` grid of assignment variables.
pub(crate) struct ShiftVariables {
    vars: Vec<Variable>,
    num_staff: usize,
    num_days: usize,
    shifts_per_day: usize,
}

impl ShiftVariables {
    pub(crate) const fn num_staff(&self) -> usize {
        self.num_staff
    }

    pub(crate) const fn num_days(&self) -> usize {
        self.num_days
    }

    pub(crate) const fn shifts_per_day(&self) -> usize {
        self.shifts_per_day
    }

    /// Variable for `staff` working `slot` on `day`, if in range.
    pub(crate) fn get(&self, staff: usize, day: usize, slot: usize) -> Option<Variable> {
        if staff >= self.num_staff || day >= self.num_days || slot >= self.shifts_per_day {
            return None;
        }
        let index = staff
            .checked_mul(self.num_days)?
            .checked_add(day)?
            .checked_mul(self.shifts_per_day)?
            .checked_add(slot)?;
        self.vars.get(index).copied()
    }

    /// Sum of `staff`'s variables on `day`.
    fn day_total(&self, staff: usize, day: usize) -> Expression {
        (0..self.shifts_per_day)
            .filter_map(|slot| self.get(staff, day, slot))
            .sum()
    }
}

/// Variable and constraint counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ModelStats {
    pub(crate) assignment_vars: usize,
    pub(crate) fixed_by_leave: usize,
    pub(crate) coverage_slacks: usize,
    pub(crate) weekly_slacks: usize,
    pub(crate) rest_slacks: usize,
    pub(crate) preference_indicators: usize,
    pub(crate) constraints: usize,
}

/// A fully built model awaiting a solver.
pub(crate) struct RosterModel {
    pub(crate) problem: ProblemVariables,
    pub(crate) shifts: ShiftVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) stats: ModelStats,
}

fn model_error(stage: ModelStage, message: impl ToString) -> SolveError {
    SolveError::ModelConstruction {
        stage,
        message: message.to_string(),
    }
}

fn to_usize(value: u32) -> Result<usize, SolveError> {
    usize::try_from(value).map_err(|err| model_error(ModelStage::Variables, err))
}

impl RosterModel {
    /// Build variables, constraints, and the objective for `input`.
    pub(crate) fn build(
        input: &ModelInput<'_>,
        weights: PenaltyWeights,
        trail: &mut DebugTrail,
    ) -> Result<Self, SolveError> {
        weights
            .validate()
            .map_err(|err| model_error(ModelStage::Objective, err))?;
        let mut builder = Builder::new(weights);
        let shifts = builder.assignment_variables(input)?;
        builder.one_shift_per_day(&shifts);
        builder.minimum_coverage(&shifts, input.parameters.min_staff_per_shift);
        builder.weekly_cap(&shifts, input.parameters.max_shifts_per_week);
        builder.rest_periods(&shifts);
        let preferred = usable_preferences(input, trail);
        builder.preferences(&shifts, &preferred);

        let Builder {
            problem,
            constraints,
            objective_terms,
            mut stats,
            ..
        } = builder;
        if objective_terms.is_empty() {
            return Err(model_error(ModelStage::Objective, "objective has no terms"));
        }
        stats.constraints = constraints.len();
        trail.record(format!(
            "Model variables: {} assignments ({} fixed by leave), {} slack, {} preference indicators",
            stats.assignment_vars,
            stats.fixed_by_leave,
            stats.coverage_slacks + stats.weekly_slacks + stats.rest_slacks,
            stats.preference_indicators
        ));
        trail.record(format!("Model constraints: {}", stats.constraints));
        Ok(Self {
            problem,
            shifts,
            objective: objective_terms.into_iter().sum(),
            constraints,
            stats,
        })
    }
}

/// Preferences that name a real staff member and an existing slot.
fn usable_preferences(
    input: &ModelInput<'_>,
    trail: &mut DebugTrail,
) -> Vec<(usize, PreferredShift)> {
    let shifts_per_day = input.parameters.shifts_per_day;
    input
        .preferences
        .iter()
        .filter(|&(staff, shift)| {
            let Some(name) = input.staff.name(staff) else {
                warn!("ignoring preference for unknown staff index {staff}");
                trail.record(format!("Ignoring preference for unknown staff index {staff}"));
                return false;
            };
            if !shift.fits(shifts_per_day) {
                warn!(
                    "ignoring {shift} preference for {name}: only {shifts_per_day} shifts per day"
                );
                trail.record(format!(
                    "Ignoring {shift} preference for {name}: only {shifts_per_day} shifts per day"
                ));
                return false;
            }
            true
        })
        .collect()
}

struct Builder {
    problem: ProblemVariables,
    constraints: Vec<Constraint>,
    objective_terms: Vec<Expression>,
    weights: PenaltyWeights,
    stats: ModelStats,
}

impl Builder {
    fn new(weights: PenaltyWeights) -> Self {
        Self {
            problem: ProblemVariables::new(),
            constraints: Vec::new(),
            objective_terms: Vec::new(),
            weights,
            stats: ModelStats::default(),
        }
    }

    /// Allocate assignment variables; days on leave are fixed to zero.
    fn assignment_variables(
        &mut self,
        input: &ModelInput<'_>,
    ) -> Result<ShiftVariables, SolveError> {
        let num_staff = input.staff.len();
        let num_days = to_usize(input.parameters.num_days)?;
        let shifts_per_day = to_usize(input.parameters.shifts_per_day)?;
        let total = num_staff
            .checked_mul(num_days)
            .and_then(|n| n.checked_mul(shifts_per_day))
            .ok_or_else(|| {
                let message =
                    format!("{num_staff} x {num_days} x {shifts_per_day} variables overflow");
                model_error(ModelStage::Variables, message)
            })?;
        let mut vars = Vec::with_capacity(total);
        for staff in 0..num_staff {
            for day in 0..num_days {
                let on_leave = input.leave.is_on_leave(staff, day);
                for _ in 0..shifts_per_day {
                    let definition = if on_leave {
                        self.stats.fixed_by_leave += 1;
                        variable().binary().max(0)
                    } else {
                        variable().binary()
                    };
                    vars.push(self.problem.add(definition));
                }
            }
        }
        self.stats.assignment_vars = vars.len();
        debug!("allocated {} assignment variables", vars.len());
        Ok(ShiftVariables {
            vars,
            num_staff,
            num_days,
            shifts_per_day,
        })
    }

    fn one_shift_per_day(&mut self, shifts: &ShiftVariables) {
        for staff in 0..shifts.num_staff() {
            for day in 0..shifts.num_days() {
                let total = shifts.day_total(staff, day);
                self.constraints.push(constraint!(total <= 1.0));
            }
        }
    }

    fn minimum_coverage(&mut self, shifts: &ShiftVariables, min_staff: u32) {
        let required = f64::from(min_staff);
        let weight = f64::from(self.weights.coverage);
        for day in 0..shifts.num_days() {
            for slot in 0..shifts.shifts_per_day() {
                let assigned: Expression = (0..shifts.num_staff())
                    .filter_map(|staff| shifts.get(staff, day, slot))
                    .sum();
                let slack = self
                    .problem
                    .add(variable().integer().min(0).max(required));
                self.stats.coverage_slacks += 1;
                self.constraints
                    .push(constraint!(assigned + slack >= required));
                self.objective_terms.push(slack * weight);
            }
        }
    }

    fn weekly_cap(&mut self, shifts: &ShiftVariables, max_shifts: u32) {
        let cap = f64::from(max_shifts);
        let weight = f64::from(self.weights.weekly_cap);
        for staff in 0..shifts.num_staff() {
            for week_start in (0..shifts.num_days()).step_by(7) {
                let week_end = week_start.saturating_add(7).min(shifts.num_days());
                let worked: Expression = (week_start..week_end)
                    .map(|day| shifts.day_total(staff, day))
                    .sum();
                let slack = self
                    .problem
                    .add(variable().integer().min(0).max(WEEKLY_SLACK_LIMIT));
                self.stats.weekly_slacks += 1;
                self.constraints.push(constraint!(worked - slack <= cap));
                self.objective_terms.push(slack * weight);
            }
        }
    }

    /// Discourage evening and night of one day followed by the next morning.
    fn rest_periods(&mut self, shifts: &ShiftVariables) {
        if shifts.shifts_per_day() <= NIGHT {
            return;
        }
        let weight = f64::from(self.weights.rest_period);
        for staff in 0..shifts.num_staff() {
            for day in 1..shifts.num_days() {
                let previous = day - 1;
                let (Some(evening), Some(night), Some(morning)) = (
                    shifts.get(staff, previous, EVENING),
                    shifts.get(staff, previous, NIGHT),
                    shifts.get(staff, day, MORNING),
                ) else {
                    continue;
                };
                let slack = self.problem.add(variable().binary());
                self.stats.rest_slacks += 1;
                self.constraints
                    .push(constraint!(evening + night + morning - slack <= 1.0));
                self.objective_terms.push(slack * weight);
            }
        }
    }

    /// Penalise each day a staff member works a shift other than the one
    /// they prefer.
    ///
    /// The indicator may only be set when the preferred slot is worked, so
    /// `worked - indicator` is one exactly when another slot is worked.
    fn preferences(&mut self, shifts: &ShiftVariables, preferred: &[(usize, PreferredShift)]) {
        let weight = f64::from(self.weights.preference);
        for &(staff, shift) in preferred {
            let Ok(slot) = usize::try_from(shift.slot()) else {
                continue;
            };
            for day in 0..shifts.num_days() {
                let Some(target) = shifts.get(staff, day, slot) else {
                    continue;
                };
                let indicator = self.problem.add(variable().binary());
                self.stats.preference_indicators += 1;
                self.constraints.push(constraint!(indicator <= target));
                let worked = shifts.day_total(staff, day);
                self.objective_terms.push((worked - indicator) * weight);
            }
        }
    }
}
