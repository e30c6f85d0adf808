//! Scheduling parameters, their validation, and the capacity pre-check.

use std::fmt;

use thiserror::Error;

/// Shape and limits of a roster.
///
/// Every field must be positive; see [`SchedulingParameters::validate`].
///
/// # Examples
/// ```
/// use rota_core::SchedulingParameters;
///
/// let params = SchedulingParameters::new(7, 3, 2, 5);
/// assert!(params.validate().is_ok());
/// assert_eq!(params.weeks_in_period(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchedulingParameters {
    /// Days in the planning horizon.
    pub num_days: u32,
    /// Shift slots per day.
    pub shifts_per_day: u32,
    /// Staff wanted on every shift.
    pub min_staff_per_shift: u32,
    /// Shifts a staff member should work in any seven-day window.
    pub max_shifts_per_week: u32,
}

/// A scheduling parameter that is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// `num_days` was zero.
    #[error("Number of days must be positive")]
    NumDays,
    /// `shifts_per_day` was zero.
    #[error("Shifts per day must be positive")]
    ShiftsPerDay,
    /// `min_staff_per_shift` was zero.
    #[error("Minimum staff per shift must be positive")]
    MinStaffPerShift,
    /// `max_shifts_per_week` was zero.
    #[error("Maximum shifts per week must be positive")]
    MaxShiftsPerWeek,
}

impl SchedulingParameters {
    /// Construct parameters in field order.
    pub const fn new(
        num_days: u32,
        shifts_per_day: u32,
        min_staff_per_shift: u32,
        max_shifts_per_week: u32,
    ) -> Self {
        Self {
            num_days,
            shifts_per_day,
            min_staff_per_shift,
            max_shifts_per_week,
        }
    }

    /// Check every field is positive, reporting the first that is not.
    ///
    /// # Errors
    /// Returns the [`ParameterError`] naming the offending field.
    pub const fn validate(&self) -> Result<(), ParameterError> {
        if self.num_days == 0 {
            return Err(ParameterError::NumDays);
        }
        if self.shifts_per_day == 0 {
            return Err(ParameterError::ShiftsPerDay);
        }
        if self.min_staff_per_shift == 0 {
            return Err(ParameterError::MinStaffPerShift);
        }
        if self.max_shifts_per_week == 0 {
            return Err(ParameterError::MaxShiftsPerWeek);
        }
        Ok(())
    }

    /// Number of seven-day windows; the last may be shorter.
    pub const fn weeks_in_period(&self) -> u32 {
        self.num_days.div_ceil(7)
    }

    /// Number of `(day, shift)` slots.
    pub fn total_shifts(&self) -> u64 {
        u64::from(self.num_days) * u64::from(self.shifts_per_day)
    }

    /// Compute the capacity figures for `staff_count` staff members.
    ///
    /// Products saturate rather than wrap.
    pub fn capacity(&self, staff_count: usize) -> CapacityCheck {
        let num_staff = u64::try_from(staff_count).unwrap_or(u64::MAX);
        let total_shifts = self.total_shifts();
        let weeks_in_period = self.weeks_in_period();
        CapacityCheck {
            num_staff,
            total_shifts,
            total_slots_needed: total_shifts.saturating_mul(u64::from(self.min_staff_per_shift)),
            max_available_slots: num_staff
                .saturating_mul(u64::from(self.max_shifts_per_week))
                .saturating_mul(u64::from(weeks_in_period)),
            weeks_in_period,
            params: *self,
        }
    }
}

/// Arithmetic capacity figures for a staffing problem.
///
/// Passing the check does not guarantee a solve succeeds; failing it means
/// no assignment can meet minimum coverage within the weekly cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityCheck {
    /// Staff available.
    pub num_staff: u64,
    /// `(day, shift)` slots in the horizon.
    pub total_shifts: u64,
    /// Staff assignments needed for minimum coverage.
    pub total_slots_needed: u64,
    /// Staff assignments allowed under the weekly cap.
    pub max_available_slots: u64,
    /// Seven-day windows in the horizon.
    pub weeks_in_period: u32,
    /// Parameters the figures were derived from.
    pub params: SchedulingParameters,
}

impl CapacityCheck {
    /// Whether minimum coverage fits within available slots.
    pub const fn is_sufficient(&self) -> bool {
        self.total_slots_needed <= self.max_available_slots
    }

    /// Smallest staff count whose available slots cover the need.
    pub fn minimum_staff(&self) -> u64 {
        let per_member =
            u64::from(self.params.max_shifts_per_week) * u64::from(self.weeks_in_period);
        if per_member == 0 {
            return 0;
        }
        self.total_slots_needed.div_ceil(per_member)
    }

    /// Turn the figures into a result.
    ///
    /// # Errors
    /// Returns [`CapacityError`] when more slots are needed than available.
    pub const fn ensure_sufficient(self) -> Result<Self, CapacityError> {
        if self.is_sufficient() {
            Ok(self)
        } else {
            Err(CapacityError { check: self })
        }
    }
}

/// Minimum coverage cannot fit within the weekly cap.
///
/// The message reports both slot counts, the parameters, and remediation
/// suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct CapacityError {
    /// The failing figures.
    pub check: CapacityCheck,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.check;
        let p = &c.params;
        writeln!(
            f,
            "Not enough staff capacity. Need {} slots but only have {} available.",
            c.total_slots_needed, c.max_available_slots
        )?;
        writeln!(f, "Current parameters:")?;
        writeln!(f, "- Staff members: {}", c.num_staff)?;
        writeln!(f, "- Days: {}", p.num_days)?;
        writeln!(f, "- Shifts per day: {}", p.shifts_per_day)?;
        writeln!(f, "- Min staff per shift: {}", p.min_staff_per_shift)?;
        writeln!(f, "- Max shifts per week: {}", p.max_shifts_per_week)?;
        writeln!(f, "Suggestions:")?;
        writeln!(
            f,
            "1. Increase staff members (need at least {})",
            c.minimum_staff()
        )?;
        writeln!(
            f,
            "2. Reduce min staff per shift (currently {})",
            p.min_staff_per_shift
        )?;
        write!(
            f,
            "3. Increase max shifts per week (currently {})",
            p.max_shifts_per_week
        )
    }
}
