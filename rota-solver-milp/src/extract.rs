//! Conversion of solved assignment values into a roster table.

use log::warn;
use rota_core::{
    LeaveCalendar, PlanningHorizon, Roster, RosterRow, SolveError, StaffTable, shift_time_label,
};

use crate::model::ShiftVariables;

/// Values above this threshold read as an assignment.
const ASSIGNED_THRESHOLD: f64 = 0.5;

/// Boolean `(staff, day, slot)` assignments read back from a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignmentMatrix {
    assigned: Vec<bool>,
    num_staff: usize,
    num_days: usize,
    shifts_per_day: usize,
}

impl AssignmentMatrix {
    /// Read every assignment variable through `value`.
    pub(crate) fn from_values<F>(shifts: &ShiftVariables, value: F) -> Self
    where
        F: Fn(good_lp::Variable) -> f64,
    {
        let mut matrix = Self::empty(
            shifts.num_staff(),
            shifts.num_days(),
            shifts.shifts_per_day(),
        );
        for staff in 0..shifts.num_staff() {
            for day in 0..shifts.num_days() {
                for slot in 0..shifts.shifts_per_day() {
                    let on = shifts
                        .get(staff, day, slot)
                        .is_some_and(|var| value(var) > ASSIGNED_THRESHOLD);
                    if on {
                        matrix.set(staff, day, slot);
                    }
                }
            }
        }
        matrix
    }

    pub(crate) fn empty(num_staff: usize, num_days: usize, shifts_per_day: usize) -> Self {
        let len = num_staff
            .saturating_mul(num_days)
            .saturating_mul(shifts_per_day);
        Self {
            assigned: vec![false; len],
            num_staff,
            num_days,
            shifts_per_day,
        }
    }

    fn index(&self, staff: usize, day: usize, slot: usize) -> Option<usize> {
        if staff >= self.num_staff || day >= self.num_days || slot >= self.shifts_per_day {
            return None;
        }
        staff
            .checked_mul(self.num_days)?
            .checked_add(day)?
            .checked_mul(self.shifts_per_day)?
            .checked_add(slot)
    }

    pub(crate) fn set(&mut self, staff: usize, day: usize, slot: usize) {
        if let Some(cell) = self
            .index(staff, day, slot)
            .and_then(|i| self.assigned.get_mut(i))
        {
            *cell = true;
        }
    }

    pub(crate) fn is_assigned(&self, staff: usize, day: usize, slot: usize) -> bool {
        self.index(staff, day, slot)
            .and_then(|i| self.assigned.get(i))
            .is_some_and(|on| *on)
    }

    /// Build the roster table.
    ///
    /// Staff on leave are skipped even if the solution assigns them, and
    /// `(day, slot)` pairs with nobody assigned produce no row.
    pub(crate) fn to_roster(
        &self,
        staff: &StaffTable,
        leave: &LeaveCalendar,
        horizon: &PlanningHorizon,
    ) -> Result<Roster, SolveError> {
        let shifts_per_day = u32::try_from(self.shifts_per_day).unwrap_or(u32::MAX);
        let mut rows = Vec::new();
        for (day, date) in horizon.dates().iter().enumerate().take(self.num_days) {
            for slot in 0..self.shifts_per_day {
                let mut names = Vec::new();
                for (index, member) in staff.iter() {
                    if !self.is_assigned(index, day, slot) {
                        continue;
                    }
                    if leave.is_on_leave(index, day) {
                        warn!("dropping assignment of {} on {date}: on leave", member.name);
                        continue;
                    }
                    names.push(member.name.as_str());
                }
                if names.is_empty() {
                    continue;
                }
                let slot_number = u32::try_from(slot).unwrap_or(u32::MAX);
                let day_number = u32::try_from(day).map_or(u32::MAX, |d| d.saturating_add(1));
                rows.push(RosterRow::new(
                    day_number,
                    *date,
                    slot_number.saturating_add(1),
                    shift_time_label(shifts_per_day, slot_number),
                    names,
                ));
            }
        }
        if rows.is_empty() {
            return Err(SolveError::EmptySolution);
        }
        Ok(Roster::from_rows(rows))
    }
}
