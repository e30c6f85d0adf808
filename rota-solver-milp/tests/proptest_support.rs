//! Proptest strategies for roster solver property-based tests.
//!
//! Generated scenarios are small enough for HiGHS to solve in well under a
//! second, and may or may not have enough capacity.

use proptest::prelude::*;
use rota_core::test_support::{approved_leave, fixed_request, fixed_start, staff_named};
use rota_core::{LeaveRequest, SchedulingParameters, SolveRequest};

/// A generated staffing problem.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Number of staff in the table.
    pub staff_count: usize,
    /// Roster shape and limits.
    pub parameters: SchedulingParameters,
    /// `(staff, first day offset, length in days)` leave blocks.
    pub leave: Vec<(usize, u64, u64)>,
}

impl Scenario {
    /// Build the request, starting on the fixed test date.
    pub fn request(&self) -> SolveRequest {
        let staff = staff_named(self.staff_count);
        let leave: Vec<LeaveRequest> = self
            .leave
            .iter()
            .filter_map(|&(member, offset, days)| {
                let name = staff.name(member)?.to_owned();
                let start = fixed_start().checked_add_days(chrono::Days::new(offset))?;
                Some(approved_leave(&name, start, days))
            })
            .collect();
        fixed_request(staff, self.parameters).with_leave(leave)
    }
}

/// Strategy for a scenario with 3-10 staff over up to ten days.
pub fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (3_usize..=10, 1_u32..=10, 1_u32..=3, 1_u32..=2, 2_u32..=7).prop_flat_map(
        |(staff_count, num_days, shifts_per_day, min_staff, max_shifts)| {
            let block = (0..staff_count, 0_u64..u64::from(num_days), 1_u64..=3);
            proptest::collection::vec(block, 0..=4).prop_map(move |leave| Scenario {
                staff_count,
                parameters: SchedulingParameters::new(
                    num_days,
                    shifts_per_day,
                    min_staff,
                    max_shifts,
                ),
                leave,
            })
        },
    )
}
