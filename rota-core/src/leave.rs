//! Leave requests and the per-staff leave calendar derived from them.
//!
//! Only approved requests affect a roster. A request covers every date from
//! its start to its end inclusive; the calendar keeps the covered days that
//! fall inside the planning horizon, keyed by staff index.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use log::warn;
use thiserror::Error;

use crate::{PlanningHorizon, StaffTable};

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeaveStatus {
    /// Awaiting a decision; ignored when rostering.
    Pending,
    /// Granted; the staff member cannot be rostered on covered days.
    Approved,
    /// Refused; ignored when rostering.
    Rejected,
}

impl FromStr for LeaveStatus {
    type Err = LeaveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            other => Err(LeaveParseError::Status(other.to_owned())),
        }
    }
}

/// Errors raised while parsing a leave request from text fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveParseError {
    /// The status was not `Pending`, `Approved` or `Rejected`.
    #[error("unknown leave status: {0}")]
    Status(String),
    /// A date was not in `YYYY-MM-DD` form.
    #[error("invalid leave date {value:?}: expected YYYY-MM-DD")]
    Date {
        /// The rejected input.
        value: String,
    },
}

/// A request for leave by a named staff member.
///
/// # Examples
/// ```
/// use rota_core::{LeaveRequest, LeaveStatus};
///
/// let request = LeaveRequest::parse("Ada", "Approved", "2024-03-15", "2024-03-20")
///     .expect("valid request");
/// assert_eq!(request.status, LeaveStatus::Approved);
/// assert!(request.covers(request.end_date));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaveRequest {
    /// Name matched exactly against the staff table.
    pub staff_member: String,
    /// Review state; only [`LeaveStatus::Approved`] is honoured.
    pub status: LeaveStatus,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-form leave category such as `Annual Leave`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub leave_type: Option<String>,
}

impl LeaveRequest {
    /// Construct an approved request.
    pub fn approved(
        staff_member: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            staff_member: staff_member.into(),
            status: LeaveStatus::Approved,
            start_date,
            end_date,
            leave_type: None,
        }
    }

    /// Parse a request from the textual fields external layers store.
    ///
    /// # Errors
    /// Returns [`LeaveParseError`] for an unknown status or a date not in
    /// ISO `YYYY-MM-DD` form.
    pub fn parse(
        staff_member: &str,
        status: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, LeaveParseError> {
        Ok(Self {
            staff_member: staff_member.to_owned(),
            status: status.parse()?,
            start_date: parse_iso_date(start_date)?,
            end_date: parse_iso_date(end_date)?,
            leave_type: None,
        })
    }

    /// Set the leave category while returning `self` for chaining.
    #[must_use]
    pub fn with_leave_type(mut self, leave_type: impl Into<String>) -> Self {
        self.leave_type = Some(leave_type.into());
        self
    }

    /// Whether the request is honoured when rostering.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Whether `date` lies within the request's inclusive range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

fn parse_iso_date(value: &str) -> Result<NaiveDate, LeaveParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| LeaveParseError::Date {
        value: value.to_owned(),
    })
}

/// Days each staff member is on approved leave inside a horizon.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaveCalendar {
    days: Vec<BTreeSet<usize>>,
}

impl LeaveCalendar {
    /// Create a calendar with no leave for `num_staff` staff members.
    pub fn empty(num_staff: usize) -> Self {
        Self {
            days: vec![BTreeSet::new(); num_staff],
        }
    }

    /// Derive the calendar from leave requests.
    ///
    /// Non-approved requests are skipped silently. Approved requests naming
    /// no staff row, or whose end precedes their start, are logged and
    /// skipped. Every row whose name matches is placed on leave.
    pub fn from_requests(
        staff: &StaffTable,
        requests: &[LeaveRequest],
        horizon: &PlanningHorizon,
    ) -> Self {
        let mut calendar = Self::empty(staff.len());
        for request in requests.iter().filter(|r| r.is_approved()) {
            if request.end_date < request.start_date {
                warn!(
                    "ignoring leave for {}: end {} precedes start {}",
                    request.staff_member, request.end_date, request.start_date
                );
                continue;
            }
            let mut matched = false;
            for index in staff.indices_named(&request.staff_member) {
                matched = true;
                for (day, date) in horizon.dates().iter().enumerate() {
                    if request.covers(*date) {
                        calendar.mark(index, day);
                    }
                }
            }
            if !matched {
                warn!(
                    "ignoring leave for unknown staff member {}",
                    request.staff_member
                );
            }
        }
        calendar
    }

    /// Record `staff` as on leave on `day`, growing the table if needed.
    pub fn mark(&mut self, staff: usize, day: usize) {
        if staff >= self.days.len() {
            self.days.resize_with(staff + 1, BTreeSet::new);
        }
        if let Some(days) = self.days.get_mut(staff) {
            days.insert(day);
        }
    }

    /// Whether `staff` is on leave on zero-based `day`.
    pub fn is_on_leave(&self, staff: usize, day: usize) -> bool {
        self.days.get(staff).is_some_and(|days| days.contains(&day))
    }

    /// Leave days for `staff` in ascending order.
    pub fn days_for(&self, staff: usize) -> impl Iterator<Item = usize> + '_ {
        self.days.get(staff).into_iter().flatten().copied()
    }

    /// Number of distinct staff with at least one leave day.
    pub fn staff_on_leave_count(&self) -> usize {
        self.days.iter().filter(|days| !days.is_empty()).count()
    }

    /// Total `(staff, day)` pairs on leave.
    pub fn total_leave_days(&self) -> usize {
        self.days.iter().map(BTreeSet::len).sum()
    }
}
