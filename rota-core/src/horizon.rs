//! Planning horizon: the calendar dates a roster covers.

use chrono::{Days, Local, NaiveDate};

/// Consecutive calendar days starting at `start_date`.
///
/// Day offsets are zero-based; roster rows report them one-based.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rota_core::PlanningHorizon;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 28).expect("valid date");
/// let horizon = PlanningHorizon::new(start, 3).expect("in range");
/// assert_eq!(horizon.date_for(2), NaiveDate::from_ymd_opt(2024, 3, 1));
/// assert_eq!(horizon.day_of(start), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningHorizon {
    start_date: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl PlanningHorizon {
    /// Build a horizon of `num_days` days from `start_date`.
    ///
    /// Returns `None` when the last day would fall outside the supported
    /// calendar range.
    pub fn new(start_date: NaiveDate, num_days: u32) -> Option<Self> {
        let dates = (0..u64::from(num_days))
            .map(|offset| start_date.checked_add_days(Days::new(offset)))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { start_date, dates })
    }

    /// Build a horizon starting at the local current date.
    pub fn starting_today(num_days: u32) -> Option<Self> {
        Self::new(Local::now().date_naive(), num_days)
    }

    /// First day of the horizon.
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Number of days covered.
    pub fn num_days(&self) -> usize {
        self.dates.len()
    }

    /// Date of the zero-based `day` offset, if inside the horizon.
    pub fn date_for(&self, day: usize) -> Option<NaiveDate> {
        self.dates.get(day).copied()
    }

    /// Zero-based offset of `date`, if inside the horizon.
    pub fn day_of(&self, date: NaiveDate) -> Option<usize> {
        let offset = usize::try_from((date - self.start_date).num_days()).ok()?;
        (offset < self.dates.len()).then_some(offset)
    }

    /// Every date in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    fn spans_month_and_leap_boundaries() {
        let horizon = PlanningHorizon::new(date(2024, 2, 27), 4).expect("in range");
        assert_eq!(
            horizon.dates(),
            &[
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1)
            ]
        );
    }

    #[rstest]
    #[case(date(2024, 1, 9), None)]
    #[case(date(2024, 1, 10), Some(0))]
    #[case(date(2024, 1, 16), Some(6))]
    #[case(date(2024, 1, 17), None)]
    fn day_of_is_bounded(#[case] probe: NaiveDate, #[case] expected: Option<usize>) {
        let horizon = PlanningHorizon::new(date(2024, 1, 10), 7).expect("in range");
        assert_eq!(horizon.day_of(probe), expected);
    }

    #[rstest]
    fn rejects_overflowing_range() {
        assert!(PlanningHorizon::new(NaiveDate::MAX, 2).is_none());
    }

    #[rstest]
    fn empty_horizon_has_no_dates() {
        let horizon = PlanningHorizon::new(date(2024, 1, 1), 0).expect("in range");
        assert_eq!(horizon.num_days(), 0);
        assert!(horizon.date_for(0).is_none());
    }
}
