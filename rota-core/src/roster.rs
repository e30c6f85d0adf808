//! The roster table produced by solvers and consumed by metrics.

use chrono::NaiveDate;

/// One `(day, shift)` record of a roster.
///
/// Field names serialise to the column names `Day`, `Date`, `Shift`,
/// `Shift_Time`, `Staff` and `Staff_Count`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rota_core::RosterRow;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
/// let row = RosterRow::new(1, date, 1, "07:00-15:00", ["Ada", "Grace"]);
/// assert_eq!(row.staff, "Ada, Grace");
/// assert_eq!(row.staff_count, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterRow {
    /// One-based day number.
    #[cfg_attr(feature = "serde", serde(rename = "Day"))]
    pub day: u32,
    /// Calendar date of the day.
    #[cfg_attr(feature = "serde", serde(rename = "Date"))]
    pub date: NaiveDate,
    /// One-based shift number.
    #[cfg_attr(feature = "serde", serde(rename = "Shift"))]
    pub shift: u32,
    /// Time-of-day label of the shift.
    #[cfg_attr(feature = "serde", serde(rename = "Shift_Time"))]
    pub shift_time: String,
    /// Comma-joined staff names.
    #[cfg_attr(feature = "serde", serde(rename = "Staff"))]
    pub staff: String,
    /// Number of staff assigned.
    #[cfg_attr(feature = "serde", serde(rename = "Staff_Count"))]
    pub staff_count: usize,
}

impl RosterRow {
    /// Build a row from staff names, joining them and counting them.
    pub fn new<I, S>(day: u32, date: NaiveDate, shift: u32, shift_time: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let collected: Vec<S> = names.into_iter().collect();
        let staff = collected
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(", ");
        Self {
            day,
            date,
            shift,
            shift_time: shift_time.to_owned(),
            staff,
            staff_count: collected.len(),
        }
    }

    /// Staff names parsed from the `Staff` field.
    ///
    /// Entries are trimmed; empty entries are dropped.
    pub fn staff_names(&self) -> impl Iterator<Item = &str> {
        self.staff
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Whether `name` is listed in this row.
    pub fn lists(&self, name: &str) -> bool {
        self.staff_names().any(|listed| listed == name)
    }
}

/// Roster rows in `(day, shift)` order.
///
/// A `(day, shift)` pair absent from the table had nobody assigned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster {
    rows: Vec<RosterRow>,
}

impl Roster {
    /// Wrap rows, including hand-built tables that may contain empty rows.
    pub const fn from_rows(rows: Vec<RosterRow>) -> Self {
        Self { rows }
    }

    /// All rows.
    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    /// Consume the roster, returning its rows.
    pub fn into_rows(self) -> Vec<RosterRow> {
        self.rows
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every `(row, staff name)` pair.
    pub fn assignments(&self) -> impl Iterator<Item = (&RosterRow, &str)> {
        self.rows
            .iter()
            .flat_map(|row| row.staff_names().map(move |name| (row, name)))
    }

    /// Sum of `Staff_Count` over all rows.
    pub fn total_assignments(&self) -> usize {
        self.rows.iter().map(|row| row.staff_count).sum()
    }

    /// Names rostered on `date`, in row order.
    pub fn staff_names_on(&self, date: NaiveDate) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.date == date)
            .flat_map(RosterRow::staff_names)
            .collect()
    }
}

impl FromIterator<RosterRow> for Roster {
    fn from_iter<I: IntoIterator<Item = RosterRow>>(iter: I) -> Self {
        Self::from_rows(iter.into_iter().collect())
    }
}
