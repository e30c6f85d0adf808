//! Staff members and the ordered staff table.
//!
//! A staff member's identity inside the engine is their position in the
//! [`StaffTable`]. Names are for display and for matching leave requests;
//! roles and skills travel with the row but are not enforced by solvers.

use std::collections::BTreeSet;

/// A member of staff available for rostering.
///
/// # Examples
/// ```
/// use rota_core::Staff;
///
/// let nurse = Staff::new("Ada").with_role("Senior Nurse").with_skills(["ICU"]);
/// assert_eq!(nurse.name, "Ada");
/// assert!(nurse.skills.contains("ICU"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Staff {
    /// Display name, also used to match leave requests.
    ///
    /// Must not contain a comma: roster rows join names with `", "`.
    pub name: String,
    /// Job role, consulted only for preference defaults.
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: String,
    /// Declared skills.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: BTreeSet<String>,
}

impl Staff {
    /// Construct a staff member with no role or skills.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            skills: BTreeSet::new(),
        }
    }

    /// Set the role while returning `self` for chaining.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Add skills while returning `self` for chaining.
    #[must_use]
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }
}

/// Ordered staff rows; the row index is the staff identity.
///
/// # Examples
/// ```
/// use rota_core::StaffTable;
///
/// let table = StaffTable::from_names(["Ada", "Grace"]);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.name(1), Some("Grace"));
/// assert_eq!(table.index_of("Ada"), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StaffTable {
    members: Vec<Staff>,
}

impl StaffTable {
    /// Construct a table from staff rows in identity order.
    pub const fn new(members: Vec<Staff>) -> Self {
        Self { members }
    }

    /// Construct a table of staff with names only.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Staff::new).collect()
    }

    /// Number of staff rows.
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the table has no rows.
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Staff row at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Staff> {
        self.members.get(index)
    }

    /// Display name of the staff row at `index`, if present.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.get(index).map(|staff| staff.name.as_str())
    }

    /// Iterate `(index, staff)` pairs in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Staff)> {
        self.members.iter().enumerate()
    }

    /// Indices of every row whose name equals `name` exactly.
    pub fn indices_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.iter()
            .filter(move |(_, staff)| staff.name == name)
            .map(|(index, _)| index)
    }

    /// Index of the first row named `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices_named(name).next()
    }
}

impl FromIterator<Staff> for StaffTable {
    fn from_iter<I: IntoIterator<Item = Staff>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Staff>> for StaffTable {
    fn from(members: Vec<Staff>) -> Self {
        Self::new(members)
    }
}
