//! Human-readable record of the key figures gathered during one solve.

use std::fmt;

use log::debug;

/// Ordered debug messages for a single solve call.
///
/// Each recorded entry is also emitted at `debug` level.
///
/// # Examples
/// ```
/// use rota_core::DebugTrail;
///
/// let mut trail = DebugTrail::new();
/// trail.record("Total staff members: 3");
/// assert_eq!(trail.to_string(), "Total staff members: 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DebugTrail {
    entries: Vec<String>,
}

impl DebugTrail {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and log it.
    pub fn record(&mut self, entry: impl Into<String>) {
        let text = entry.into();
        debug!("{text}");
        self.entries.push(text);
    }

    /// Entries in recording order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined by newlines.
    pub fn render(&self) -> String {
        self.entries.join("\n")
    }
}

impl fmt::Display for DebugTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
