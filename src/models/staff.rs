//! Staff member model.
//!
//! This module defines the [`StaffMember`] struct, the per-person input
//! to a tip allocation.

use serde::{Deserialize, Serialize};

/// An active staff member sharing in a tip pool.
///
/// Hours and performance score are supplied by the roster provider; the
/// engine never fabricates them.
///
/// # Example
///
/// ```
/// use tip_engine::models::StaffMember;
///
/// let server = StaffMember {
///     id: "staff_001".to_string(),
///     name: "Avery".to_string(),
///     role: "server".to_string(),
///     hours_worked: 6.0,
///     performance_score: 0.9,
/// };
/// assert!(server.has_logged_hours());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role on the floor (e.g., "server", "bartender", "busser").
    pub role: String,
    /// Hours worked in the period the pool covers.
    pub hours_worked: f64,
    /// Performance score in the range [0, 1].
    pub performance_score: f64,
}

impl StaffMember {
    /// Returns true if the staff member logged any hours.
    pub fn has_logged_hours(&self) -> bool {
        self.hours_worked > 0.0
    }
}
