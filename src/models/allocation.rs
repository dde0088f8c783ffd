//! Tip pool and allocation models.
//!
//! This module contains the [`TipPoolInput`] submitted for allocation and the
//! [`TipAllocation`] produced from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StaffMember;

/// The rule used to divide a tip pool among staff.
///
/// # Example
///
/// ```
/// use tip_engine::models::AllocationPolicy;
///
/// let policy: AllocationPolicy = serde_json::from_str("\"by_hours\"").unwrap();
/// assert_eq!(policy, AllocationPolicy::ByHours);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationPolicy {
    /// Shares proportional to hours worked.
    ByHours,
    /// Every staff member receives the same share.
    EqualSplit,
    /// Shares proportional to performance score.
    ByPerformance,
}

impl AllocationPolicy {
    /// Returns the snake_case identifier used in serialized data and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationPolicy::ByHours => "by_hours",
            AllocationPolicy::EqualSplit => "equal_split",
            AllocationPolicy::ByPerformance => "by_performance",
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AllocationPolicy::ByHours => "by hours",
            AllocationPolicy::EqualSplit => "equally",
            AllocationPolicy::ByPerformance => "by performance",
        };
        f.write_str(label)
    }
}

/// A pool of tips to be divided among staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipPoolInput {
    /// Total sales for the period. Must be positive.
    pub total_sales: f64,
    /// Percentage of sales designated as tips, in [0, 100].
    pub service_charge_rate: f64,
    /// The allocation policy to apply.
    pub policy: AllocationPolicy,
    /// Staff sharing the pool, in display order.
    pub staff: Vec<StaffMember>,
}

impl TipPoolInput {
    /// Returns the tip pool implied by sales and the service charge rate.
    ///
    /// # Example
    ///
    /// ```
    /// use tip_engine::models::{AllocationPolicy, TipPoolInput};
    ///
    /// let input = TipPoolInput {
    ///     total_sales: 1000.0,
    ///     service_charge_rate: 18.0,
    ///     policy: AllocationPolicy::EqualSplit,
    ///     staff: vec![],
    /// };
    /// assert!((input.total_tips() - 180.0).abs() < 1e-9);
    /// ```
    pub fn total_tips(&self) -> f64 {
        self.total_sales * (self.service_charge_rate / 100.0)
    }
}

/// One staff member's share of the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// The staff member this share belongs to.
    pub staff_id: String,
    /// Unrounded share of the pool.
    pub tip_amount: f64,
    /// Human-readable explanation of how the share was derived. Quantities
    /// in it are rounded for display.
    pub basis: String,
}

/// The outcome of allocating a tip pool.
///
/// `results` keeps the order of the input staff list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipAllocation {
    /// Per-staff shares.
    pub results: Vec<AllocationResult>,
    /// The total pool that was divided.
    pub total_tips: f64,
}

impl TipAllocation {
    /// Returns the sum of all allocated shares.
    pub fn allocated_total(&self) -> f64 {
        self.results.iter().map(|r| r.tip_amount).sum()
    }
}
