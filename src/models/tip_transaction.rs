//! Tip ledger record.
//!
//! A [`TipTransaction`] is the independently-owned record created when a
//! user confirms an allocation. Amounts are stored at currency precision.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AllocationPolicy;

/// A confirmed tip share, ready to be handed to a ledger sink.
///
/// # Example
///
/// ```
/// use tip_engine::models::{AllocationPolicy, TipTransaction};
/// use chrono::{NaiveDate, Utc};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let tx = TipTransaction {
///     id: Uuid::new_v4(),
///     staff_id: "staff_001".to_string(),
///     staff_name: "Avery".to_string(),
///     amount: Decimal::new(9000, 2),
///     policy: AllocationPolicy::EqualSplit,
///     basis: "Equal distribution".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
///     recorded_at: Utc::now(),
/// };
/// assert_eq!(tx.amount.to_string(), "90.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipTransaction {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The staff member receiving the tip.
    pub staff_id: String,
    /// Display name at the time of confirmation.
    pub staff_name: String,
    /// Amount rounded to cents.
    pub amount: Decimal,
    /// The policy the share was allocated under.
    pub policy: AllocationPolicy,
    /// How the share was derived.
    pub basis: String,
    /// The business date the tips belong to.
    pub date: NaiveDate,
    /// When the record was created.
    pub recorded_at: DateTime<Utc>,
}
