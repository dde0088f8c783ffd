//! Tip ledger.
//!
//! Confirmed allocations leave the engine as [`TipTransaction`] records. This
//! module converts an allocation into those records and defines the
//! [`LedgerSink`] seam that persists them. The computations themselves never
//! touch a ledger.

use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::calculation::round_allocation;
use crate::error::{EngineError, EngineResult};
use crate::models::{TipAllocation, TipPoolInput, TipTransaction};

/// Destination for confirmed tip transactions.
pub trait LedgerSink: Send + Sync {
    /// Records a batch of transactions. The batch is all-or-nothing.
    fn record(&self, transactions: &[TipTransaction]) -> EngineResult<()>;

    /// Returns every recorded transaction in insertion order.
    fn transactions(&self) -> EngineResult<Vec<TipTransaction>>;
}

/// Converts a confirmed allocation into ledger records.
///
/// Amounts are rounded with [`round_allocation`], so the records add up to
/// the rounded pool to the cent. `allocation` must have been produced from
/// `input`.
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::allocate_tips;
/// use tip_engine::ledger::confirm_allocation;
/// use tip_engine::models::{AllocationPolicy, StaffMember, TipPoolInput};
/// use chrono::{NaiveDate, Utc};
///
/// let member = |id: &str| StaffMember {
///     id: id.to_string(),
///     name: id.to_uppercase(),
///     role: "server".to_string(),
///     hours_worked: 4.0,
///     performance_score: 0.8,
/// };
/// let input = TipPoolInput {
///     total_sales: 1000.0,
///     service_charge_rate: 18.0,
///     policy: AllocationPolicy::EqualSplit,
///     staff: vec![member("a"), member("b")],
/// };
/// let allocation = allocate_tips(&input).unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// let records = confirm_allocation(&input, &allocation, date, Utc::now()).unwrap();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].amount.to_string(), "90.00");
/// assert_eq!(records[1].staff_name, "B");
/// ```
pub fn confirm_allocation(
    input: &TipPoolInput,
    allocation: &TipAllocation,
    date: NaiveDate,
    recorded_at: DateTime<Utc>,
) -> EngineResult<Vec<TipTransaction>> {
    if input.staff.len() != allocation.results.len() {
        return Err(EngineError::LedgerError {
            message: format!(
                "allocation has {} shares for {} staff",
                allocation.results.len(),
                input.staff.len()
            ),
        });
    }

    let amounts = round_allocation(allocation)?;

    input
        .staff
        .iter()
        .zip(allocation.results.iter())
        .zip(amounts)
        .map(|((member, result), amount)| {
            if member.id != result.staff_id {
                return Err(EngineError::LedgerError {
                    message: format!(
                        "share for '{}' does not match staff member '{}'",
                        result.staff_id, member.id
                    ),
                });
            }

            Ok(TipTransaction {
                id: Uuid::new_v4(),
                staff_id: member.id.clone(),
                staff_name: member.name.clone(),
                amount,
                policy: input.policy,
                basis: result.basis.clone(),
                date,
                recorded_at,
            })
        })
        .collect()
}

/// A [`LedgerSink`] that keeps transactions in memory.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    records: RwLock<Vec<TipTransaction>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerSink for InMemoryLedger {
    fn record(&self, transactions: &[TipTransaction]) -> EngineResult<()> {
        let mut records = self.records.write().map_err(|_| EngineError::LedgerError {
            message: "ledger lock poisoned".to_string(),
        })?;
        records.extend_from_slice(transactions);
        Ok(())
    }

    fn transactions(&self) -> EngineResult<Vec<TipTransaction>> {
        let records = self.records.read().map_err(|_| EngineError::LedgerError {
            message: "ledger lock poisoned".to_string(),
        })?;
        Ok(records.clone())
    }
}
