//! Tip pool allocation.
//!
//! This module divides a tip pool among active staff under one of the
//! [`AllocationPolicy`] rules. Shares are left unrounded; see
//! [`super::round_allocation`] for currency-precision display amounts.

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllocationPolicy, AllocationResult, AuditStep, AuditWarning, StaffMember, TipAllocation,
    TipPoolInput,
};

use super::currency::format_quantity;
use super::validation::validate_tip_pool_input;

/// Basis label used for every share under [`AllocationPolicy::EqualSplit`].
pub const EQUAL_SPLIT_BASIS: &str = "Equal distribution";

/// Allocates a tip pool among staff.
///
/// `total_tips = total_sales × service_charge_rate / 100` is divided according
/// to the selected policy:
/// - `ByHours`: proportional to `hours_worked`
/// - `EqualSplit`: the same share for everyone
/// - `ByPerformance`: proportional to `performance_score`
///
/// Results keep the order of `input.staff`. The function is pure: identical
/// inputs always produce identical outputs.
///
/// Hours in the `ByHours` basis string are shown to at most two decimals
/// (7.255h reads "7.26h"); `tip_amount` always uses the exact hours.
///
/// # Errors
///
/// - `EmptyStaff` if there is nobody to allocate to
/// - `InvalidInput` if sales, rate, hours or scores are out of range, or
///   if total hours overflow
/// - `ZeroBasis` if the policy's weights sum to zero
///
/// # Examples
///
/// ```
/// use tip_engine::calculation::allocate_tips;
/// use tip_engine::models::{AllocationPolicy, StaffMember, TipPoolInput};
///
/// let member = |id: &str, hours: f64| StaffMember {
///     id: id.to_string(),
///     name: id.to_string(),
///     role: "server".to_string(),
///     hours_worked: hours,
///     performance_score: 0.5,
/// };
///
/// let input = TipPoolInput {
///     total_sales: 1000.0,
///     service_charge_rate: 18.0,
///     policy: AllocationPolicy::ByHours,
///     staff: vec![member("a", 6.0), member("b", 2.0)],
/// };
///
/// let allocation = allocate_tips(&input).unwrap();
/// assert!((allocation.results[0].tip_amount - 135.0).abs() < 1e-9);
/// assert!((allocation.results[1].tip_amount - 45.0).abs() < 1e-9);
/// assert_eq!(allocation.results[0].basis, "6h of 8h total");
/// ```
pub fn allocate_tips(input: &TipPoolInput) -> EngineResult<TipAllocation> {
    validate_tip_pool_input(input)?;

    let total_tips = input.total_tips();

    let results = match input.policy {
        AllocationPolicy::ByHours => allocate_by_hours(&input.staff, total_tips)?,
        AllocationPolicy::EqualSplit => allocate_equally(&input.staff, total_tips),
        AllocationPolicy::ByPerformance => allocate_by_performance(&input.staff, total_tips)?,
    };

    Ok(TipAllocation {
        results,
        total_tips,
    })
}

fn allocate_by_hours(staff: &[StaffMember], total_tips: f64) -> EngineResult<Vec<AllocationResult>> {
    let total_hours: f64 = staff.iter().map(|s| s.hours_worked).sum();
    if total_hours == 0.0 {
        return Err(EngineError::ZeroBasis {
            policy: AllocationPolicy::ByHours,
        });
    }
    if !total_hours.is_finite() {
        return Err(EngineError::InvalidInput {
            field: "staff.hours_worked".to_string(),
            message: "total hours overflow".to_string(),
        });
    }

    Ok(staff
        .iter()
        .map(|s| AllocationResult {
            staff_id: s.id.clone(),
            tip_amount: total_tips * (s.hours_worked / total_hours),
            basis: format!(
                "{}h of {}h total",
                format_quantity(s.hours_worked),
                format_quantity(total_hours)
            ),
        })
        .collect())
}

fn allocate_equally(staff: &[StaffMember], total_tips: f64) -> Vec<AllocationResult> {
    let share = total_tips / staff.len() as f64;

    staff
        .iter()
        .map(|s| AllocationResult {
            staff_id: s.id.clone(),
            tip_amount: share,
            basis: EQUAL_SPLIT_BASIS.to_string(),
        })
        .collect()
}

fn allocate_by_performance(
    staff: &[StaffMember],
    total_tips: f64,
) -> EngineResult<Vec<AllocationResult>> {
    let total_performance: f64 = staff.iter().map(|s| s.performance_score).sum();
    if total_performance == 0.0 {
        return Err(EngineError::ZeroBasis {
            policy: AllocationPolicy::ByPerformance,
        });
    }

    Ok(staff
        .iter()
        .map(|s| AllocationResult {
            staff_id: s.id.clone(),
            tip_amount: total_tips * (s.performance_score / total_performance),
            basis: format!("{:.0}% performance score", s.performance_score * 100.0),
        })
        .collect())
}

/// Builds the audit step for a completed allocation.
pub fn allocation_audit_step(
    input: &TipPoolInput,
    allocation: &TipAllocation,
    step_number: u32,
) -> AuditStep {
    let shares: Vec<serde_json::Value> = allocation
        .results
        .iter()
        .map(|r| {
            serde_json::json!({
                "staff_id": r.staff_id,
                "tip_amount": r.tip_amount,
                "basis": r.basis
            })
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: "tip_allocation".to_string(),
        rule_name: "Tip Pool Allocation".to_string(),
        input: serde_json::json!({
            "total_sales": input.total_sales,
            "service_charge_rate": input.service_charge_rate,
            "policy": input.policy.as_str(),
            "staff_count": input.staff.len()
        }),
        output: serde_json::json!({
            "total_tips": allocation.total_tips,
            "shares": shares
        }),
        reasoning: format!(
            "${:.2} x {}% = ${:.2} tip pool, allocated {} across {} staff",
            input.total_sales,
            format_quantity(input.service_charge_rate),
            allocation.total_tips,
            input.policy,
            input.staff.len()
        ),
    }
}

/// Flags staff who will receive nothing under the selected policy.
///
/// These don't block allocation but usually point at missing roster data.
pub fn allocation_warnings(input: &TipPoolInput) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if input.total_tips() == 0.0 {
        warnings.push(AuditWarning {
            code: "EMPTY_POOL".to_string(),
            message: "Service charge rate is 0%, no tips to allocate".to_string(),
        });
    }

    for member in &input.staff {
        match input.policy {
            AllocationPolicy::ByHours if !member.has_logged_hours() => {
                warnings.push(AuditWarning {
                    code: "ZERO_HOURS".to_string(),
                    message: format!("'{}' logged no hours and receives no share", member.id),
                });
            }
            AllocationPolicy::ByPerformance if member.performance_score == 0.0 => {
                warnings.push(AuditWarning {
                    code: "ZERO_PERFORMANCE".to_string(),
                    message: format!(
                        "'{}' has a performance score of 0 and receives no share",
                        member.id
                    ),
                });
            }
            _ => {}
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn staff(id: &str, hours: f64, score: f64) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            name: id.to_uppercase(),
            role: "server".to_string(),
            hours_worked: hours,
            performance_score: score,
        }
    }

    fn pool(policy: AllocationPolicy, members: Vec<StaffMember>) -> TipPoolInput {
        TipPoolInput {
            total_sales: 1000.0,
            service_charge_rate: 18.0,
            policy,
            staff: members,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {}, got {}",
            expected,
            actual
        );
    }

    /// TA-001: equal split of an 18% pool between two staff
    #[test]
    fn test_ta_001_equal_split_two_staff() {
        let input = pool(
            AllocationPolicy::EqualSplit,
            vec![staff("a", 6.0, 0.2), staff("b", 2.0, 0.9)],
        );

        let allocation = allocate_tips(&input).unwrap();

        assert_close(allocation.total_tips, 180.0);
        assert_close(allocation.results[0].tip_amount, 90.0);
        assert_close(allocation.results[1].tip_amount, 90.0);
        assert_eq!(allocation.results[0].basis, "Equal distribution");
        assert_eq!(allocation.results[1].basis, "Equal distribution");
    }

    /// TA-002: by-hours allocation 6h / 2h
    #[test]
    fn test_ta_002_by_hours_six_and_two() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 6.0, 0.5), staff("b", 2.0, 0.5)],
        );

        let allocation = allocate_tips(&input).unwrap();

        assert_close(allocation.total_tips, 180.0);
        assert_close(allocation.results[0].tip_amount, 135.0);
        assert_close(allocation.results[1].tip_amount, 45.0);
        assert_eq!(allocation.results[0].basis, "6h of 8h total");
        assert_eq!(allocation.results[1].basis, "2h of 8h total");
    }

    /// TA-003: by-hours with nobody on the clock
    #[test]
    fn test_ta_003_by_hours_zero_basis() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 0.0, 0.5), staff("b", 0.0, 0.5)],
        );

        match allocate_tips(&input) {
            Err(EngineError::ZeroBasis { policy }) => {
                assert_eq!(policy, AllocationPolicy::ByHours);
            }
            other => panic!("Expected ZeroBasis, got {:?}", other),
        }
    }

    /// TA-004: equal performance scores split evenly
    #[test]
    fn test_ta_004_by_performance_equal_scores() {
        let input = pool(
            AllocationPolicy::ByPerformance,
            vec![staff("a", 6.0, 0.9), staff("b", 2.0, 0.9)],
        );

        let allocation = allocate_tips(&input).unwrap();

        assert_close(allocation.results[0].tip_amount, 90.0);
        assert_close(allocation.results[1].tip_amount, 90.0);
        assert_eq!(allocation.results[0].basis, "90% performance score");
        assert_eq!(allocation.results[1].basis, "90% performance score");
    }

    /// TA-005: empty staff under every policy
    #[test]
    fn test_ta_005_empty_staff_any_policy() {
        for policy in [
            AllocationPolicy::ByHours,
            AllocationPolicy::EqualSplit,
            AllocationPolicy::ByPerformance,
        ] {
            let result = allocate_tips(&pool(policy, vec![]));
            assert!(
                matches!(result, Err(EngineError::EmptyStaff)),
                "Expected EmptyStaff for {:?}, got {:?}",
                policy,
                result
            );
        }
    }

    #[test]
    fn test_by_performance_zero_basis() {
        let input = pool(
            AllocationPolicy::ByPerformance,
            vec![staff("a", 6.0, 0.0), staff("b", 2.0, 0.0)],
        );

        assert!(matches!(
            allocate_tips(&input),
            Err(EngineError::ZeroBasis {
                policy: AllocationPolicy::ByPerformance
            })
        ));
    }

    #[test]
    fn test_by_performance_uneven_scores() {
        let input = pool(
            AllocationPolicy::ByPerformance,
            vec![staff("a", 1.0, 0.75), staff("b", 1.0, 0.25)],
        );

        let allocation = allocate_tips(&input).unwrap();

        assert_close(allocation.results[0].tip_amount, 135.0);
        assert_close(allocation.results[1].tip_amount, 45.0);
        assert_eq!(allocation.results[0].basis, "75% performance score");
        assert_eq!(allocation.results[1].basis, "25% performance score");
    }

    #[test]
    fn test_equal_split_ignores_zero_hours() {
        let input = pool(
            AllocationPolicy::EqualSplit,
            vec![staff("a", 0.0, 0.0), staff("b", 0.0, 0.0), staff("c", 0.0, 0.0)],
        );

        let allocation = allocate_tips(&input).unwrap();
        for result in &allocation.results {
            assert_close(result.tip_amount, 60.0);
        }
    }

    #[test]
    fn test_zero_hour_member_gets_nothing_by_hours() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 8.0, 0.5), staff("b", 0.0, 0.5)],
        );

        let allocation = allocate_tips(&input).unwrap();
        assert_close(allocation.results[0].tip_amount, 180.0);
        assert_eq!(allocation.results[1].tip_amount, 0.0);
        assert_eq!(allocation.results[1].basis, "0h of 8h total");
    }

    #[test]
    fn test_fractional_hours_basis_has_no_float_noise() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 0.1, 0.5), staff("b", 0.2, 0.5)],
        );

        let allocation = allocate_tips(&input).unwrap();
        assert_eq!(allocation.results[0].basis, "0.1h of 0.3h total");
        assert_eq!(allocation.results[1].basis, "0.2h of 0.3h total");
    }

    #[test]
    fn test_by_hours_rejects_overflowing_total() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 1e308, 0.5), staff("b", 1e308, 0.5)],
        );

        match allocate_tips(&input) {
            Err(EngineError::InvalidInput { field, .. }) => {
                assert_eq!(field, "staff.hours_worked");
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_basis_shows_hours_to_two_decimals() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 7.255, 0.5), staff("b", 2.745, 0.5)],
        );

        let allocation = allocate_tips(&input).unwrap();
        assert_eq!(allocation.results[0].basis, "7.26h of 10h total");
        assert_close(allocation.results[0].tip_amount, 180.0 * 7.255 / 10.0);
    }

    #[test]
    fn test_results_preserve_input_order() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("zoe", 1.0, 0.5), staff("adam", 3.0, 0.5), staff("mia", 2.0, 0.5)],
        );

        let allocation = allocate_tips(&input).unwrap();
        let ids: Vec<&str> = allocation
            .results
            .iter()
            .map(|r| r.staff_id.as_str())
            .collect();
        assert_eq!(ids, vec!["zoe", "adam", "mia"]);
    }

    #[test]
    fn test_zero_rate_allocates_zero() {
        let mut input = pool(AllocationPolicy::EqualSplit, vec![staff("a", 4.0, 0.5)]);
        input.service_charge_rate = 0.0;

        let allocation = allocate_tips(&input).unwrap();
        assert_eq!(allocation.total_tips, 0.0);
        assert_eq!(allocation.results[0].tip_amount, 0.0);
    }

    #[test]
    fn test_invalid_sales_rejected_before_policy() {
        let mut input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 0.0, 0.5), staff("b", 0.0, 0.5)],
        );
        input.total_sales = 0.0;

        assert!(matches!(
            allocate_tips(&input),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_audit_step_records_policy_and_total() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 6.0, 0.5), staff("b", 2.0, 0.5)],
        );
        let allocation = allocate_tips(&input).unwrap();

        let step = allocation_audit_step(&input, &allocation, 3);

        assert_eq!(step.step_number, 3);
        assert_eq!(step.rule_id, "tip_allocation");
        assert_eq!(step.input["policy"], "by_hours");
        assert_eq!(step.input["staff_count"], 2);
        assert_eq!(step.output["shares"][1]["staff_id"], "b");
        assert_eq!(
            step.reasoning,
            "$1000.00 x 18% = $180.00 tip pool, allocated by hours across 2 staff"
        );
    }

    #[test]
    fn test_warnings_flag_zero_hour_staff() {
        let input = pool(
            AllocationPolicy::ByHours,
            vec![staff("a", 6.0, 0.5), staff("b", 0.0, 0.5)],
        );

        let warnings = allocation_warnings(&input);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "ZERO_HOURS");
        assert!(warnings[0].message.contains("'b'"));
    }

    #[test]
    fn test_warnings_empty_for_equal_split() {
        let input = pool(
            AllocationPolicy::EqualSplit,
            vec![staff("a", 0.0, 0.0), staff("b", 0.0, 0.0)],
        );
        assert!(allocation_warnings(&input).is_empty());
    }

    #[test]
    fn test_warnings_flag_empty_pool() {
        let mut input = pool(AllocationPolicy::EqualSplit, vec![staff("a", 1.0, 0.5)]);
        input.service_charge_rate = 0.0;

        let warnings = allocation_warnings(&input);
        assert_eq!(warnings[0].code, "EMPTY_POOL");
    }

    fn arb_staff(max: usize) -> impl Strategy<Value = Vec<StaffMember>> {
        prop::collection::vec((0.5f64..40.0, 0.01f64..=1.0), 1..max).prop_map(|weights| {
            weights
                .into_iter()
                .enumerate()
                .map(|(i, (hours, score))| staff(&format!("s{}", i), hours, score))
                .collect()
        })
    }

    fn arb_policy() -> impl Strategy<Value = AllocationPolicy> {
        prop_oneof![
            Just(AllocationPolicy::ByHours),
            Just(AllocationPolicy::EqualSplit),
            Just(AllocationPolicy::ByPerformance),
        ]
    }

    proptest! {
        #[test]
        fn prop_shares_sum_to_pool(
            sales in 1.0f64..100_000.0,
            rate in 1.0f64..=100.0,
            policy in arb_policy(),
            members in arb_staff(20),
        ) {
            let input = TipPoolInput { total_sales: sales, service_charge_rate: rate, policy, staff: members };
            let allocation = allocate_tips(&input).unwrap();

            let diff = (allocation.allocated_total() - allocation.total_tips).abs();
            prop_assert!(diff <= allocation.total_tips * 1e-9, "diff {} on {}", diff, allocation.total_tips);
        }

        #[test]
        fn prop_equal_split_shares_are_identical(
            sales in 1.0f64..100_000.0,
            rate in 0.0f64..=100.0,
            members in arb_staff(20),
        ) {
            let input = TipPoolInput {
                total_sales: sales,
                service_charge_rate: rate,
                policy: AllocationPolicy::EqualSplit,
                staff: members,
            };
            let allocation = allocate_tips(&input).unwrap();

            let first = allocation.results[0].tip_amount;
            for result in &allocation.results {
                prop_assert!((result.tip_amount - first).abs() <= f64::EPSILON * first.max(1.0));
            }
        }

        #[test]
        fn prop_doubling_hours_shifts_share(
            sales in 100.0f64..100_000.0,
            rate in 1.0f64..=100.0,
            members in arb_staff(10),
            pick in any::<prop::sample::Index>(),
        ) {
            prop_assume!(members.len() >= 2);
            let target = pick.index(members.len());

            let before_input = TipPoolInput {
                total_sales: sales,
                service_charge_rate: rate,
                policy: AllocationPolicy::ByHours,
                staff: members.clone(),
            };
            let mut after_input = before_input.clone();
            after_input.staff[target].hours_worked *= 2.0;

            let before = allocate_tips(&before_input).unwrap();
            let after = allocate_tips(&after_input).unwrap();

            for (i, (b, a)) in before.results.iter().zip(after.results.iter()).enumerate() {
                if i == target {
                    prop_assert!(a.tip_amount > b.tip_amount);
                } else {
                    prop_assert!(a.tip_amount < b.tip_amount);
                }
            }
            prop_assert!((after.allocated_total() - before.allocated_total()).abs() <= before.total_tips * 1e-9);
        }

        #[test]
        fn prop_allocation_is_deterministic(
            sales in 1.0f64..100_000.0,
            rate in 0.0f64..=100.0,
            policy in arb_policy(),
            members in arb_staff(20),
        ) {
            let input = TipPoolInput { total_sales: sales, service_charge_rate: rate, policy, staff: members };
            let first = allocate_tips(&input).unwrap();
            let second = allocate_tips(&input).unwrap();

            prop_assert_eq!(first.total_tips.to_bits(), second.total_tips.to_bits());
            for (a, b) in first.results.iter().zip(second.results.iter()) {
                prop_assert_eq!(a.tip_amount.to_bits(), b.tip_amount.to_bits());
                prop_assert_eq!(&a.basis, &b.basis);
            }
        }
    }
}
