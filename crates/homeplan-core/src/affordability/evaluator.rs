//! LTV / DSR affordability checks and maximum loan sizing.
//!
//! The maximum permissible loan is the lower of two ceilings:
//!
//! - LTV: collateral value × LTV limit.
//! - DSR: the principal whose payment, together with existing debt service,
//!   uses exactly the DSR limit of annual income. Found by inverting the
//!   loan's own repayment scheme at its rate and term.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::HomePlanError;
use crate::loan::amortization::{
    compute, LoanInput, LoanResult, RepaymentScheme, MAX_ANNUAL_RATE_PERCENT, MAX_TERM_MONTHS,
};
use crate::time_value::{monthly_rate, principal_for_payment};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, MAX_AMOUNT};
use crate::HomePlanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);
/// Highest LTV or DSR limit accepted, in percent.
pub const MAX_LIMIT_PERCENT: Percent = dec!(1000);

fn default_at_limit_band() -> Percent {
    dec!(95)
}

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityLimits {
    pub ltv_limit_percent: Percent,
    pub dsr_limit_percent: Percent,
    pub collateral_value: Money,
    pub borrower_annual_income: Money,
    #[serde(default)]
    pub existing_annual_debt_service: Money,
    /// Share of a limit (in percent) from which a ratio counts as `At`.
    #[serde(default = "default_at_limit_band")]
    pub at_limit_band_percent: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitStatus {
    Under,
    At,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingConstraint {
    Ltv,
    Dsr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub calculated_ltv_percent: Percent,
    pub calculated_dsr_percent: Percent,
    pub ltv_status: LimitStatus,
    pub dsr_status: LimitStatus,
    pub ltv_implied_ceiling: Money,
    /// `None` when debt service places no bound on principal (interest-free bullet).
    pub dsr_implied_ceiling: Option<Money>,
    pub max_allowed_loan_amount: Money,
    pub binding_constraint: BindingConstraint,
    /// Max allowed minus the requested principal; negative when over.
    pub headroom: Money,
}

/// A loan together with its affordability verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub loan: LoanResult,
    pub affordability: AffordabilityResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Classify a computed loan against LTV / DSR limits and size the maximum loan.
pub fn evaluate(
    loan: &LoanResult,
    limits: &AffordabilityLimits,
) -> HomePlanResult<AffordabilityResult> {
    validate_loan_result(loan)?;
    validate_limits(limits)?;

    let ccy = loan.currency;

    // Ratios stay unrounded so that `Over` means strictly above the limit.
    let ltv = ratio_percent(loan.principal, limits.collateral_value, "LTV ratio")?;
    let annual_service = overflow_checked(
        loan.monthly_payment
            .checked_mul(MONTHS_PER_YEAR)
            .and_then(|s| s.checked_add(limits.existing_annual_debt_service)),
        "annual debt service",
    )?;
    let dsr = ratio_percent(annual_service, limits.borrower_annual_income, "DSR ratio")?;

    let band = limits.at_limit_band_percent;
    let ltv_status = classify(ltv, limits.ltv_limit_percent, band);
    let dsr_status = classify(dsr, limits.dsr_limit_percent, band);

    let ltv_ceiling = overflow_checked(
        limits
            .collateral_value
            .checked_mul(limits.ltv_limit_percent)
            .and_then(|v| v.checked_div(PERCENT)),
        "LTV ceiling",
    )?;
    let dsr_ceiling = dsr_implied_ceiling(loan, limits)?;

    let (binding, ceiling) = match dsr_ceiling {
        Some(dsr_max) if dsr_max < ltv_ceiling => (BindingConstraint::Dsr, dsr_max),
        _ => (BindingConstraint::Ltv, ltv_ceiling),
    };
    let max_allowed = ccy.round(ceiling);

    let result = AffordabilityResult {
        calculated_ltv_percent: ltv,
        calculated_dsr_percent: dsr,
        ltv_status,
        dsr_status,
        ltv_implied_ceiling: ccy.round(ltv_ceiling),
        dsr_implied_ceiling: dsr_ceiling.map(|c| ccy.round(c)),
        max_allowed_loan_amount: max_allowed,
        binding_constraint: binding,
        headroom: overflow_checked(max_allowed.checked_sub(loan.principal), "headroom")?,
    };

    debug!(
        ltv = %result.calculated_ltv_percent,
        dsr = %result.calculated_dsr_percent,
        max_allowed = %result.max_allowed_loan_amount,
        binding = ?result.binding_constraint,
        "affordability evaluated"
    );
    if ltv_status == LimitStatus::Over || dsr_status == LimitStatus::Over {
        warn!(
            ltv_status = ?ltv_status,
            dsr_status = ?dsr_status,
            "loan exceeds regulatory limits"
        );
    }

    Ok(result)
}

/// Compute the loan, evaluate it, and wrap both in the metadata envelope.
pub fn assess_affordability(
    input: &LoanInput,
    limits: &AffordabilityLimits,
) -> HomePlanResult<ComputationOutput<AffordabilityAssessment>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let loan = compute(input)?;
    let affordability = evaluate(&loan, limits)?;

    status_warning(
        &mut warnings,
        "LTV",
        affordability.ltv_status,
        affordability.calculated_ltv_percent,
        limits.ltv_limit_percent,
    );
    status_warning(
        &mut warnings,
        "DSR",
        affordability.dsr_status,
        affordability.calculated_dsr_percent,
        limits.dsr_limit_percent,
    );
    if affordability.dsr_implied_ceiling.is_none() {
        warnings.push("Debt service does not bound an interest-free bullet loan; LTV binds".into());
    }

    let assumptions = serde_json::json!({
        "at_limit_band_percent": limits.at_limit_band_percent.to_string(),
        "existing_annual_debt_service": limits.existing_annual_debt_service.to_string(),
        "dsr_payment_basis": "first-month payment × 12",
        "dsr_inversion": loan.scheme,
    });

    let output = AffordabilityAssessment {
        loan,
        affordability,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Affordability (LTV / DSR, min-of-ceilings loan sizing)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn overflow_checked(value: Option<Decimal>, context: &str) -> HomePlanResult<Decimal> {
    value.ok_or_else(|| HomePlanError::Overflow {
        context: context.into(),
    })
}

/// `numerator / denominator × 100`, unrounded.
fn ratio_percent(numerator: Money, denominator: Money, context: &str) -> HomePlanResult<Percent> {
    overflow_checked(
        numerator
            .checked_div(denominator)
            .and_then(|r| r.checked_mul(PERCENT)),
        context,
    )
}

fn classify(calculated: Percent, limit: Percent, band: Percent) -> LimitStatus {
    if calculated > limit {
        LimitStatus::Over
    } else if calculated >= limit * band / PERCENT {
        LimitStatus::At
    } else {
        LimitStatus::Under
    }
}

/// Largest principal whose first-month payment keeps total debt service
/// within the DSR limit, at the loan's own scheme, rate and term.
fn dsr_implied_ceiling(
    loan: &LoanResult,
    limits: &AffordabilityLimits,
) -> HomePlanResult<Option<Money>> {
    let allowed_annual = overflow_checked(
        limits
            .borrower_annual_income
            .checked_mul(limits.dsr_limit_percent)
            .and_then(|v| v.checked_div(PERCENT))
            .and_then(|v| v.checked_sub(limits.existing_annual_debt_service)),
        "DSR budget",
    )?;
    if allowed_annual <= Decimal::ZERO {
        return Ok(Some(Decimal::ZERO));
    }

    let target_payment = allowed_annual / MONTHS_PER_YEAR;
    let r = monthly_rate(loan.annual_rate_percent);
    let n = Decimal::from(loan.term_months);

    let ceiling = match loan.scheme {
        RepaymentScheme::EqualInstallment => {
            Some(principal_for_payment(target_payment, r, loan.term_months)?)
        }
        RepaymentScheme::EqualPrincipal => {
            // first payment = P/n + P·r
            let per_unit = overflow_checked(
                Decimal::ONE.checked_div(n).and_then(|v| v.checked_add(r)),
                "DSR ceiling",
            )?;
            Some(overflow_checked(target_payment.checked_div(per_unit), "DSR ceiling")?)
        }
        RepaymentScheme::Bullet => {
            if r.is_zero() {
                None
            } else {
                Some(overflow_checked(target_payment.checked_div(r), "DSR ceiling")?)
            }
        }
    };

    Ok(ceiling)
}

fn status_warning(
    warnings: &mut Vec<String>,
    name: &str,
    status: LimitStatus,
    calculated: Percent,
    limit: Percent,
) {
    match status {
        LimitStatus::Over => warnings.push(format!(
            "{name} {calculated}% exceeds the {limit}% limit"
        )),
        LimitStatus::At => warnings.push(format!(
            "{name} {calculated}% is close to the {limit}% limit"
        )),
        LimitStatus::Under => {}
    }
}

/// Checks a `LoanResult` that may have arrived from outside `compute`.
fn validate_loan_result(loan: &LoanResult) -> HomePlanResult<()> {
    if loan.principal <= Decimal::ZERO || loan.principal > MAX_AMOUNT {
        return Err(HomePlanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal must be positive and at most {MAX_AMOUNT}."),
        });
    }
    if loan.monthly_payment < Decimal::ZERO || loan.monthly_payment > MAX_AMOUNT {
        return Err(HomePlanError::InvalidInput {
            field: "monthly_payment".into(),
            reason: format!("Monthly payment must be in [0, {MAX_AMOUNT}]."),
        });
    }
    if loan.annual_rate_percent < Decimal::ZERO
        || loan.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT
    {
        return Err(HomePlanError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!("Annual rate must be in [0, {MAX_ANNUAL_RATE_PERCENT}]."),
        });
    }
    if loan.term_months == 0 || loan.term_months > MAX_TERM_MONTHS {
        return Err(HomePlanError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Term must be between 1 and {MAX_TERM_MONTHS} months."),
        });
    }
    Ok(())
}

fn validate_limits(limits: &AffordabilityLimits) -> HomePlanResult<()> {
    for (field, amount) in [
        ("collateral_value", limits.collateral_value),
        ("borrower_annual_income", limits.borrower_annual_income),
        ("existing_annual_debt_service", limits.existing_annual_debt_service),
    ] {
        if amount > MAX_AMOUNT {
            return Err(HomePlanError::InvalidLimits {
                field: field.into(),
                reason: format!("Amount cannot exceed {MAX_AMOUNT}."),
            });
        }
    }
    for (field, limit) in [
        ("ltv_limit_percent", limits.ltv_limit_percent),
        ("dsr_limit_percent", limits.dsr_limit_percent),
    ] {
        if limit > MAX_LIMIT_PERCENT {
            return Err(HomePlanError::InvalidLimits {
                field: field.into(),
                reason: format!("Limit cannot exceed {MAX_LIMIT_PERCENT}%."),
            });
        }
    }

    if limits.collateral_value <= Decimal::ZERO {
        return Err(HomePlanError::InvalidLimits {
            field: "collateral_value".into(),
            reason: "Collateral value must be positive.".into(),
        });
    }
    if limits.borrower_annual_income <= Decimal::ZERO {
        return Err(HomePlanError::InvalidLimits {
            field: "borrower_annual_income".into(),
            reason: "Annual income must be positive.".into(),
        });
    }
    if limits.ltv_limit_percent < Decimal::ZERO {
        return Err(HomePlanError::InvalidLimits {
            field: "ltv_limit_percent".into(),
            reason: "LTV limit cannot be negative.".into(),
        });
    }
    if limits.dsr_limit_percent < Decimal::ZERO {
        return Err(HomePlanError::InvalidLimits {
            field: "dsr_limit_percent".into(),
            reason: "DSR limit cannot be negative.".into(),
        });
    }
    if limits.existing_annual_debt_service < Decimal::ZERO {
        return Err(HomePlanError::InvalidLimits {
            field: "existing_annual_debt_service".into(),
            reason: "Existing debt service cannot be negative.".into(),
        });
    }
    if limits.at_limit_band_percent <= Decimal::ZERO || limits.at_limit_band_percent > PERCENT {
        return Err(HomePlanError::InvalidLimits {
            field: "at_limit_band_percent".into(),
            reason: "At-limit band must be in (0, 100].".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Currency;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn loan_input(principal: Money, scheme: RepaymentScheme) -> LoanInput {
        LoanInput {
            principal,
            annual_rate_percent: dec!(4.0),
            term_months: 240,
            scheme,
            currency: Currency::KRW,
            start_date: None,
        }
    }

    fn loan(principal: Money, scheme: RepaymentScheme) -> LoanResult {
        compute(&loan_input(principal, scheme)).unwrap()
    }

    fn limits() -> AffordabilityLimits {
        AffordabilityLimits {
            ltv_limit_percent: dec!(70),
            dsr_limit_percent: dec!(40),
            collateral_value: dec!(200_000_000),
            borrower_annual_income: dec!(60_000_000),
            existing_annual_debt_service: Decimal::ZERO,
            at_limit_band_percent: dec!(95),
        }
    }

    #[test]
    fn test_ltv_binds_for_high_income_borrower() {
        let result = evaluate(&loan(dec!(120_000_000), RepaymentScheme::EqualInstallment), &limits())
            .unwrap();
        assert_eq!(result.calculated_ltv_percent, dec!(60));
        assert_eq!(result.ltv_status, LimitStatus::Under);
        // 727,176 × 12 / 60M
        assert_eq!(result.calculated_dsr_percent, dec!(14.54352));
        assert_eq!(result.dsr_status, LimitStatus::Under);
        assert_eq!(result.ltv_implied_ceiling, dec!(140_000_000));
        assert_eq!(result.max_allowed_loan_amount, dec!(140_000_000));
        assert_eq!(result.binding_constraint, BindingConstraint::Ltv);
        assert_eq!(result.headroom, dec!(20_000_000));
    }

    #[test]
    fn test_dsr_binds_with_existing_debt() {
        let mut lim = limits();
        lim.borrower_annual_income = dec!(20_000_000);
        lim.existing_annual_debt_service = dec!(5_000_000);
        let result =
            evaluate(&loan(dec!(120_000_000), RepaymentScheme::EqualInstallment), &lim).unwrap();
        assert_eq!(result.dsr_status, LimitStatus::Over);
        assert_eq!(result.binding_constraint, BindingConstraint::Dsr);
        // 250,000 won/month over 240 months at 4%: ~41.26M
        assert!(result.max_allowed_loan_amount > dec!(41_000_000));
        assert!(result.max_allowed_loan_amount < dec!(42_000_000));
        assert!(result.headroom < Decimal::ZERO);
    }

    #[test]
    fn test_dsr_ceiling_round_trips_for_each_scheme() {
        let mut lim = limits();
        lim.borrower_annual_income = dec!(30_000_000);
        for scheme in [RepaymentScheme::EqualInstallment, RepaymentScheme::EqualPrincipal] {
            let first = evaluate(&loan(dec!(100_000_000), scheme), &lim).unwrap();
            let ceiling = first.dsr_implied_ceiling.unwrap();
            let at_ceiling = evaluate(&loan(ceiling, scheme), &lim).unwrap();
            assert!((at_ceiling.calculated_dsr_percent - dec!(40)).abs() < dec!(0.01));
        }
    }

    #[test]
    fn test_existing_debt_above_limit_zeroes_ceiling() {
        let mut lim = limits();
        lim.existing_annual_debt_service = dec!(30_000_000);
        let result =
            evaluate(&loan(dec!(50_000_000), RepaymentScheme::EqualPrincipal), &lim).unwrap();
        assert_eq!(result.dsr_implied_ceiling, Some(Decimal::ZERO));
        assert_eq!(result.max_allowed_loan_amount, Decimal::ZERO);
        assert_eq!(result.binding_constraint, BindingConstraint::Dsr);
    }

    #[test]
    fn test_ltv_over_iff_above_limit() {
        let l = loan(dec!(120_000_000), RepaymentScheme::EqualInstallment);
        for collateral in [
            dec!(100_000_000),
            dec!(150_000_000),
            dec!(171_428_572),
            dec!(175_000_000),
            dec!(200_000_000),
            dec!(400_000_000),
        ] {
            let mut lim = limits();
            lim.collateral_value = collateral;
            let result = evaluate(&l, &lim).unwrap();
            assert_eq!(
                result.ltv_status == LimitStatus::Over,
                result.calculated_ltv_percent > lim.ltv_limit_percent
            );
        }
    }

    #[test]
    fn test_at_limit_band() {
        let mut lim = limits();
        lim.collateral_value = dec!(175_000_000);
        let l = loan(dec!(120_000_000), RepaymentScheme::EqualInstallment);
        // 68.5714% is above 95% of 70 (66.5) but not above 70
        assert_eq!(evaluate(&l, &lim).unwrap().ltv_status, LimitStatus::At);

        let exact = loan(dec!(140_000_000), RepaymentScheme::EqualInstallment);
        let result = evaluate(&exact, &limits()).unwrap();
        assert_eq!(result.calculated_ltv_percent, dec!(70));
        assert_eq!(result.ltv_status, LimitStatus::At);
    }

    #[test]
    fn test_one_unit_above_ltv_ceiling_is_over() {
        let l = loan(dec!(140_000_001), RepaymentScheme::EqualInstallment);
        let result = evaluate(&l, &limits()).unwrap();
        assert!(result.calculated_ltv_percent > dec!(70));
        assert_eq!(result.ltv_status, LimitStatus::Over);
        assert_eq!(result.max_allowed_loan_amount, dec!(140_000_000));
        assert_eq!(result.headroom, dec!(-1));
    }

    #[test]
    fn test_one_unit_of_payment_above_dsr_budget_is_over() {
        // 60M × 40% / 12 = 2,000,000 a month; bullet interest at 4% is P/300
        let mut lim = limits();
        lim.collateral_value = dec!(10_000_000_000);

        let at_budget = loan(dec!(600_000_000), RepaymentScheme::Bullet);
        assert_eq!(at_budget.monthly_payment, dec!(2_000_000));
        let result = evaluate(&at_budget, &lim).unwrap();
        assert_eq!(result.calculated_dsr_percent, dec!(40));
        assert_eq!(result.dsr_status, LimitStatus::At);

        let above = loan(dec!(600_000_300), RepaymentScheme::Bullet);
        assert_eq!(above.monthly_payment, dec!(2_000_001));
        let result = evaluate(&above, &lim).unwrap();
        assert!(result.calculated_dsr_percent > dec!(40));
        assert_eq!(result.dsr_status, LimitStatus::Over);
        assert!(result.headroom < Decimal::ZERO);
    }

    #[test]
    fn test_principal_beyond_range_rejected() {
        let l = LoanResult {
            principal: dec!(10_000_000_000_000_000_000_000_000_000),
            ..loan(dec!(100_000_000), RepaymentScheme::EqualInstallment)
        };
        let mut lim = limits();
        lim.collateral_value = dec!(0.01);
        match evaluate(&l, &lim).unwrap_err() {
            HomePlanError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_ratio_beyond_range_is_overflow() {
        let l = LoanResult {
            principal: MAX_AMOUNT,
            ..loan(dec!(100_000_000), RepaymentScheme::EqualInstallment)
        };
        let mut lim = limits();
        lim.collateral_value = dec!(0.00000000000000000001);
        match evaluate(&l, &lim).unwrap_err() {
            HomePlanError::Overflow { context } => assert_eq!(context, "LTV ratio"),
            other => panic!("Expected Overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_limit_percent_beyond_range_rejected() {
        let mut lim = limits();
        lim.dsr_limit_percent = dec!(1001);
        let l = loan(dec!(100_000_000), RepaymentScheme::EqualInstallment);
        match evaluate(&l, &lim).unwrap_err() {
            HomePlanError::InvalidLimits { field, .. } => assert_eq!(field, "dsr_limit_percent"),
            other => panic!("Expected InvalidLimits, got {other:?}"),
        }
    }

    #[test]
    fn test_largest_amounts_evaluate_without_overflow() {
        let l = LoanResult {
            principal: MAX_AMOUNT,
            monthly_payment: MAX_AMOUNT,
            ..loan(dec!(100_000_000), RepaymentScheme::EqualPrincipal)
        };
        let lim = AffordabilityLimits {
            ltv_limit_percent: MAX_LIMIT_PERCENT,
            dsr_limit_percent: MAX_LIMIT_PERCENT,
            collateral_value: MAX_AMOUNT,
            borrower_annual_income: MAX_AMOUNT,
            existing_annual_debt_service: MAX_AMOUNT,
            at_limit_band_percent: dec!(100),
        };
        let result = evaluate(&l, &lim).unwrap();
        assert_eq!(result.calculated_ltv_percent, dec!(100));
        assert_eq!(result.ltv_status, LimitStatus::Under);
    }

    #[test]
    fn test_max_allowed_monotonic_in_collateral() {
        let l = loan(dec!(120_000_000), RepaymentScheme::EqualInstallment);
        let mut previous = Decimal::ZERO;
        for step in 1..=20 {
            let mut lim = limits();
            lim.collateral_value = dec!(25_000_000) * Decimal::from(step);
            let max = evaluate(&l, &lim).unwrap().max_allowed_loan_amount;
            assert!(max >= previous);
            previous = max;
        }
    }

    #[test]
    fn test_max_allowed_monotonic_in_income() {
        let l = loan(dec!(120_000_000), RepaymentScheme::EqualPrincipal);
        let mut previous = Decimal::ZERO;
        for step in 1..=20 {
            let mut lim = limits();
            lim.borrower_annual_income = dec!(5_000_000) * Decimal::from(step);
            lim.existing_annual_debt_service = dec!(3_000_000);
            let max = evaluate(&l, &lim).unwrap().max_allowed_loan_amount;
            assert!(max >= previous);
            previous = max;
        }
    }

    #[test]
    fn test_interest_free_bullet_has_no_dsr_ceiling() {
        let input = LoanInput {
            annual_rate_percent: Decimal::ZERO,
            ..loan_input(dec!(100_000_000), RepaymentScheme::Bullet)
        };
        let l = compute(&input).unwrap();
        let result = evaluate(&l, &limits()).unwrap();
        assert_eq!(result.dsr_implied_ceiling, None);
        assert_eq!(result.binding_constraint, BindingConstraint::Ltv);
        assert_eq!(result.max_allowed_loan_amount, dec!(140_000_000));
    }

    #[test]
    fn test_non_positive_collateral_rejected() {
        let mut lim = limits();
        lim.collateral_value = Decimal::ZERO;
        let l = loan(dec!(100_000_000), RepaymentScheme::EqualInstallment);
        match evaluate(&l, &lim).unwrap_err() {
            HomePlanError::InvalidLimits { field, .. } => assert_eq!(field, "collateral_value"),
            other => panic!("Expected InvalidLimits, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_income_rejected() {
        let mut lim = limits();
        lim.borrower_annual_income = dec!(-1);
        let l = loan(dec!(100_000_000), RepaymentScheme::EqualInstallment);
        match evaluate(&l, &lim).unwrap_err() {
            HomePlanError::InvalidLimits { field, .. } => {
                assert_eq!(field, "borrower_annual_income")
            }
            other => panic!("Expected InvalidLimits, got {other:?}"),
        }
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let json = r#"{
            "ltv_limit_percent": "70",
            "dsr_limit_percent": "40",
            "collateral_value": "500000000",
            "borrower_annual_income": "80000000"
        }"#;
        let lim: AffordabilityLimits = serde_json::from_str(json).unwrap();
        assert_eq!(lim.at_limit_band_percent, dec!(95));
        assert_eq!(lim.existing_annual_debt_service, Decimal::ZERO);
    }

    #[test]
    fn test_assessment_envelope_warns_when_over() {
        let mut lim = limits();
        lim.collateral_value = dec!(150_000_000);
        let output = assess_affordability(
            &loan_input(dec!(120_000_000), RepaymentScheme::EqualInstallment),
            &lim,
        )
        .unwrap();
        assert_eq!(output.result.affordability.ltv_status, LimitStatus::Over);
        assert!(output.warnings.iter().any(|w| w.starts_with("LTV")));
        assert_eq!(output.result.loan.principal, dec!(120_000_000));
    }
}
