//! Closed-form loan repayment calculator.
//!
//! Covers the three repayment schemes offered by Korean retail mortgage
//! products: equal installment (원리금균등), equal principal (원금균등) and
//! bullet (만기일시). All math uses `rust_decimal::Decimal` and monetary
//! outputs are rounded half-up to the currency's smallest display unit.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::debug;

use crate::error::HomePlanError;
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Currency, Money, Percent, MAX_AMOUNT};
use crate::HomePlanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longest term accepted (100 years).
pub const MAX_TERM_MONTHS: u32 = 1200;
/// Highest annual rate accepted, in percent.
pub const MAX_ANNUAL_RATE_PERCENT: Percent = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// How principal and interest are spread over the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepaymentScheme {
    /// Constant total payment; the interest share shrinks over time.
    EqualInstallment,
    /// Constant principal portion; interest on the declining balance.
    EqualPrincipal,
    /// Interest only each month, full principal with the final payment.
    Bullet,
}

impl RepaymentScheme {
    pub fn label(&self) -> &'static str {
        match self {
            RepaymentScheme::EqualInstallment => "equal_installment",
            RepaymentScheme::EqualPrincipal => "equal_principal",
            RepaymentScheme::Bullet => "bullet",
        }
    }
}

impl fmt::Display for RepaymentScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RepaymentScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "equal_installment" | "installment" | "annuity" => Ok(RepaymentScheme::EqualInstallment),
            "equal_principal" | "principal" => Ok(RepaymentScheme::EqualPrincipal),
            "bullet" | "interest_only" => Ok(RepaymentScheme::Bullet),
            other => Err(format!(
                "unknown repayment scheme '{other}' (expected equal_installment, equal_principal or bullet)"
            )),
        }
    }
}

/// A single loan simulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// Annual nominal rate in percent (4.0 = 4%).
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub scheme: RepaymentScheme,
    #[serde(default)]
    pub currency: Currency,
    /// Date of the first payment; only used for schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Summary of a loan simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub principal: Money,
    /// First-month payment (constant for equal installment).
    pub monthly_payment: Money,
    /// Final-month payment.
    pub last_payment: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    pub scheme: RepaymentScheme,
    pub currency: Currency,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute monthly payment and total interest for a loan.
pub fn compute(input: &LoanInput) -> HomePlanResult<LoanResult> {
    validate_loan_input(input)?;

    let principal = input.principal;
    let n = Decimal::from(input.term_months);
    let r = monthly_rate(input.annual_rate_percent);

    let (first, last, interest) = match input.scheme {
        RepaymentScheme::EqualInstallment => {
            let pmt = level_payment(principal, r, input.term_months)?;
            (pmt, pmt, pmt * n - principal)
        }
        RepaymentScheme::EqualPrincipal => {
            let portion = principal / n;
            // sum of r·(P − k·P/n) for k in 0..n
            let interest = principal * r * (n + Decimal::ONE) / dec!(2);
            (portion + principal * r, portion * (Decimal::ONE + r), interest)
        }
        RepaymentScheme::Bullet => {
            let monthly_interest = principal * r;
            (monthly_interest, principal + monthly_interest, monthly_interest * n)
        }
    };

    let ccy = input.currency;
    let result = LoanResult {
        principal,
        monthly_payment: ccy.round(first),
        last_payment: ccy.round(last),
        total_interest: ccy.round(interest),
        total_payment: ccy.round(principal + interest),
        annual_rate_percent: input.annual_rate_percent,
        term_months: input.term_months,
        scheme: input.scheme,
        currency: ccy,
    };

    debug!(
        principal = %result.principal,
        scheme = %result.scheme,
        monthly_payment = %result.monthly_payment,
        total_interest = %result.total_interest,
        "loan computed"
    );

    Ok(result)
}

/// [`compute`] wrapped in the standard metadata envelope.
pub fn calculate_loan(input: &LoanInput) -> HomePlanResult<ComputationOutput<LoanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = compute(input)?;

    if input.annual_rate_percent.is_zero() {
        warnings.push("Zero interest rate: payments repay principal only".into());
    }
    if input.scheme == RepaymentScheme::Bullet {
        warnings.push(format!(
            "Principal of {} is due in full with the final payment",
            result.principal
        ));
    }

    let assumptions = serde_json::json!({
        "monthly_rate": monthly_rate(input.annual_rate_percent).to_string(),
        "currency": input.currency,
        "rounding": "half_up",
        "minor_units": input.currency.minor_units(),
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(input.scheme),
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}

pub(crate) fn methodology(scheme: RepaymentScheme) -> &'static str {
    match scheme {
        RepaymentScheme::EqualInstallment => "Equal installment amortization (level annuity payment)",
        RepaymentScheme::EqualPrincipal => "Equal principal amortization (declining-balance interest, closed form)",
        RepaymentScheme::Bullet => "Bullet repayment (interest only, principal at maturity)",
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

pub(crate) fn validate_loan_input(input: &LoanInput) -> HomePlanResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(HomePlanError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive.".into(),
        });
    }
    if input.principal > MAX_AMOUNT {
        return Err(HomePlanError::InvalidInput {
            field: "principal".into(),
            reason: format!("Principal cannot exceed {MAX_AMOUNT}."),
        });
    }
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(HomePlanError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative.".into(),
        });
    }
    if input.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT {
        return Err(HomePlanError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: format!("Interest rate cannot exceed {MAX_ANNUAL_RATE_PERCENT}%."),
        });
    }
    if input.term_months == 0 {
        return Err(HomePlanError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month.".into(),
        });
    }
    if input.term_months > MAX_TERM_MONTHS {
        return Err(HomePlanError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Term cannot exceed {MAX_TERM_MONTHS} months."),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
