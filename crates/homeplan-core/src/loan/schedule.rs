//! Period-by-period repayment schedule.
//!
//! Interest is charged on the opening balance each month and rounded to the
//! currency unit; the final period absorbs any residual so the principal
//! portions sum exactly to the loan principal.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::amortization::{compute, methodology, validate_loan_input, LoanInput, RepaymentScheme};
use crate::time_value::{level_payment, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Currency, Money};
use crate::HomePlanResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal_portion: Money,
    pub payment: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub scheme: RepaymentScheme,
    pub currency: Currency,
    pub periods: Vec<SchedulePeriod>,
    /// Sum of simulated payments.
    pub total_payment: Money,
    /// Sum of simulated interest.
    pub total_interest: Money,
    /// Total interest from the closed-form calculator, for comparison.
    pub closed_form_total_interest: Money,
}

/// Simulate the loan month by month.
pub fn build_schedule(input: &LoanInput) -> HomePlanResult<ComputationOutput<ScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_loan_input(input)?;
    let summary = compute(input)?;
    let periods = simulate(input)?;

    let total_interest: Money = periods.iter().map(|p| p.interest).sum();
    let total_payment: Money = periods.iter().map(|p| p.payment).sum();

    // one unit of rounding per period is expected; more means the closed form diverged
    let tolerance = input.currency.unit() * Decimal::from(input.term_months);
    let divergence = (total_interest - summary.total_interest).abs();
    if divergence > tolerance {
        warnings.push(format!(
            "Simulated total interest {} differs from closed-form {} by {}",
            total_interest, summary.total_interest, divergence
        ));
    }

    debug!(
        periods = periods.len(),
        total_interest = %total_interest,
        closed_form = %summary.total_interest,
        "schedule built"
    );

    let output = ScheduleOutput {
        scheme: input.scheme,
        currency: input.currency,
        periods,
        total_payment,
        total_interest,
        closed_form_total_interest: summary.total_interest,
    };

    let assumptions = serde_json::json!({
        "monthly_rate": monthly_rate(input.annual_rate_percent).to_string(),
        "interest_rounding": "per period, half_up",
        "final_period": "clears residual balance",
        "start_date": input.start_date,
    });

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology(input.scheme),
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

fn simulate(input: &LoanInput) -> HomePlanResult<Vec<SchedulePeriod>> {
    let ccy = input.currency;
    let r = monthly_rate(input.annual_rate_percent);
    let n = input.term_months;

    let level = ccy.round(level_payment(input.principal, r, n)?);
    let fixed_principal = ccy.round(input.principal / Decimal::from(n));

    let mut periods = Vec::with_capacity(n as usize);
    let mut balance = input.principal;

    for month in 1..=n {
        let opening_balance = balance;
        let interest = ccy.round(opening_balance * r);

        let scheduled = match input.scheme {
            RepaymentScheme::EqualInstallment => (level - interest).max(Decimal::ZERO),
            RepaymentScheme::EqualPrincipal => fixed_principal,
            RepaymentScheme::Bullet => Decimal::ZERO,
        };
        let principal_portion = if month == n {
            opening_balance
        } else {
            scheduled.min(opening_balance)
        };

        let closing_balance = opening_balance - principal_portion;
        balance = closing_balance;

        periods.push(SchedulePeriod {
            month,
            payment_date: input
                .start_date
                .and_then(|d| d.checked_add_months(Months::new(month - 1))),
            opening_balance,
            interest,
            principal_portion,
            payment: interest + principal_portion,
            closing_balance,
        });
    }

    Ok(periods)
}
