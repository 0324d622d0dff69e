use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::HomePlanError;
use crate::types::{Money, Percent, Rate};
use crate::HomePlanResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert an annual percentage (4.0 = 4%) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// (1 + r)^n, failing instead of panicking when the power leaves Decimal range.
pub fn compound_factor(rate: Rate, nper: u32) -> HomePlanResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powi(i64::from(nper))
        .ok_or_else(|| HomePlanError::Overflow {
            context: format!("compound factor (1 + {rate})^{nper}"),
        })
}

/// Level payment that retires `principal` over `nper` periods at `rate`.
///
/// Written as P·r / (1 − (1+r)^−n), which equals the textbook
/// P·r·(1+r)^n / ((1+r)^n − 1) without forming the large product.
pub fn level_payment(principal: Money, rate: Rate, nper: u32) -> HomePlanResult<Money> {
    if nper == 0 {
        return Err(HomePlanError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let n = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = compound_factor(rate, nper)?;
    let denom = Decimal::ONE - Decimal::ONE / factor;
    if denom.is_zero() {
        // rate too small to register in 28 digits
        return Ok(principal / n);
    }

    Ok(principal * rate / denom)
}

/// Principal that a level payment of `payment` retires over `nper` periods.
/// Inverse of [`level_payment`].
pub fn principal_for_payment(payment: Money, rate: Rate, nper: u32) -> HomePlanResult<Money> {
    if nper == 0 {
        return Err(HomePlanError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let n = Decimal::from(nper);
    if rate.is_zero() {
        return Ok(payment * n);
    }

    let factor = compound_factor(rate, nper)?;
    let annuity_factor = (Decimal::ONE - Decimal::ONE / factor) / rate;
    if annuity_factor.is_zero() {
        return Ok(payment * n);
    }

    Ok(payment * annuity_factor)
}
