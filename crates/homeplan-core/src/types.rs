use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios quoted the way borrowers and regulators quote them (4.0 = 4%).
pub type Percent = Decimal;

/// Rates expressed as decimals (0.04 = 4%). Used for per-period rates only.
pub type Rate = Decimal;

/// Largest principal, collateral or income accepted. Keeps every product
/// formed from validated inputs inside Decimal range.
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000_000);

/// Currency of a loan or collateral amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    KRW,
    USD,
    EUR,
    GBP,
    JPY,
    CNY,
}

impl Currency {
    /// Decimal places of the smallest display unit.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::KRW | Currency::JPY => 0,
            Currency::USD | Currency::EUR | Currency::GBP | Currency::CNY => 2,
        }
    }

    /// Smallest display unit as a Decimal (1 for KRW, 0.01 for USD).
    pub fn unit(&self) -> Money {
        Decimal::new(1, self.minor_units())
    }

    /// Round half-up (away from zero) to the smallest display unit.
    pub fn round(&self, amount: Money) -> Money {
        amount.round_dp_with_strategy(self.minor_units(), RoundingStrategy::MidpointAwayFromZero)
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KRW" => Ok(Currency::KRW),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CNY" => Ok(Currency::CNY),
            other => Err(format!("unsupported currency '{other}'")),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_krw_rounds_to_whole_won() {
        assert_eq!(Currency::KRW.round(dec!(727176.5)), dec!(727177));
        assert_eq!(Currency::KRW.round(dec!(727176.49)), dec!(727176));
    }

    #[test]
    fn test_usd_rounds_half_up_to_cents() {
        assert_eq!(Currency::USD.round(dec!(10.005)), dec!(10.01));
        assert_eq!(Currency::USD.round(dec!(10.004)), dec!(10.00));
    }

    #[test]
    fn test_unit() {
        assert_eq!(Currency::KRW.unit(), dec!(1));
        assert_eq!(Currency::EUR.unit(), dec!(0.01));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("krw".parse::<Currency>().unwrap(), Currency::KRW);
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert!("XYZ".parse::<Currency>().is_err());
    }

    #[test]
    fn test_default_currency_is_krw() {
        assert_eq!(Currency::default(), Currency::KRW);
    }
}
