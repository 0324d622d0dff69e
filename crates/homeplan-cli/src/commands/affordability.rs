use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use serde_json::Value;

use homeplan_core::affordability::{self, AffordabilityLimits};
use homeplan_core::loan::LoanInput;

use super::loan::LoanFlags;
use crate::input;

/// Arguments for LTV / DSR affordability checks
#[derive(Args, Debug)]
#[command(allow_hyphen_values = true)]
pub struct AffordabilityArgs {
    /// Path to JSON/YAML input file with `loan` and `limits` sections
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// LTV ceiling in percent
    #[arg(long, alias = "ltv")]
    pub ltv_limit_percent: Option<Decimal>,

    /// DSR ceiling in percent
    #[arg(long, alias = "dsr")]
    pub dsr_limit_percent: Option<Decimal>,

    /// Collateral (property) value
    #[arg(long, alias = "collateral")]
    pub collateral_value: Option<Decimal>,

    /// Borrower's annual income
    #[arg(long, alias = "income")]
    pub borrower_annual_income: Option<Decimal>,

    /// Annual debt service on existing loans
    #[arg(long, alias = "existing-debt")]
    pub existing_annual_debt_service: Option<Decimal>,

    /// Share of a limit, in percent, from which a ratio is reported as "At"
    #[arg(long, default_value = "95")]
    pub at_limit_band_percent: Decimal,
}

#[derive(Debug, Deserialize)]
struct AffordabilityDocument {
    loan: LoanInput,
    limits: AffordabilityLimits,
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let doc = match input::read_document::<AffordabilityDocument>(args.input.as_deref())? {
        Some(doc) => doc,
        None => AffordabilityDocument {
            limits: AffordabilityLimits {
                ltv_limit_percent: args
                    .ltv_limit_percent
                    .ok_or("--ltv-limit-percent is required (or provide --input)")?,
                dsr_limit_percent: args
                    .dsr_limit_percent
                    .ok_or("--dsr-limit-percent is required (or provide --input)")?,
                collateral_value: args
                    .collateral_value
                    .ok_or("--collateral-value is required (or provide --input)")?,
                borrower_annual_income: args
                    .borrower_annual_income
                    .ok_or("--borrower-annual-income is required (or provide --input)")?,
                existing_annual_debt_service: args
                    .existing_annual_debt_service
                    .unwrap_or(dec!(0)),
                at_limit_band_percent: args.at_limit_band_percent,
            },
            loan: args.loan.into_input()?,
        },
    };

    let result = affordability::assess_affordability(&doc.loan, &doc.limits)?;
    Ok(serde_json::to_value(result)?)
}
