use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use homeplan_core::loan::{self, LoanInput, RepaymentScheme};
use homeplan_core::Currency;

use crate::input;

/// Loan parameters shared by every loan-based command
#[derive(Args, Debug, Clone)]
#[command(allow_hyphen_values = true)]
pub struct LoanFlags {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (4.0 = 4%)
    #[arg(long, alias = "rate")]
    pub annual_rate_percent: Option<Decimal>,

    /// Term in months
    #[arg(long, alias = "term")]
    pub term_months: Option<u32>,

    /// Repayment scheme: equal_installment, equal_principal or bullet
    #[arg(long, default_value = "equal_installment")]
    pub scheme: RepaymentScheme,

    /// Currency (rounding unit)
    #[arg(long, default_value = "KRW")]
    pub currency: Currency,

    /// First payment date (YYYY-MM-DD), schedules only
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

impl LoanFlags {
    pub fn into_input(self) -> Result<LoanInput, Box<dyn std::error::Error>> {
        Ok(LoanInput {
            principal: self
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: self
                .annual_rate_percent
                .ok_or("--annual-rate-percent is required (or provide --input)")?,
            term_months: self
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            scheme: self.scheme,
            currency: self.currency,
            start_date: self.start_date,
        })
    }
}

/// Arguments for loan and schedule commands
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,
}

fn resolve_loan(args: LoanArgs) -> Result<LoanInput, Box<dyn std::error::Error>> {
    match input::read_document::<LoanInput>(args.input.as_deref())? {
        Some(doc) => Ok(doc),
        None => args.loan.into_input(),
    }
}

pub fn run_loan(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(args)?;
    let result = loan::calculate_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input = resolve_loan(args)?;
    let result = loan::build_schedule(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
