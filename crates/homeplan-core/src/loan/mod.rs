pub mod amortization;
pub mod schedule;

pub use amortization::{calculate_loan, compute, LoanInput, LoanResult, RepaymentScheme};
pub use schedule::{build_schedule, ScheduleOutput, SchedulePeriod};
