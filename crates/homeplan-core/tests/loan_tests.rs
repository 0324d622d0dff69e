use homeplan_core::loan::{self, LoanInput, RepaymentScheme};
use homeplan_core::{Currency, HomePlanError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Loan calculator tests
// ===========================================================================

fn first_home(scheme: RepaymentScheme) -> LoanInput {
    // 300M won, 3.5% fixed, 30 years
    LoanInput {
        principal: dec!(300_000_000),
        annual_rate_percent: dec!(3.5),
        term_months: 360,
        scheme,
        currency: Currency::KRW,
        start_date: None,
    }
}

#[test]
fn test_reference_mortgage_payment() {
    let input = LoanInput {
        principal: dec!(120_000_000),
        annual_rate_percent: dec!(4.0),
        term_months: 240,
        scheme: RepaymentScheme::EqualInstallment,
        currency: Currency::KRW,
        start_date: None,
    };
    let result = loan::compute(&input).unwrap();
    assert_eq!(result.monthly_payment, dec!(727_176));
}

#[test]
fn test_thirty_year_equal_installment() {
    let result = loan::compute(&first_home(RepaymentScheme::EqualInstallment)).unwrap();
    // ~1,347,134 won/month
    assert!((result.monthly_payment - dec!(1_347_134)).abs() <= dec!(2));
    assert!(result.total_interest > dec!(184_000_000));
    assert!(result.total_interest < dec!(186_000_000));
}

#[test]
fn test_schemes_ordering_of_total_interest() {
    let ei = loan::compute(&first_home(RepaymentScheme::EqualInstallment)).unwrap();
    let ep = loan::compute(&first_home(RepaymentScheme::EqualPrincipal)).unwrap();
    let bullet = loan::compute(&first_home(RepaymentScheme::Bullet)).unwrap();

    // principal repaid earliest costs least
    assert!(ep.total_interest < ei.total_interest);
    assert!(ei.total_interest < bullet.total_interest);
}

#[test]
fn test_compute_is_deterministic() {
    let input = first_home(RepaymentScheme::EqualPrincipal);
    let results: Vec<_> = (0..5).map(|_| loan::compute(&input).unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_zero_rate_payment_is_principal_over_term() {
    let input = LoanInput {
        principal: dec!(36_000_000),
        annual_rate_percent: Decimal::ZERO,
        term_months: 36,
        scheme: RepaymentScheme::EqualInstallment,
        currency: Currency::KRW,
        start_date: None,
    };
    let result = loan::compute(&input).unwrap();
    assert_eq!(result.monthly_payment, dec!(1_000_000));
    assert_eq!(result.total_interest, Decimal::ZERO);
}

#[test]
fn test_schedule_agrees_with_summary() {
    let input = first_home(RepaymentScheme::EqualInstallment);
    let summary = loan::compute(&input).unwrap();
    let schedule = loan::build_schedule(&input).unwrap();

    assert_eq!(schedule.result.periods.len(), 360);
    assert_eq!(schedule.result.periods[0].payment, summary.monthly_payment);
    let diff = (schedule.result.total_interest - summary.total_interest).abs();
    assert!(diff <= dec!(360));
    assert!(schedule.warnings.is_empty());
}

#[test]
fn test_invalid_input_kinds() {
    let cases = [
        (dec!(0), dec!(3.5), 360, "principal"),
        (dec!(-1), dec!(3.5), 360, "principal"),
        (dec!(1_000_000), dec!(-0.1), 360, "annual_rate_percent"),
        (dec!(1_000_000), dec!(3.5), 0, "term_months"),
    ];
    for (principal, rate, term, expected_field) in cases {
        let input = LoanInput {
            principal,
            annual_rate_percent: rate,
            term_months: term,
            ..first_home(RepaymentScheme::EqualInstallment)
        };
        match loan::compute(&input).unwrap_err() {
            HomePlanError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }
}

#[test]
fn test_envelope_serializes_decimals_as_strings() {
    let output = loan::calculate_loan(&first_home(RepaymentScheme::EqualPrincipal)).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert!(json["result"]["monthly_payment"].is_string());
    assert_eq!(json["result"]["scheme"], "equal_principal");
    assert_eq!(json["result"]["currency"], "KRW");
}
