use investr_core::mortgage::amortization::{amortize, LoanTerms};
use investr_core::mortgage::combined::{combine, CombinedInput, MortgageTranche};
use investr_core::report::melt;
use investr_core::InvestrError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortization schedule properties
// ===========================================================================

fn plain_terms() -> LoanTerms {
    // A 100k loan at 2% with a comfortable payment: amortizes every year
    LoanTerms {
        term_years: 10,
        principal: dec!(100000),
        annual_rate: dec!(0.02),
        monthly_payment: dec!(1000),
        extra_annual_repayment_rate: Decimal::ZERO,
        interest_only_years: 0,
        start_month: 1,
    }
}

fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff < dec!(0.000001),
        "expected {expected}, got {actual} (diff {diff})"
    );
}

#[test]
fn test_row_count_equals_term() {
    for term_years in [1, 7, 40, 100] {
        let mut terms = plain_terms();
        terms.term_years = term_years;
        let result = amortize(&terms).unwrap();
        assert_eq!(result.result.rows.len(), term_years as usize);
    }
}

#[test]
fn test_balance_non_increasing_when_payment_covers_interest() {
    let result = amortize(&plain_terms()).unwrap();
    let rows = &result.result.rows;

    for pair in rows.windows(2) {
        // Precondition of the property: the payment covers the interest
        assert!(pair[0].monthly_principal >= Decimal::ZERO);
        assert!(
            pair[1].ending_balance <= pair[0].ending_balance,
            "balance grew from {} to {} in year {}",
            pair[0].ending_balance,
            pair[1].ending_balance,
            pair[1].year
        );
    }
}

#[test]
fn test_conservation_of_principal() {
    let mut terms = plain_terms();
    terms.extra_annual_repayment_rate = dec!(0.02);
    terms.interest_only_years = 2;
    terms.start_month = 9;
    let result = amortize(&terms).unwrap();
    let out = &result.result;

    let repaid: Decimal = out
        .rows
        .iter()
        .map(|r| r.annual_principal + r.annual_extra_repayment)
        .sum();

    assert_close(repaid, terms.principal - out.final_balance);
    assert_close(repaid, out.total_principal + out.total_extra_repayment);
}

#[test]
fn test_amortize_is_idempotent() {
    let terms = plain_terms();
    let first = amortize(&terms).unwrap();
    let second = amortize(&terms).unwrap();

    assert_eq!(first.result.rows.len(), second.result.rows.len());
    for (a, b) in first.result.rows.iter().zip(second.result.rows.iter()) {
        assert_eq!(a.ending_balance, b.ending_balance);
        assert_eq!(a.annual_interest, b.annual_interest);
        assert_eq!(a.annual_principal, b.annual_principal);
    }
    assert_eq!(first.result.final_balance, second.result.final_balance);
}

#[test]
fn test_fully_interest_only_boundary() {
    let mut terms = plain_terms();
    terms.interest_only_years = terms.term_years;
    let result = amortize(&terms).unwrap();
    let out = &result.result;

    for row in &out.rows {
        assert_eq!(row.annual_principal, Decimal::ZERO);
        assert_eq!(row.annual_extra_repayment, Decimal::ZERO);
        assert_eq!(row.ending_balance, terms.principal);
    }
}

#[test]
fn test_partial_first_year_only() {
    let mut terms = plain_terms();
    terms.start_month = 4;
    let result = amortize(&terms).unwrap();
    let rows = &result.result.rows;

    assert_eq!(rows[0].months_in_year, 9);
    for row in &rows[1..] {
        assert_eq!(row.months_in_year, 12);
    }
}

// ===========================================================================
// Combined tranches
// ===========================================================================

#[test]
fn test_combined_matches_single_tranche() {
    let terms = plain_terms();
    let single = amortize(&terms).unwrap();
    let combined = combine(&CombinedInput {
        tranches: vec![MortgageTranche {
            name: "Only".into(),
            terms,
        }],
    })
    .unwrap();

    assert_eq!(
        combined.result.final_balance,
        single.result.final_balance
    );
    assert_eq!(
        combined.result.total_interest,
        single.result.total_interest
    );
}

#[test]
fn test_combined_total_interest_is_sum_of_tranches() {
    let mut small = plain_terms();
    small.principal = dec!(50000);
    small.term_years = 5;
    small.monthly_payment = dec!(900);

    let a = amortize(&plain_terms()).unwrap().result.total_interest;
    let b = amortize(&small).unwrap().result.total_interest;

    let combined = combine(&CombinedInput {
        tranches: vec![
            MortgageTranche { name: "Bank".into(), terms: plain_terms() },
            MortgageTranche { name: "KfW".into(), terms: small },
        ],
    })
    .unwrap();

    // Summation order differs from the per-year accumulation inside
    // combine, so allow for last-digit rounding
    assert_close(combined.result.total_interest, a + b);
}

// ===========================================================================
// Long-format reporting over schedules
// ===========================================================================

#[test]
fn test_melt_amortization_rows() {
    let result = amortize(&plain_terms()).unwrap();
    let points = melt(
        &result.result.rows,
        "year",
        &["monthly_interest", "monthly_principal"],
    )
    .unwrap();

    assert_eq!(points.len(), 20);
    assert!(points.iter().any(|p| p.variable == "monthly_interest"));
    assert!(points.iter().any(|p| p.variable == "monthly_principal"));
}

// ===========================================================================
// Error surface
// ===========================================================================

#[test]
fn test_invalid_terms_are_typed_errors() {
    let mut terms = plain_terms();
    terms.principal = dec!(-1);
    match amortize(&terms).unwrap_err() {
        InvestrError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}
