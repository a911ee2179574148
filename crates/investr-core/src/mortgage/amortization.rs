use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestrError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::InvestrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Contractual terms of a single mortgage loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Total amortization horizon in years
    pub term_years: u32,
    /// Initial loan amount
    pub principal: Money,
    /// Nominal annual interest rate (0.0135 = 1.35%)
    pub annual_rate: Rate,
    /// Contractual level payment (interest + principal) once amortization begins
    pub monthly_payment: Money,
    /// Fraction of the original principal repaid as a one-time extra payment
    /// at the end of each amortizing year (Sondertilgung)
    #[serde(default)]
    pub extra_annual_repayment_rate: Rate,
    /// Initial years during which only interest accrues and the balance is untouched
    #[serde(default)]
    pub interest_only_years: u32,
    /// Calendar month the loan begins (1-12); only year 1 is partial
    #[serde(default = "default_start_month")]
    pub start_month: u32,
}

fn default_start_month() -> u32 {
    1
}

/// One year of an amortization schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub year: u32,
    /// 12 for every year but the first, which runs `13 - start_month` months
    pub months_in_year: u32,
    pub monthly_interest: Money,
    pub monthly_principal: Money,
    pub annual_interest: Money,
    pub annual_principal: Money,
    pub annual_extra_repayment: Money,
    /// Balance after this year's principal and extra repayment are applied
    pub ending_balance: Money,
}

/// Full schedule plus the summary figures shown next to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub rows: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_extra_repayment: Money,
    pub final_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize a loan year by year over its full term.
///
/// Interest accrues on the running balance, pro-rated by the number of
/// months in the year. During the interest-only period the balance is
/// unchanged; interest is assumed paid separately and is not capitalized.
/// The balance is never clamped at zero: a payment below the monthly
/// interest produces a growing balance, and an aggressive extra-repayment
/// rate can drive it negative. Both cases are surfaced as warnings.
pub fn amortize(terms: &LoanTerms) -> InvestrResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_terms(terms)?;

    let mut rows: Vec<AmortizationRow> = Vec::with_capacity(terms.term_years as usize);
    let mut loan_balance = terms.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut total_extra_repayment = Decimal::ZERO;
    let mut negative_amortization = false;

    for year in 1..=terms.term_years {
        let months_in_year = if year > 1 { 12 } else { 13 - terms.start_month };
        let months = Decimal::from(months_in_year);

        let annual_interest = loan_balance * terms.annual_rate * (months / dec!(12));
        let monthly_interest = annual_interest / months;

        let mut monthly_principal = Decimal::ZERO;
        let mut annual_principal = Decimal::ZERO;
        let mut annual_extra_repayment = Decimal::ZERO;

        if year > terms.interest_only_years {
            monthly_principal = terms.monthly_payment - monthly_interest;
            annual_principal = monthly_principal * months;
            loan_balance -= annual_principal;

            annual_extra_repayment = terms.principal * terms.extra_annual_repayment_rate;
            loan_balance -= annual_extra_repayment;

            if monthly_principal < Decimal::ZERO {
                negative_amortization = true;
            }
        }

        total_interest += annual_interest;
        total_principal += annual_principal;
        total_extra_repayment += annual_extra_repayment;

        rows.push(AmortizationRow {
            year,
            months_in_year,
            monthly_interest,
            monthly_principal,
            annual_interest,
            annual_principal,
            annual_extra_repayment,
            ending_balance: loan_balance,
        });
    }

    if negative_amortization {
        warnings.push(
            "Monthly payment is below monthly interest in at least one year; \
             the balance grows instead of amortizing"
                .into(),
        );
    }
    if loan_balance < Decimal::ZERO {
        warnings.push(format!(
            "Final balance is negative ({loan_balance}); the loan is overpaid before the end of its term"
        ));
    }

    let output = AmortizationOutput {
        rows,
        total_interest,
        total_principal,
        total_extra_repayment,
        final_balance: loan_balance,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Yearly Loan Amortization Schedule",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_terms(terms: &LoanTerms) -> InvestrResult<()> {
    if terms.term_years == 0 {
        return Err(InvestrError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }

    if terms.principal <= Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }

    if terms.annual_rate < Decimal::ZERO || terms.annual_rate >= Decimal::ONE {
        return Err(InvestrError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Annual rate must be in [0, 1), expressed as a decimal".into(),
        });
    }

    if terms.monthly_payment < Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "monthly_payment".into(),
            reason: "Monthly payment cannot be negative".into(),
        });
    }

    if terms.extra_annual_repayment_rate < Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "extra_annual_repayment_rate".into(),
            reason: "Extra repayment rate cannot be negative".into(),
        });
    }

    if terms.start_month < 1 || terms.start_month > 12 {
        return Err(InvestrError::InvalidInput {
            field: "start_month".into(),
            reason: "Start month must be between 1 and 12".into(),
        });
    }

    // interest_only_years >= term_years is legal: the whole schedule is
    // interest-only and the balance stays at the principal.

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
