use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestrError;
use crate::mortgage::amortization::{amortize, AmortizationRow, LoanTerms};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::InvestrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One loan in a multi-tranche financing (e.g. bank loan + subsidized loan).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageTranche {
    pub name: String,
    pub terms: LoanTerms,
}

/// A set of tranches financing the same purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedInput {
    pub tranches: Vec<MortgageTranche>,
}

/// Per-year totals across all tranches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedYear {
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    pub extra_repayment: Money,
    pub balance: Money,
}

/// The schedule of a single tranche within a combined run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrancheSchedule {
    pub name: String,
    pub rows: Vec<AmortizationRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedOutput {
    pub tranches: Vec<TrancheSchedule>,
    pub totals: Vec<CombinedYear>,
    pub total_interest: Money,
    pub final_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize every tranche and sum the schedules year by year.
///
/// Tranches may have different terms; a tranche contributes zero to every
/// column past the end of its own schedule, including the balance (the
/// loan is treated as settled at whatever its final row shows).
pub fn combine(input: &CombinedInput) -> InvestrResult<ComputationOutput<CombinedOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.tranches.is_empty() {
        return Err(InvestrError::InsufficientData(
            "At least one tranche is required".into(),
        ));
    }

    let mut tranches: Vec<TrancheSchedule> = Vec::with_capacity(input.tranches.len());
    for tranche in &input.tranches {
        let schedule = amortize(&tranche.terms)?;
        for w in &schedule.warnings {
            warnings.push(format!("{}: {}", tranche.name, w));
        }
        tranches.push(TrancheSchedule {
            name: tranche.name.clone(),
            rows: schedule.result.rows,
        });
    }

    let horizon = tranches
        .iter()
        .map(|t| t.rows.len())
        .max()
        .unwrap_or(0) as u32;

    let mut totals: Vec<CombinedYear> = Vec::with_capacity(horizon as usize);
    let mut total_interest = Decimal::ZERO;

    for year in 1..=horizon {
        let mut combined = CombinedYear {
            year,
            interest: Decimal::ZERO,
            principal: Decimal::ZERO,
            extra_repayment: Decimal::ZERO,
            balance: Decimal::ZERO,
        };

        for tranche in &tranches {
            if let Some(row) = tranche.rows.get(year as usize - 1) {
                combined.interest += row.annual_interest;
                combined.principal += row.annual_principal;
                combined.extra_repayment += row.annual_extra_repayment;
                combined.balance += row.ending_balance;
            }
        }

        total_interest += combined.interest;
        totals.push(combined);
    }

    let final_balance = totals.last().map(|t| t.balance).unwrap_or(Decimal::ZERO);

    let output = CombinedOutput {
        tranches,
        totals,
        total_interest,
        final_balance,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Combined Multi-Tranche Amortization",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
