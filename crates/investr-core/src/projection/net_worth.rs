use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestrError;
use crate::mortgage::amortization::AmortizationRow;
use crate::types::{compound, with_metadata, ComputationOutput, Money, Rate};
use crate::InvestrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The slice of an amortization year the projector needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyFigure {
    pub year: u32,
    pub interest: Money,
    pub ending_balance: Money,
}

/// Aggregate a full amortization schedule down to the projector's input shape.
pub fn yearly_schedule(rows: &[AmortizationRow]) -> Vec<YearlyFigure> {
    rows.iter()
        .map(|row| YearlyFigure {
            year: row.year,
            interest: row.annual_interest,
            ending_balance: row.ending_balance,
        })
        .collect()
}

/// Inputs for the buy-vs-rent net-worth projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInputs {
    /// Yearly amortization figures, one per projected year
    pub schedule: Vec<YearlyFigure>,
    pub property_value: Money,
    /// Acquisition costs plus any first-year fee, sunk at year 0
    pub upfront_fee: Money,
    pub annual_cold_rent: Money,
    pub term_years: u32,
    #[serde(default)]
    pub rent_increase_rate: Rate,
    #[serde(default)]
    pub annual_maintenance_cost: Money,
    #[serde(default)]
    pub annual_property_tax: Money,
    pub living_surface: Decimal,
    #[serde(default)]
    pub property_appreciation_rate: Rate,
}

/// One year of the net-worth comparison against renting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiRow {
    pub year: u32,
    /// Running interest paid, negated (a cost)
    pub cumulative_interest: Money,
    /// Equity at static property value: property_value - ending_balance
    pub amount_invested: Money,
    /// Appreciated equity minus the unappreciated baseline
    pub equity_gain: Money,
    /// Running rent avoided by owning
    pub cumulative_rent: Money,
    /// Running maintenance and property tax, negated (a cost)
    pub cumulative_extra_costs: Money,
    pub net_worth: Money,
    /// Tracked nominal property value
    pub property_value: Money,
    pub price_per_area: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project year-by-year net worth of buying against a renting baseline.
///
/// Net worth per year is
/// `-upfront_fee + equity_gain + cumulative_rent - cumulative_interest -
/// cumulative_extra_costs`. Rent compounds from year 1's base; equity gain
/// uses compound appreciation over the elapsed years.
pub fn project(inputs: &RoiInputs) -> InvestrResult<ComputationOutput<Vec<RoiRow>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_inputs(inputs)?;

    let mut rows: Vec<RoiRow> = Vec::with_capacity(inputs.term_years as usize);
    let mut cum_interest = Decimal::ZERO;
    let mut cum_rent = Decimal::ZERO;
    let mut cum_extra_costs = Decimal::ZERO;
    let mut property_value_running = inputs.property_value;

    for year in 1..=inputs.term_years {
        let figure = &inputs.schedule[year as usize - 1];

        cum_interest += figure.interest;

        let initial_equity = inputs.property_value - figure.ending_balance;
        let appreciated_equity =
            initial_equity * compound(inputs.property_appreciation_rate, year);
        let equity_gain = appreciated_equity - initial_equity;

        cum_rent += inputs.annual_cold_rent * compound(inputs.rent_increase_rate, year - 1);
        cum_extra_costs += inputs.annual_maintenance_cost + inputs.annual_property_tax;

        let net_worth =
            -inputs.upfront_fee + equity_gain + cum_rent - cum_interest - cum_extra_costs;

        // The displayed nominal value grows linearly while the equity gain
        // above compounds. The asymmetry is inherited behavior and is kept.
        property_value_running += inputs.property_value * inputs.property_appreciation_rate;

        rows.push(RoiRow {
            year,
            cumulative_interest: -cum_interest,
            amount_invested: initial_equity,
            equity_gain,
            cumulative_rent: cum_rent,
            cumulative_extra_costs: -cum_extra_costs,
            net_worth,
            property_value: property_value_running,
            price_per_area: property_value_running / inputs.living_surface,
        });
    }

    if let Some(last) = rows.last() {
        if last.net_worth < Decimal::ZERO {
            warnings.push(format!(
                "Net worth is still negative after {} years ({}); ownership never breaks even with renting over this horizon",
                inputs.term_years, last.net_worth
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Buy-vs-Rent Net Worth Projection",
        inputs,
        warnings,
        elapsed,
        rows,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_inputs(inputs: &RoiInputs) -> InvestrResult<()> {
    if inputs.term_years == 0 {
        return Err(InvestrError::InvalidInput {
            field: "term_years".into(),
            reason: "Projection horizon must be at least 1 year".into(),
        });
    }

    if inputs.living_surface.is_zero() {
        return Err(InvestrError::DivisionByZero {
            context: "price per area (property_value / living_surface)".into(),
        });
    }

    if (inputs.schedule.len() as u32) < inputs.term_years {
        return Err(InvestrError::InsufficientData(format!(
            "Schedule covers {} years but the projection horizon is {}",
            inputs.schedule.len(),
            inputs.term_years
        )));
    }

    // Negative rent-increase or appreciation rates are decline scenarios
    // and pass through untouched.

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn flat_inputs() -> RoiInputs {
        RoiInputs {
            schedule: vec![YearlyFigure {
                year: 1,
                interest: dec!(2000),
                ending_balance: dec!(490000),
            }],
            property_value: dec!(500000),
            upfront_fee: dec!(140000),
            annual_cold_rent: dec!(12000),
            term_years: 1,
            rent_increase_rate: Decimal::ZERO,
            annual_maintenance_cost: Decimal::ZERO,
            annual_property_tax: Decimal::ZERO,
            living_surface: dec!(128.24),
            property_appreciation_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn test_single_year_flat_scenario() {
        let result = project(&flat_inputs()).unwrap();
        let row = &result.result[0];

        // No appreciation: equity gain is zero and
        // net worth = -140000 + 0 + 12000 - 2000 - 0 = -130000
        assert_eq!(row.equity_gain, Decimal::ZERO);
        assert_eq!(row.amount_invested, dec!(10000));
        assert_eq!(row.cumulative_interest, dec!(-2000));
        assert_eq!(row.cumulative_rent, dec!(12000));
        assert_eq!(row.net_worth, dec!(-130000));
        assert_eq!(row.property_value, dec!(500000));
    }

    #[test]
    fn test_rent_compounds_from_year_one_base() {
        let mut inputs = flat_inputs();
        inputs.term_years = 3;
        inputs.rent_increase_rate = dec!(0.10);
        inputs.schedule = (1..=3)
            .map(|year| YearlyFigure {
                year,
                interest: dec!(1000),
                ending_balance: dec!(490000),
            })
            .collect();
        let result = project(&inputs).unwrap();
        let rows = &result.result;

        // 12000 + 13200 + 14520
        assert_eq!(rows[0].cumulative_rent, dec!(12000));
        assert_eq!(rows[1].cumulative_rent, dec!(25200));
        assert_eq!(rows[2].cumulative_rent, dec!(39720));
    }

    #[test]
    fn test_equity_gain_compounds_while_nominal_value_grows_linearly() {
        let mut inputs = flat_inputs();
        inputs.term_years = 2;
        inputs.property_appreciation_rate = dec!(0.10);
        inputs.schedule = (1..=2)
            .map(|year| YearlyFigure {
                year,
                interest: dec!(1000),
                ending_balance: dec!(400000),
            })
            .collect();
        let result = project(&inputs).unwrap();
        let rows = &result.result;

        // Equity 100000: year 2 gain is 100000 * (1.1^2 - 1) = 21000
        assert_eq!(rows[1].equity_gain, dec!(21000));
        // Nominal value grows by a flat 50000/year: 600000 after year 2
        assert_eq!(rows[1].property_value, dec!(600000));
    }

    #[test]
    fn test_extra_costs_accumulate() {
        let mut inputs = flat_inputs();
        inputs.term_years = 2;
        inputs.annual_maintenance_cost = dec!(2640);
        inputs.annual_property_tax = dec!(150);
        inputs.schedule = (1..=2)
            .map(|year| YearlyFigure {
                year,
                interest: dec!(1000),
                ending_balance: dec!(490000),
            })
            .collect();
        let result = project(&inputs).unwrap();

        assert_eq!(result.result[0].cumulative_extra_costs, dec!(-2790));
        assert_eq!(result.result[1].cumulative_extra_costs, dec!(-5580));
    }

    #[test]
    fn test_price_per_area() {
        let mut inputs = flat_inputs();
        inputs.living_surface = dec!(100);
        let result = project(&inputs).unwrap();
        assert_eq!(result.result[0].price_per_area, dec!(5000));
    }

    #[test]
    fn test_zero_surface_rejected() {
        let mut inputs = flat_inputs();
        inputs.living_surface = Decimal::ZERO;
        match project(&inputs).unwrap_err() {
            InvestrError::DivisionByZero { .. } => {}
            other => panic!("Expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_short_schedule_rejected() {
        let mut inputs = flat_inputs();
        inputs.term_years = 5;
        match project(&inputs).unwrap_err() {
            InvestrError::InsufficientData(_) => {}
            other => panic!("Expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_appreciation_is_a_decline_scenario() {
        let mut inputs = flat_inputs();
        inputs.property_appreciation_rate = dec!(-0.05);
        let result = project(&inputs).unwrap();
        let row = &result.result[0];

        assert!(row.equity_gain < Decimal::ZERO);
        assert_eq!(row.property_value, dec!(475000));
    }
}
