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

/// A recurring savings plan: monthly contributions compounding annually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthInput {
    #[serde(default)]
    pub starting_value: Money,
    pub monthly_investment: Money,
    /// Expected annual return (0.07 = 7%)
    pub annual_gain_rate: Rate,
    /// Lump sum added at the end of each year, after the growth is applied
    #[serde(default)]
    pub yearly_extra: Money,
    pub n_years: u32,
}

/// One year of the savings-plan projection. Year 0 is the starting state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthYear {
    pub year: u32,
    pub net_worth: Money,
    pub invested: Money,
    pub gain: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project a savings plan year by year.
///
/// Each year the running value plus that year's contributions grows by the
/// annual rate, then the yearly extra lands on top:
/// `net_worth' = (net_worth + 12 * monthly) * (1 + rate) + yearly_extra`.
pub fn project_growth(input: &GrowthInput) -> InvestrResult<ComputationOutput<Vec<GrowthYear>>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let annual_investment = input.monthly_investment * dec!(12);
    let factor = Decimal::ONE + input.annual_gain_rate;

    let mut rows: Vec<GrowthYear> = Vec::with_capacity(input.n_years as usize + 1);
    let mut net_worth = input.starting_value;
    let mut invested = input.starting_value;

    rows.push(GrowthYear {
        year: 0,
        net_worth,
        invested,
        gain: Decimal::ZERO,
    });

    for year in 1..=input.n_years {
        net_worth = (net_worth + annual_investment) * factor + input.yearly_extra;
        invested += annual_investment + input.yearly_extra;

        rows.push(GrowthYear {
            year,
            net_worth,
            invested,
            gain: net_worth - invested,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Recurring Savings Growth Projection",
        input,
        warnings,
        elapsed,
        rows,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &GrowthInput) -> InvestrResult<()> {
    if input.n_years == 0 {
        return Err(InvestrError::InvalidInput {
            field: "n_years".into(),
            reason: "Projection horizon must be at least 1 year".into(),
        });
    }

    if input.starting_value < Decimal::ZERO
        || input.monthly_investment < Decimal::ZERO
        || input.yearly_extra < Decimal::ZERO
    {
        return Err(InvestrError::InvalidInput {
            field: "contributions".into(),
            reason: "Starting value and contributions cannot be negative".into(),
        });
    }

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

    fn sample_input() -> GrowthInput {
        GrowthInput {
            starting_value: dec!(10000),
            monthly_investment: dec!(500),
            annual_gain_rate: dec!(0.07),
            yearly_extra: Decimal::ZERO,
            n_years: 2,
        }
    }

    #[test]
    fn test_year_zero_carries_starting_state() {
        let result = project_growth(&sample_input()).unwrap();
        let rows = &result.result;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, 0);
        assert_eq!(rows[0].net_worth, dec!(10000));
        assert_eq!(rows[0].invested, dec!(10000));
        assert_eq!(rows[0].gain, Decimal::ZERO);
    }

    #[test]
    fn test_growth_recurrence() {
        let result = project_growth(&sample_input()).unwrap();
        let rows = &result.result;

        // (10000 + 6000) * 1.07 = 17120
        assert_eq!(rows[1].net_worth, dec!(17120));
        assert_eq!(rows[1].invested, dec!(16000));
        assert_eq!(rows[1].gain, dec!(1120));

        // (17120 + 6000) * 1.07 = 24738.40
        assert_eq!(rows[2].net_worth, dec!(24738.40));
        assert_eq!(rows[2].invested, dec!(22000));
    }

    #[test]
    fn test_yearly_extra_lands_after_growth() {
        let mut input = sample_input();
        input.n_years = 1;
        input.yearly_extra = dec!(1000);
        let result = project_growth(&input).unwrap();
        let row = &result.result[1];

        // The extra is not multiplied by the growth factor
        assert_eq!(row.net_worth, dec!(18120));
        assert_eq!(row.invested, dec!(17000));
    }

    #[test]
    fn test_zero_rate_accumulates_contributions_only() {
        let mut input = sample_input();
        input.annual_gain_rate = Decimal::ZERO;
        let result = project_growth(&input).unwrap();
        let last = result.result.last().unwrap();

        assert_eq!(last.net_worth, last.invested);
        assert_eq!(last.gain, Decimal::ZERO);
    }

    #[test]
    fn test_zero_years_rejected() {
        let mut input = sample_input();
        input.n_years = 0;
        assert!(project_growth(&input).is_err());
    }

    #[test]
    fn test_negative_contribution_rejected() {
        let mut input = sample_input();
        input.monthly_investment = dec!(-1);
        assert!(project_growth(&input).is_err());
    }
}
