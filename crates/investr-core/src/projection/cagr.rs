use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::InvestrError;
use crate::types::{Money, Rate};
use crate::InvestrResult;

/// Compound annual growth rate: `(end / start)^(1/n) - 1`.
pub fn cagr(starting_value: Money, ending_value: Money, n_years: u32) -> InvestrResult<Rate> {
    if starting_value <= Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "starting_value".into(),
            reason: "Starting value must be positive".into(),
        });
    }
    if ending_value <= Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "ending_value".into(),
            reason: "Ending value must be positive".into(),
        });
    }
    if n_years == 0 {
        return Err(InvestrError::InvalidInput {
            field: "n_years".into(),
            reason: "Growth period must be at least 1 year".into(),
        });
    }

    let ratio = ending_value / starting_value;
    let exponent = Decimal::ONE / Decimal::from(n_years);
    Ok(ratio.powd(exponent) - Decimal::ONE)
}
