use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::InvestrError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::InvestrResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Purchase-side inputs for a property acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionInput {
    pub plot_value: Money,
    pub house_value: Money,
    #[serde(default)]
    pub extra_house_cost: Money,
    pub downpayment: Money,
    /// Agent commission as a fraction of the plot value (0.0357 = 3.57%)
    pub real_estate_rate: Rate,
    /// Property-transfer tax as a fraction of the plot value
    pub property_transfer_tax_rate: Rate,
    /// Notary fee as a fraction of the plot value
    pub notary_rate: Rate,
    pub plot_surface: Decimal,
    pub living_space: Decimal,
}

/// Acquisition cost breakdown and financing requirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquisitionOutput {
    /// plot + house + extra costs
    pub property_value: Money,
    pub real_estate_fee: Money,
    pub transfer_tax_fee: Money,
    pub notary_fee: Money,
    pub total_fees: Money,
    /// property_value + total_fees
    pub total_price: Money,
    /// Loan needed after the downpayment covers part of the total price
    pub loan_required: Money,
    pub loan_to_value: Decimal,
    pub price_per_living_area: Money,
    pub price_per_plot_area: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Break down acquisition costs and derive the loan a purchase requires.
///
/// Fees are charged on the plot value. The loan covers property value plus
/// fees minus the downpayment.
pub fn assess(input: &AcquisitionInput) -> InvestrResult<ComputationOutput<AcquisitionOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let property_value = input.plot_value + input.house_value + input.extra_house_cost;

    let real_estate_fee = input.plot_value * input.real_estate_rate;
    let transfer_tax_fee = input.plot_value * input.property_transfer_tax_rate;
    let notary_fee = input.plot_value * input.notary_rate;
    let total_fees = real_estate_fee + transfer_tax_fee + notary_fee;

    let total_price = property_value + total_fees;
    let loan_required = total_price - input.downpayment;

    let loan_to_value = (property_value - input.downpayment + total_fees) / property_value;

    if loan_to_value > Decimal::ONE {
        warnings.push(format!(
            "Loan-to-value of {loan_to_value:.2} exceeds 1.0; the loan is larger than the property is worth"
        ));
    }
    if loan_required <= Decimal::ZERO {
        warnings.push("Downpayment covers the full purchase; no financing needed".into());
    }

    let output = AcquisitionOutput {
        property_value,
        real_estate_fee,
        transfer_tax_fee,
        notary_fee,
        total_fees,
        total_price,
        loan_required,
        loan_to_value,
        price_per_living_area: property_value / input.living_space,
        price_per_plot_area: property_value / input.plot_surface,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property Acquisition Cost Assessment",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AcquisitionInput) -> InvestrResult<()> {
    if input.plot_value + input.house_value + input.extra_house_cost <= Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "property_value".into(),
            reason: "Combined property value must be positive".into(),
        });
    }

    if input.downpayment < Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "downpayment".into(),
            reason: "Downpayment cannot be negative".into(),
        });
    }

    if input.real_estate_rate < Decimal::ZERO
        || input.property_transfer_tax_rate < Decimal::ZERO
        || input.notary_rate < Decimal::ZERO
    {
        return Err(InvestrError::InvalidInput {
            field: "fee_rates".into(),
            reason: "Fee rates cannot be negative".into(),
        });
    }

    if input.plot_surface <= Decimal::ZERO || input.living_space <= Decimal::ZERO {
        return Err(InvestrError::InvalidInput {
            field: "surfaces".into(),
            reason: "Plot surface and living space must be positive".into(),
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
    use rust_decimal_macros::dec;

    fn sample_input() -> AcquisitionInput {
        AcquisitionInput {
            plot_value: dec!(500000),
            house_value: dec!(611600),
            extra_house_cost: dec!(52600),
            downpayment: dec!(140000),
            real_estate_rate: dec!(0.0357),
            property_transfer_tax_rate: dec!(0.035),
            notary_rate: dec!(0.02),
            plot_surface: dec!(271),
            living_space: dec!(128.24),
        }
    }

    #[test]
    fn test_fee_breakdown() {
        let result = assess(&sample_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.real_estate_fee, dec!(17850));
        assert_eq!(out.transfer_tax_fee, dec!(17500));
        assert_eq!(out.notary_fee, dec!(10000));
        assert_eq!(out.total_fees, dec!(45350));
    }

    #[test]
    fn test_loan_requirement() {
        let result = assess(&sample_input()).unwrap();
        let out = &result.result;

        assert_eq!(out.property_value, dec!(1164200));
        assert_eq!(out.total_price, dec!(1209550));
        // total price minus the downpayment
        assert_eq!(out.loan_required, dec!(1069550));
    }

    #[test]
    fn test_loan_to_value() {
        let result = assess(&sample_input()).unwrap();
        let out = &result.result;

        let expected = (dec!(1164200) - dec!(140000) + dec!(45350)) / dec!(1164200);
        assert_eq!(out.loan_to_value, expected);
        assert!(out.loan_to_value < Decimal::ONE);
    }

    #[test]
    fn test_price_per_area() {
        let mut input = sample_input();
        input.plot_surface = dec!(250);
        input.living_space = dec!(100);
        let result = assess(&input).unwrap();
        let out = &result.result;

        assert_eq!(out.price_per_living_area, dec!(11642));
        assert_eq!(out.price_per_plot_area, dec!(4656.8));
    }

    #[test]
    fn test_full_downpayment_warning() {
        let mut input = sample_input();
        input.downpayment = dec!(1500000);
        let result = assess(&input).unwrap();

        assert!(result.result.loan_required < Decimal::ZERO);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("no financing needed")));
    }

    #[test]
    fn test_zero_surface_rejected() {
        let mut input = sample_input();
        input.living_space = Decimal::ZERO;
        assert!(assess(&input).is_err());
    }

    #[test]
    fn test_zero_property_rejected() {
        let mut input = sample_input();
        input.plot_value = Decimal::ZERO;
        input.house_value = Decimal::ZERO;
        input.extra_house_cost = Decimal::ZERO;
        assert!(assess(&input).is_err());
    }
}
