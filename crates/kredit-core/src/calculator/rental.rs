use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalOffsetInput {
    /// Scheduled monthly instalment to offset.
    pub monthly_payment: Money,
    /// Net cold rent per unit, per month.
    pub net_rents: Vec<Money>,
    /// Share of the rent the bank recognises, 0 to 100.
    pub recognition_rate: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalOffsetOutput {
    pub gross_rent: Money,
    pub effective_rent: Money,
    /// Positive: out-of-pocket cost. Zero or negative: monthly surplus.
    pub net_monthly_burden: Money,
    pub is_surplus: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Rent the bank recognises: `sum(rents) * recognition / 100`.
pub fn effective_rent(net_rents: &[Money], recognition_rate: Percent) -> KreditResult<Money> {
    if recognition_rate < Decimal::ZERO || recognition_rate > dec!(100) {
        return Err(KreditError::InvalidInput {
            field: "recognition_rate".into(),
            reason: "Recognition rate must be between 0 and 100".into(),
        });
    }
    if net_rents.iter().any(|rent| *rent < Decimal::ZERO) {
        return Err(KreditError::InvalidInput {
            field: "net_rents".into(),
            reason: "Rents cannot be negative".into(),
        });
    }

    let gross: Money = net_rents.iter().sum();
    Ok(gross * recognition_rate / dec!(100))
}

/// Instalment minus recognised rent. The sign is kept.
pub fn net_monthly_burden(
    monthly_payment: Money,
    net_rents: &[Money],
    recognition_rate: Percent,
) -> KreditResult<Money> {
    Ok(monthly_payment - effective_rent(net_rents, recognition_rate)?)
}

pub fn calculate_rental_offset(
    input: &RentalOffsetInput,
) -> KreditResult<ComputationOutput<RentalOffsetOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if input.net_rents.is_empty() {
        warnings.push("No rents given; burden equals the full instalment".to_string());
    }

    let effective = effective_rent(&input.net_rents, input.recognition_rate)?;
    let burden = input.monthly_payment - effective;

    let output = RentalOffsetOutput {
        gross_rent: input.net_rents.iter().sum(),
        effective_rent: effective,
        net_monthly_burden: burden,
        is_surplus: burden <= Decimal::ZERO,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Instalment less bank-recognised rental income",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_effective_rent_sums_units() {
        let rent = effective_rent(&[dec!(800), dec!(650)], dec!(80)).unwrap();
        assert_eq!(rent, dec!(1160));
    }

    #[test]
    fn test_burden_keeps_sign() {
        let burden = net_monthly_burden(dec!(1450), &[dec!(900)], dec!(100)).unwrap();
        assert_eq!(burden, dec!(550));

        let surplus = net_monthly_burden(dec!(1000), &[dec!(700), dec!(700)], dec!(90)).unwrap();
        assert_eq!(surplus, dec!(-260));
    }

    #[test]
    fn test_recognition_out_of_range() {
        assert!(effective_rent(&[dec!(500)], dec!(101)).is_err());
        assert!(effective_rent(&[dec!(500)], dec!(-1)).is_err());
    }

    #[test]
    fn test_negative_rent_rejected() {
        let err = effective_rent(&[dec!(500), dec!(-10)], dec!(50)).unwrap_err();
        assert!(matches!(err, KreditError::InvalidInput { ref field, .. } if field == "net_rents"));
    }

    #[test]
    fn test_calculate_rental_offset_surplus() {
        let input = RentalOffsetInput {
            monthly_payment: dec!(900),
            net_rents: vec![dec!(1000)],
            recognition_rate: dec!(90),
        };
        let out = calculate_rental_offset(&input).unwrap();
        assert_eq!(out.result.gross_rent, dec!(1000));
        assert_eq!(out.result.net_monthly_burden, dec!(0));
        assert!(out.result.is_surplus);
    }

    #[test]
    fn test_calculate_rental_offset_no_rents() {
        let input = RentalOffsetInput {
            monthly_payment: dec!(1200),
            net_rents: vec![],
            recognition_rate: dec!(75),
        };
        let out = calculate_rental_offset(&input).unwrap();
        assert_eq!(out.result.net_monthly_burden, dec!(1200));
        assert!(!out.result.is_surplus);
        assert_eq!(out.warnings.len(), 1);
    }
}
