//! Car loan (Autokredit): annuity over a fixed term with optional
//! Sondertilgung.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::annuity::annuity_payment;
use crate::schedule::simulator::{compute_schedule_months, schedule_warnings, ScheduleEntry};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

/// Average effective rate for German car loans.
pub const MARKET_CAR_LOAN_RATE: Percent = dec!(4.99);

/// Terms offered by German car lenders, in months.
pub const STANDARD_CAR_TERMS: [u32; 7] = [24, 36, 48, 60, 72, 84, 96];

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarLoanInput {
    pub vehicle_price: Money,
    pub down_payment: Money,
    pub term_months: u32,
    pub annual_rate: Percent,
    #[serde(default)]
    pub annual_extra_payment: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarLoanOutput {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    /// Payment times the nominal term.
    pub total_paid: Money,
    /// Interest over the nominal term without Sondertilgung.
    pub total_interest: Money,
    /// Interest actually accrued in the simulated schedule.
    pub scheduled_interest: Money,
    pub months_to_payoff: Option<u32>,
    pub months_saved: Option<i64>,
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_car_loan(input: &CarLoanInput) -> KreditResult<ComputationOutput<CarLoanOutput>> {
    let start = Instant::now();
    validate(input)?;

    let mut warnings = Vec::new();
    if !STANDARD_CAR_TERMS.contains(&input.term_months) {
        warnings.push(format!(
            "Term of {} months is not a standard car loan term",
            input.term_months
        ));
    }

    let loan_amount = input.vehicle_price - input.down_payment;
    let monthly_payment = annuity_payment(loan_amount, input.annual_rate, input.term_months)?;

    let (total_paid, total_interest) = if loan_amount > Decimal::ZERO {
        let paid = monthly_payment
            .checked_mul(Decimal::from(input.term_months))
            .ok_or_else(|| KreditError::ArithmeticOverflow {
                context: "total paid".into(),
            })?;
        (paid, paid - loan_amount)
    } else {
        warnings.push("Down payment covers the vehicle price; no loan is needed".to_string());
        (Decimal::ZERO, Decimal::ZERO)
    };

    // One year of slack past the nominal term.
    let schedule = compute_schedule_months(
        loan_amount,
        input.annual_rate,
        monthly_payment,
        input.annual_extra_payment,
        input.term_months.saturating_add(12),
    )?;
    if loan_amount > Decimal::ZERO {
        warnings.extend(schedule_warnings(&schedule));
    }
    debug!(
        "car loan {} over {} months: payment {}, payoff {:?}",
        loan_amount,
        input.term_months,
        monthly_payment,
        schedule.months_to_payoff()
    );

    let output = CarLoanOutput {
        loan_amount,
        monthly_payment,
        total_paid,
        total_interest,
        scheduled_interest: schedule.total_interest(),
        months_to_payoff: schedule.months_to_payoff(),
        months_saved: schedule.months_saved(input.term_months),
        schedule: schedule.entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Car loan annuity with annual Sondertilgung",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &CarLoanInput) -> KreditResult<()> {
    if input.vehicle_price < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "vehicle_price".into(),
            reason: "Vehicle price cannot be negative".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_input() -> CarLoanInput {
        CarLoanInput {
            vehicle_price: dec!(30000),
            down_payment: dec!(5000),
            term_months: 60,
            annual_rate: MARKET_CAR_LOAN_RATE,
            annual_extra_payment: Decimal::ZERO,
        }
    }

    #[test]
    fn test_standard_car_loan() {
        let out = analyze_car_loan(&standard_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.loan_amount, dec!(25000));
        assert!((r.monthly_payment - dec!(471.67)).abs() < dec!(0.01));
        assert!((r.total_interest - dec!(3299.98)).abs() < dec!(1));
        assert_eq!(r.months_to_payoff, Some(60));
        assert_eq!(r.months_saved, Some(0));
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_sondertilgung_shortens_term() {
        let mut input = standard_input();
        input.annual_extra_payment = dec!(2000);
        let out = analyze_car_loan(&input).unwrap();
        let r = &out.result;
        assert!(r.months_saved.unwrap() > 0);
        assert!(r.scheduled_interest < r.total_interest);
    }

    #[test]
    fn test_down_payment_covers_price() {
        let mut input = standard_input();
        input.down_payment = dec!(35000);
        let out = analyze_car_loan(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.loan_amount, dec!(-5000));
        assert_eq!(r.monthly_payment, Decimal::ZERO);
        assert!(r.schedule.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_non_standard_term_warns() {
        let mut input = standard_input();
        input.term_months = 30;
        let out = analyze_car_loan(&input).unwrap();
        assert_eq!(out.result.months_to_payoff, Some(30));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_zero_rate_car_loan() {
        let mut input = standard_input();
        input.vehicle_price = dec!(12000);
        input.down_payment = dec!(0);
        input.term_months = 24;
        input.annual_rate = dec!(0);
        let out = analyze_car_loan(&input).unwrap();
        assert_eq!(out.result.monthly_payment, dec!(500));
        assert_eq!(out.result.total_interest, dec!(0));
        assert_eq!(out.result.months_to_payoff, Some(24));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut input = standard_input();
        input.vehicle_price = dec!(-1);
        assert!(analyze_car_loan(&input).is_err());
    }
}
