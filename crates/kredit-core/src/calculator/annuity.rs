use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

const MONTHS_PER_YEAR: Decimal = dec!(12);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityInput {
    pub principal: Money,
    /// Annual nominal rate in percent (4.99 = 4.99%).
    pub annual_rate: Percent,
    pub term_months: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityOutput {
    pub monthly_payment: Money,
    /// Payment times term, ignoring any rounding of the final instalment.
    pub total_paid: Money,
    pub total_interest: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment that amortizes `principal` over `term_months`.
///
/// `P * i(1+i)^n / ((1+i)^n - 1)` with `i = annual_rate / 100 / 12`.
/// A non-positive principal means no loan is needed and yields zero; a zero
/// rate degrades to straight-line repayment.
pub fn annuity_payment(
    principal: Money,
    annual_rate: Percent,
    term_months: u32,
) -> KreditResult<Money> {
    if term_months == 0 {
        return Err(KreditError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least one month".into(),
        });
    }
    if annual_rate < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if principal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let n = Decimal::from(term_months);
    if annual_rate.is_zero() {
        return Ok(principal / n);
    }

    let i = monthly_rate(annual_rate);
    let growth = (Decimal::ONE + i)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| KreditError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Compounding over {term_months} months overflows"),
        })?;

    let denom = growth - Decimal::ONE;
    if denom.is_zero() {
        return Err(KreditError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let factor = i
        .checked_mul(growth)
        .and_then(|num| num.checked_div(denom))
        .ok_or_else(|| overflow("annuity factor"))?;
    principal
        .checked_mul(factor)
        .ok_or_else(|| overflow("annuity payment"))
}

pub(crate) fn overflow(context: &str) -> KreditError {
    KreditError::ArithmeticOverflow {
        context: context.into(),
    }
}

/// Convert an annual percentage into the monthly fractional rate.
pub fn monthly_rate(annual_rate: Percent) -> Decimal {
    annual_rate / dec!(100) / MONTHS_PER_YEAR
}

/// Annuity payment together with the nominal totals over the full term.
pub fn calculate_annuity(input: &AnnuityInput) -> KreditResult<ComputationOutput<AnnuityOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let monthly_payment = annuity_payment(input.principal, input.annual_rate, input.term_months)?;
    if input.principal <= Decimal::ZERO {
        warnings.push("Principal is not positive; no loan is needed".to_string());
    }

    let total_paid = monthly_payment
        .checked_mul(Decimal::from(input.term_months))
        .ok_or_else(|| overflow("total paid"))?;
    let total_interest = if input.principal > Decimal::ZERO {
        total_paid - input.principal
    } else {
        Decimal::ZERO
    };

    let output = AnnuityOutput {
        monthly_payment,
        total_paid,
        total_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity payment (fixed rate, monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
