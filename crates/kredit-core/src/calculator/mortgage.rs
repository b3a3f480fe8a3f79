use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::transfer_tax::{FederalState, TRANSFER_TAX_RATES};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Nebenkosten of a property purchase, each in euros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncillaryCosts {
    /// Notary and land registry.
    pub notary_cost: Money,
    pub broker_cost: Money,
    /// Grunderwerbsteuer.
    pub tax_cost: Money,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncillaryCostsInput {
    pub purchase_price: Money,
    pub notary_rate: Percent,
    pub broker_rate: Percent,
    pub federal_state: FederalState,
    /// When present, also derive total investment and loan needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_capital: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncillaryCostsOutput {
    pub costs: AncillaryCosts,
    pub transfer_tax_rate: Percent,
    /// Sum of all ancillary rates, in percent of the price.
    pub total_rate: Percent,
    pub total_investment: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_needed: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Notary, broker and transfer-tax costs as percentages of the price.
///
/// The transfer-tax rate must be one of the rates actually levied by a
/// federal state.
pub fn mortgage_ancillary_costs(
    price: Money,
    notary_rate: Percent,
    broker_rate: Percent,
    transfer_tax_rate: Percent,
) -> KreditResult<AncillaryCosts> {
    if price < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "purchase_price".into(),
            reason: "Purchase price cannot be negative".into(),
        });
    }
    for (field, rate) in [("notary_rate", notary_rate), ("broker_rate", broker_rate)] {
        if rate < Decimal::ZERO {
            return Err(KreditError::InvalidInput {
                field: field.into(),
                reason: "Rate cannot be negative".into(),
            });
        }
    }
    if !TRANSFER_TAX_RATES.contains(&transfer_tax_rate) {
        return Err(KreditError::InvalidInput {
            field: "transfer_tax_rate".into(),
            reason: format!("{transfer_tax_rate}% is not a Grunderwerbsteuer rate of any federal state"),
        });
    }

    let notary_cost = price * notary_rate / dec!(100);
    let broker_cost = price * broker_rate / dec!(100);
    let tax_cost = price * transfer_tax_rate / dec!(100);

    Ok(AncillaryCosts {
        notary_cost,
        broker_cost,
        tax_cost,
        total: notary_cost + broker_cost + tax_cost,
    })
}

/// Signed financing gap. Negative means own capital exceeds the investment.
pub fn loan_needed(total_investment: Money, own_capital: Money) -> Money {
    total_investment - own_capital
}

/// German market convention: the first year's instalment is set by
/// interest plus initial Tilgung, `loan * (interest + tilgung) / 100 / 12`.
pub fn monthly_mortgage_rate(loan_needed: Money, interest: Percent, tilgung: Percent) -> Money {
    if loan_needed <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    loan_needed * (interest + tilgung) / dec!(100) / dec!(12)
}

pub fn calculate_ancillary_costs(
    input: &AncillaryCostsInput,
) -> KreditResult<ComputationOutput<AncillaryCostsOutput>> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let transfer_tax_rate = input.federal_state.transfer_tax_rate();
    let costs = mortgage_ancillary_costs(
        input.purchase_price,
        input.notary_rate,
        input.broker_rate,
        transfer_tax_rate,
    )?;
    let total_investment = input.purchase_price + costs.total;
    let needed = input.own_capital.map(|capital| loan_needed(total_investment, capital));

    if matches!(needed, Some(n) if n <= Decimal::ZERO) {
        warnings.push("Own capital covers the whole investment".to_string());
    }

    let output = AncillaryCostsOutput {
        total_rate: input.notary_rate + input.broker_rate + transfer_tax_rate,
        transfer_tax_rate,
        costs,
        total_investment,
        loan_needed: needed,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Nebenkosten as percentages of the purchase price",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ancillary_costs_reference() {
        let costs = mortgage_ancillary_costs(dec!(450000), dec!(2.0), dec!(3.57), dec!(6.5)).unwrap();
        assert_eq!(costs.notary_cost, dec!(9000));
        assert_eq!(costs.broker_cost, dec!(16065));
        assert_eq!(costs.tax_cost, dec!(29250));
        assert_eq!(costs.total, dec!(54315.00));
    }

    #[test]
    fn test_unknown_tax_rate_rejected() {
        let err = mortgage_ancillary_costs(dec!(300000), dec!(2), dec!(3.57), dec!(4.2)).unwrap_err();
        assert!(matches!(err, KreditError::InvalidInput { ref field, .. } if field == "transfer_tax_rate"));
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(mortgage_ancillary_costs(dec!(-1), dec!(2), dec!(0), dec!(5.0)).is_err());
    }

    #[test]
    fn test_loan_needed_keeps_sign() {
        assert_eq!(loan_needed(dec!(448280), dec!(80000)), dec!(368280));
        assert_eq!(loan_needed(dec!(100000), dec!(120000)), dec!(-20000));
    }

    #[test]
    fn test_monthly_mortgage_rate() {
        // 300k at 3.8% interest + 2% Tilgung = 5.8% p.a.
        let rate = monthly_mortgage_rate(dec!(300000), dec!(3.8), dec!(2.0));
        assert_eq!(rate, dec!(1450));
    }

    #[test]
    fn test_monthly_mortgage_rate_no_loan() {
        assert_eq!(monthly_mortgage_rate(dec!(0), dec!(3.8), dec!(2)), Decimal::ZERO);
        assert_eq!(monthly_mortgage_rate(dec!(-5000), dec!(3.8), dec!(2)), Decimal::ZERO);
    }

    #[test]
    fn test_calculate_ancillary_costs_by_state() {
        let input = AncillaryCostsInput {
            purchase_price: dec!(400000),
            notary_rate: dec!(2.0),
            broker_rate: dec!(3.57),
            federal_state: FederalState::Berlin,
            own_capital: Some(dec!(80000)),
        };
        let out = calculate_ancillary_costs(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.transfer_tax_rate, dec!(6.0));
        assert_eq!(r.total_rate, dec!(11.57));
        assert_eq!(r.costs.total, dec!(46280));
        assert_eq!(r.total_investment, dec!(446280));
        assert_eq!(r.loan_needed, Some(dec!(366280)));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_calculate_ancillary_costs_capital_covers() {
        let input = AncillaryCostsInput {
            purchase_price: dec!(100000),
            notary_rate: dec!(1.5),
            broker_rate: dec!(0),
            federal_state: FederalState::Bayern,
            own_capital: Some(dec!(200000)),
        };
        let out = calculate_ancillary_costs(&input).unwrap();
        assert_eq!(out.result.loan_needed, Some(dec!(-95000)));
        assert_eq!(out.warnings.len(), 1);
    }
}
