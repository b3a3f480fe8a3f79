//! Baufinanzierung: purchase price plus Nebenkosten, financed at the German
//! interest-plus-Tilgung instalment, optionally offset by rental income.

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::calculator::mortgage::{loan_needed, monthly_mortgage_rate, mortgage_ancillary_costs, AncillaryCosts};
use crate::calculator::rental::{effective_rent, RentalOffsetOutput};
use crate::calculator::transfer_tax::FederalState;
use crate::schedule::simulator::{compute_schedule, schedule_warnings, ScheduleEntry, DEFAULT_MAX_HORIZON_YEARS};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::{KreditError, KreditResult};

/// Market estimate for a German mortgage rate.
pub const MARKET_MORTGAGE_RATE: Percent = dec!(3.8);
pub const DEFAULT_NOTARY_RATE: Percent = dec!(2.0);
pub const DEFAULT_BROKER_RATE: Percent = dec!(3.57);
pub const DEFAULT_TILGUNG_RATE: Percent = dec!(2.0);

/// Notary and land-registry fees usually fall inside this band.
const CUSTOMARY_NOTARY_RANGE: (Percent, Percent) = (dec!(1.0), dec!(2.5));

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalIncome {
    pub net_rents: Vec<Money>,
    pub recognition_rate: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    pub purchase_price: Money,
    pub own_capital: Money,
    #[serde(default = "default_notary_rate")]
    pub notary_rate: Percent,
    #[serde(default = "default_broker_rate")]
    pub broker_rate: Percent,
    pub federal_state: FederalState,
    pub annual_rate: Percent,
    /// Initial annual repayment in percent of the loan.
    #[serde(default = "default_tilgung_rate")]
    pub tilgung_rate: Percent,
    #[serde(default)]
    pub annual_extra_payment: Money,
    /// Zinsbindung in years; the remaining balance at its end is reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_rate_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental: Option<RentalIncome>,
    #[serde(default = "default_horizon_years")]
    pub max_horizon_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub costs: AncillaryCosts,
    pub transfer_tax_rate: Percent,
    pub total_investment: Money,
    /// Signed; negative when own capital exceeds the investment.
    pub loan_needed: Money,
    /// `loan_needed` floored at zero.
    pub loan_amount: Money,
    pub capital_covers_cost: bool,
    pub monthly_rate: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rental: Option<RentalOffsetOutput>,
    pub months_to_payoff: Option<u32>,
    pub total_interest: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_after_fixed_period: Option<Money>,
    pub negative_amortization: bool,
    pub schedule: Vec<ScheduleEntry>,
}

fn default_notary_rate() -> Percent {
    DEFAULT_NOTARY_RATE
}

fn default_broker_rate() -> Percent {
    DEFAULT_BROKER_RATE
}

fn default_tilgung_rate() -> Percent {
    DEFAULT_TILGUNG_RATE
}

fn default_horizon_years() -> u32 {
    DEFAULT_MAX_HORIZON_YEARS
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Full mortgage picture: Nebenkosten, loan, instalment, rental offset and
/// the amortization schedule at that instalment.
pub fn analyze_mortgage(input: &MortgageInput) -> KreditResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    validate(input)?;

    let mut warnings = Vec::new();
    let (low, high) = CUSTOMARY_NOTARY_RANGE;
    if input.notary_rate < low || input.notary_rate > high {
        warnings.push(format!(
            "Notary rate {}% is outside the customary {}–{}% range",
            input.notary_rate, low, high
        ));
    }

    let transfer_tax_rate = input.federal_state.transfer_tax_rate();
    let costs = mortgage_ancillary_costs(
        input.purchase_price,
        input.notary_rate,
        input.broker_rate,
        transfer_tax_rate,
    )?;
    let total_investment = input.purchase_price + costs.total;
    let needed = loan_needed(total_investment, input.own_capital);
    let capital_covers_cost = needed <= Decimal::ZERO;
    let rate = monthly_mortgage_rate(needed, input.annual_rate, input.tilgung_rate);

    let rental = match &input.rental {
        Some(income) => {
            let effective = effective_rent(&income.net_rents, income.recognition_rate)?;
            let burden = rate - effective;
            Some(RentalOffsetOutput {
                gross_rent: income.net_rents.iter().sum(),
                effective_rent: effective,
                net_monthly_burden: burden,
                is_surplus: burden <= Decimal::ZERO,
            })
        }
        None => None,
    };

    let schedule = compute_schedule(
        needed,
        input.annual_rate,
        rate,
        input.annual_extra_payment,
        input.max_horizon_years,
    )?;

    if capital_covers_cost {
        warnings.push("Own capital covers the whole cost; no loan is needed".to_string());
    } else {
        warnings.extend(schedule_warnings(&schedule));
    }

    let balance_after_fixed_period = input
        .fixed_rate_years
        .and_then(|years| schedule.balance_after(years.saturating_mul(12)));
    if input.fixed_rate_years.is_some() && balance_after_fixed_period.is_none() {
        warnings.push("Fixed-rate period extends past the simulated horizon".to_string());
    }

    debug!(
        "mortgage {} at {}% + {}% Tilgung: rate {}, payoff {:?}",
        needed,
        input.annual_rate,
        input.tilgung_rate,
        rate,
        schedule.months_to_payoff()
    );

    let output = MortgageOutput {
        costs,
        transfer_tax_rate,
        total_investment,
        loan_needed: needed,
        loan_amount: needed.max(Decimal::ZERO),
        capital_covers_cost,
        monthly_rate: rate,
        rental,
        months_to_payoff: schedule.months_to_payoff(),
        total_interest: schedule.total_interest(),
        balance_after_fixed_period,
        negative_amortization: schedule.negative_amortization,
        schedule: schedule.entries,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "German annuity mortgage (interest plus initial Tilgung)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &MortgageInput) -> KreditResult<()> {
    if input.own_capital < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "own_capital".into(),
            reason: "Own capital cannot be negative".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "annual_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.tilgung_rate < Decimal::ZERO {
        return Err(KreditError::InvalidInput {
            field: "tilgung_rate".into(),
            reason: "Tilgung cannot be negative".into(),
        });
    }
    Ok(())
}
