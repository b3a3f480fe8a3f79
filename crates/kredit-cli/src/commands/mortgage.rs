use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use kredit_core::calculator::FederalState;
use kredit_core::products::mortgage::{
    self, MortgageInput, RentalIncome, DEFAULT_BROKER_RATE, DEFAULT_NOTARY_RATE,
    DEFAULT_TILGUNG_RATE, MARKET_MORTGAGE_RATE,
};
use kredit_core::schedule::simulator::DEFAULT_MAX_HORIZON_YEARS;

use crate::input;

/// Arguments for the mortgage analysis
#[derive(Args)]
pub struct MortgageArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price in euros
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Own capital (Eigenkapital) in euros
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub own_capital: Decimal,

    /// Notary and land registry, percent of price
    #[arg(long, default_value_t = DEFAULT_NOTARY_RATE)]
    pub notary_rate: Decimal,

    /// Broker fee, percent of price
    #[arg(long, default_value_t = DEFAULT_BROKER_RATE)]
    pub broker_rate: Decimal,

    /// Federal state determining the Grunderwerbsteuer
    #[arg(long)]
    pub state: Option<FederalState>,

    /// Annual interest rate in percent; market estimate when omitted
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Initial Tilgung in percent per year
    #[arg(long, default_value_t = DEFAULT_TILGUNG_RATE)]
    pub tilgung: Decimal,

    /// Annual Sondertilgung
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub extra: Decimal,

    /// Zinsbindung in years; reports the balance left at its end
    #[arg(long)]
    pub fixed_years: Option<u32>,

    /// Net monthly rent of one unit; repeat for several units
    #[arg(long = "rent")]
    pub rents: Vec<Decimal>,

    /// Share of the rent recognised by the bank, percent
    #[arg(long, default_value_t = Decimal::ONE_HUNDRED)]
    pub recognition: Decimal,

    /// Maximum simulated years
    #[arg(long, default_value_t = DEFAULT_MAX_HORIZON_YEARS)]
    pub horizon_years: u32,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => {
            let rental = (!args.rents.is_empty()).then(|| RentalIncome {
                net_rents: args.rents,
                recognition_rate: args.recognition,
            });
            MortgageInput {
                purchase_price: args
                    .price
                    .ok_or("--price is required (or provide --input)")?,
                own_capital: args.own_capital,
                notary_rate: args.notary_rate,
                broker_rate: args.broker_rate,
                federal_state: args
                    .state
                    .ok_or("--state is required (or provide --input)")?,
                annual_rate: args.rate.unwrap_or(MARKET_MORTGAGE_RATE),
                tilgung_rate: args.tilgung,
                annual_extra_payment: args.extra,
                fixed_rate_years: args.fixed_years,
                rental,
                max_horizon_years: args.horizon_years,
            }
        }
    };
    let result = mortgage::analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}
