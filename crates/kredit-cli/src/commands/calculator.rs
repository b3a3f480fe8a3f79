use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use kredit_core::calculator::annuity::{self, AnnuityInput};
use kredit_core::calculator::mortgage::{self, AncillaryCostsInput};
use kredit_core::calculator::rental::{self, RentalOffsetInput};
use kredit_core::calculator::FederalState;
use kredit_core::products::mortgage::{DEFAULT_BROKER_RATE, DEFAULT_NOTARY_RATE};

use crate::input;

/// Arguments for the annuity payment
#[derive(Args)]
pub struct AnnuityArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal in euros
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 4.99)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,
}

/// Arguments for the Nebenkosten breakdown
#[derive(Args)]
pub struct AncillaryCostsArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Purchase price in euros
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Notary and land registry, percent of price
    #[arg(long)]
    pub notary_rate: Option<Decimal>,

    /// Broker fee (Maklerprovision), percent of price
    #[arg(long)]
    pub broker_rate: Option<Decimal>,

    /// Federal state determining the Grunderwerbsteuer (see `kredit states`)
    #[arg(long)]
    pub state: Option<FederalState>,

    /// Own capital (Eigenkapital); adds the loan needed to the output
    #[arg(long)]
    pub own_capital: Option<Decimal>,
}

/// Arguments for the rental offset
#[derive(Args)]
pub struct RentalOffsetArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly instalment in euros
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Net monthly rent of one unit; repeat for several units
    #[arg(long = "rent")]
    pub rents: Vec<Decimal>,

    /// Share of the rent recognised by the bank, percent
    #[arg(long)]
    pub recognition: Option<Decimal>,
}

pub fn run_annuity(args: AnnuityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let annuity_input: AnnuityInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AnnuityInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
        },
    };
    let result = annuity::calculate_annuity(&annuity_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_ancillary_costs(args: AncillaryCostsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let costs_input: AncillaryCostsInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => AncillaryCostsInput {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            notary_rate: args.notary_rate.unwrap_or(DEFAULT_NOTARY_RATE),
            broker_rate: args.broker_rate.unwrap_or(DEFAULT_BROKER_RATE),
            federal_state: args
                .state
                .ok_or("--state is required (or provide --input)")?,
            own_capital: args.own_capital,
        },
    };
    let result = mortgage::calculate_ancillary_costs(&costs_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_rental_offset(args: RentalOffsetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let offset_input: RentalOffsetInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => RentalOffsetInput {
            monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            net_rents: args.rents,
            recognition_rate: args
                .recognition
                .ok_or("--recognition is required (or provide --input)")?,
        },
    };
    let result = rental::calculate_rental_offset(&offset_input)?;
    Ok(serde_json::to_value(result)?)
}

/// List every federal state with its Grunderwerbsteuer.
pub fn run_states() -> Result<Value, Box<dyn std::error::Error>> {
    let states: Vec<Value> = FederalState::ALL
        .iter()
        .map(|state| {
            json!({
                "key": state.key(),
                "state": state.name(),
                "transfer_tax_rate": state.transfer_tax_rate(),
            })
        })
        .collect();
    Ok(Value::Array(states))
}
