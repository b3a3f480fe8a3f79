use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use kredit_core::schedule::simulator::{self, ScheduleInput, DEFAULT_MAX_HORIZON_YEARS};

use crate::input;

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Starting balance in euros
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Fixed monthly payment in euros
    #[arg(long)]
    pub payment: Option<Decimal>,

    /// Annual Sondertilgung, applied every twelfth month
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub extra: Decimal,

    /// Maximum simulated years
    #[arg(long, default_value_t = DEFAULT_MAX_HORIZON_YEARS)]
    pub horizon_years: u32,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .rate
                .ok_or("--rate is required (or provide --input)")?,
            monthly_payment: args
                .payment
                .ok_or("--payment is required (or provide --input)")?,
            annual_extra_payment: args.extra,
            max_horizon_years: args.horizon_years,
        },
    };
    let result = simulator::simulate_schedule(&schedule_input)?;
    Ok(serde_json::to_value(result)?)
}
