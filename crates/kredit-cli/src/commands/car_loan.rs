use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use kredit_core::products::car_loan::{self, CarLoanInput, MARKET_CAR_LOAN_RATE};

use crate::input;

/// Arguments for the car loan analysis
#[derive(Args)]
pub struct CarLoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Vehicle price in euros
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment (Anzahlung) in euros
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub down_payment: Decimal,

    /// Term in months (24, 36, 48, 60, 72, 84 or 96 are customary)
    #[arg(long, default_value_t = 60)]
    pub term_months: u32,

    /// Annual interest rate in percent; market average when omitted
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Annual Sondertilgung
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub extra: Decimal,
}

pub fn run_car_loan(args: CarLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: CarLoanInput = match input::load(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => CarLoanInput {
            vehicle_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            down_payment: args.down_payment,
            term_months: args.term_months,
            annual_rate: args.rate.unwrap_or(MARKET_CAR_LOAN_RATE),
            annual_extra_payment: args.extra,
        },
    };
    let result = car_loan::analyze_car_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
