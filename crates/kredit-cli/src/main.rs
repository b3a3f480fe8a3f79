mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

use commands::calculator::{AncillaryCostsArgs, AnnuityArgs, RentalOffsetArgs};
use commands::car_loan::CarLoanArgs;
use commands::mortgage::MortgageArgs;
use commands::schedule::ScheduleArgs;

/// German car loan and mortgage calculations
#[derive(Parser)]
#[command(
    name = "kredit",
    version,
    about = "German car loan and mortgage calculations",
    long_about = "A CLI for car loan (Autokredit) and mortgage (Baufinanzierung) \
                  calculations with decimal precision. Supports annuity payments, \
                  Nebenkosten, rental offsets and amortization schedules with \
                  annual Sondertilgung."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log progress to stderr (-v info, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed monthly annuity payment
    Annuity(AnnuityArgs),
    /// Nebenkosten (notary, broker, Grunderwerbsteuer) of a property purchase
    AncillaryCosts(AncillaryCostsArgs),
    /// Monthly burden after bank-recognised rental income
    RentalOffset(RentalOffsetArgs),
    /// Month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Car loan payment, cost and payoff
    CarLoan(CarLoanArgs),
    /// Mortgage costs, instalment and payoff
    Mortgage(MortgageArgs),
    /// List federal states and their Grunderwerbsteuer
    States,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}: logger setup failed: {}", "warning".yellow().bold(), e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Annuity(args) => commands::calculator::run_annuity(args),
        Commands::AncillaryCosts(args) => commands::calculator::run_ancillary_costs(args),
        Commands::RentalOffset(args) => commands::calculator::run_rental_offset(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::CarLoan(args) => commands::car_loan::run_car_loan(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::States => commands::calculator::run_states(),
        Commands::Version => {
            println!("kredit {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
