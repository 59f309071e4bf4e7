mod commands;
mod config;
mod input;
mod output;
mod sources;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::cmhc::{CmhcArgs, MinDownPaymentArgs};
use commands::land_transfer::LandTransferArgs;
use commands::mortgage::MortgagePaymentArgs;
use commands::summary::SummaryArgs;
use commands::{CommandResult, Context};

/// Canadian home-purchase closing costs and mortgage payments
#[derive(Parser)]
#[command(
    name = "homecalc",
    version,
    about = "Canadian home-purchase closing costs and mortgage payments",
    long_about = "Computes Ontario/Toronto land transfer tax, CMHC mortgage insurance \
                  premiums and their provincial sales tax, semi-annually compounded \
                  mortgage payments, and the cash needed at closing, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file overriding the built-in tax and insurance schedules
    #[arg(long, global = true)]
    jurisdiction: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ontario and Toronto land transfer tax, rebates and NRST
    LandTransferTax(LandTransferArgs),
    /// CMHC insurance premium and provincial sales tax
    Cmhc(CmhcArgs),
    /// Statutory minimum down payment for a price
    MinDownPayment(MinDownPaymentArgs),
    /// Monthly payment with semi-annual compounding
    MortgagePayment(MortgagePaymentArgs),
    /// Current 5-year fixed mortgage rate
    MarketRate,
    /// Cash at closing and monthly carrying cost
    Summary(SummaryArgs),
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

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let jurisdiction = cli.jurisdiction.as_deref();

    let result: CommandResult = match cli.command {
        Commands::LandTransferTax(args) => with_context(jurisdiction, |ctx| {
            commands::land_transfer::run_land_transfer_tax(args, ctx)
        }),
        Commands::Cmhc(args) => with_context(jurisdiction, |ctx| commands::cmhc::run_cmhc(args, ctx)),
        Commands::MinDownPayment(args) => with_context(jurisdiction, |ctx| {
            commands::cmhc::run_min_down_payment(args, ctx)
        }),
        Commands::MortgagePayment(args) => with_context(jurisdiction, |ctx| {
            commands::mortgage::run_mortgage_payment(args, ctx)
        }),
        Commands::MarketRate => with_context(jurisdiction, commands::rates::run_market_rate),
        Commands::Summary(args) => with_context(jurisdiction, |ctx| commands::summary::run_summary(args, ctx)),
        Commands::Version => {
            println!("homecalc {}", env!("CARGO_PKG_VERSION"));
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

/// Load settings and schedules, then run `command` against them.
fn with_context(
    jurisdiction: Option<&str>,
    command: impl FnOnce(&Context) -> CommandResult,
) -> CommandResult {
    let ctx = Context {
        settings: config::Settings::from_env(),
        jurisdiction: input::file::read_jurisdiction(jurisdiction)?,
    };
    command(&ctx)
}
