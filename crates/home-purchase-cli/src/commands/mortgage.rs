use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use home_purchase_core::mortgage::payment::{self, MortgagePaymentInput};

use super::rates::current_rate;
use super::{document_input, CommandResult, Context};

/// Arguments for a semi-annually compounded mortgage payment
#[derive(Args)]
pub struct MortgagePaymentArgs {
    /// Mortgage principal in CAD
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent; defaults to the current market rate
    #[arg(long, alias = "apr-percent")]
    pub apr: Option<Decimal>,

    /// Amortization period in years
    #[arg(long, alias = "amortization-years")]
    pub years: Option<Decimal>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage_payment(args: MortgagePaymentArgs, ctx: &Context) -> CommandResult {
    let mut rate_warning = None;
    let input: MortgagePaymentInput = match document_input(args.input.as_deref())? {
        Some(input) => input,
        None => {
            let apr_percent = match args.apr {
                Some(apr) => apr,
                None => {
                    let resolution = current_rate(ctx);
                    rate_warning = resolution.warning;
                    resolution.rate.apr_percent
                }
            };
            MortgagePaymentInput {
                principal: args
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                apr_percent,
                amortization_years: args.years.unwrap_or(dec!(25)),
            }
        }
    };

    let mut result = payment::calculate_mortgage_payment(&input)?;
    result.warnings.extend(rate_warning);
    Ok(serde_json::to_value(result)?)
}
