use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;

use home_purchase_core::summary::purchase::{self, PurchaseInputs};
use home_purchase_core::types::{CmhcHandling, DwellingType, PropertyType, Province};

use super::rates::current_rate;
use super::{document_input, CommandResult, Context};
use crate::sources;

/// Arguments for the full closing-cost and carrying-cost summary
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SummaryArgs {
    /// Purchase price in CAD
    #[arg(long, alias = "purchase-price")]
    pub price: Option<Decimal>,

    /// Total down payment in CAD
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Deposit already paid on signing
    #[arg(long, default_value = "0")]
    pub deposit: Decimal,

    /// Nominal annual rate in percent; defaults to the current market rate
    #[arg(long, alias = "apr-percent")]
    pub apr: Option<Decimal>,

    /// Amortization period in years
    #[arg(long, alias = "amortization-years", default_value = "25")]
    pub years: Decimal,

    /// Province code or name
    #[arg(long, default_value = "ON")]
    pub province: Province,

    /// Property is outside the City of Toronto
    #[arg(long)]
    pub outside_toronto: bool,

    #[arg(long)]
    pub first_time_buyer: bool,

    #[arg(long)]
    pub non_resident: bool,

    #[arg(long)]
    pub property_type: Option<PropertyType>,

    #[arg(long)]
    pub dwelling_type: Option<DwellingType>,

    /// finance (add to the mortgage) or upfront (pay at closing)
    #[arg(long, default_value = "finance")]
    pub cmhc_handling: CmhcHandling,

    #[arg(long, default_value = "0")]
    pub maintenance: Decimal,

    #[arg(long, default_value = "0")]
    pub utilities: Decimal,

    /// Monthly rental adjustment; negative for rental income
    #[arg(long, default_value = "0")]
    pub rental: Decimal,

    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    #[arg(long, default_value = "0")]
    pub inspection_fee: Decimal,

    #[arg(long, default_value = "0")]
    pub legal_fees: Decimal,

    #[arg(long, default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Closing date (YYYY-MM-DD)
    #[arg(long)]
    pub closing_date: Option<NaiveDate>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_summary(args: SummaryArgs, ctx: &Context) -> CommandResult {
    let mut rate_warning = None;
    let mut inputs: PurchaseInputs = match document_input(args.input.as_deref())? {
        Some(inputs) => inputs,
        None => {
            let apr_percent = match args.apr {
                Some(apr) => apr,
                None => {
                    let resolution = current_rate(ctx);
                    rate_warning = resolution.warning;
                    resolution.rate.apr_percent
                }
            };
            PurchaseInputs {
                purchase_price: args
                    .price
                    .ok_or("--price is required (or provide --input)")?,
                down_payment: args
                    .down_payment
                    .ok_or("--down-payment is required (or provide --input)")?,
                deposit: args.deposit,
                apr_percent,
                amortization_years: args.years,
                province: args.province,
                is_toronto_property: !args.outside_toronto,
                first_time_buyer: args.first_time_buyer,
                is_non_resident: args.non_resident,
                property_type: args.property_type.unwrap_or_default(),
                dwelling_type: args.dwelling_type,
                cmhc_handling: args.cmhc_handling,
                monthly_maintenance: args.maintenance,
                monthly_utilities: args.utilities,
                monthly_rental: args.rental,
                monthly_insurance: args.insurance,
                inspection_fee: args.inspection_fee,
                legal_fees: args.legal_fees,
                annual_property_tax: args.annual_property_tax,
                closing_date: args.closing_date,
                as_of: None,
            }
        }
    };
    if inputs.closing_date.is_some() && inputs.as_of.is_none() {
        inputs.as_of = Some(chrono::Local::now().date_naive());
    }

    let service = sources::tax_service(&ctx.settings, &ctx.jurisdiction)?;
    let mut result = purchase::calculate_purchase_summary_with(&inputs, &ctx.jurisdiction, service.as_ref());
    result.warnings.extend(rate_warning);
    Ok(serde_json::to_value(result)?)
}
