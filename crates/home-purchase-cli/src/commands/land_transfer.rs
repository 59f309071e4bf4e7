use clap::Args;
use rust_decimal::Decimal;

use home_purchase_core::tax::land_transfer::{self, LandTransferTaxInput};
use home_purchase_core::types::{DwellingType, PropertyType};

use super::{document_input, CommandResult, Context};

/// Arguments for Ontario land transfer tax
#[derive(Args)]
pub struct LandTransferArgs {
    /// Purchase price in CAD
    #[arg(long, alias = "purchase-price")]
    pub price: Option<Decimal>,

    /// Property is outside the City of Toronto (no municipal tax)
    #[arg(long)]
    pub outside_toronto: bool,

    /// Apply first-time buyer rebates
    #[arg(long)]
    pub first_time_buyer: bool,

    /// Apply the Non-Resident Speculation Tax
    #[arg(long)]
    pub non_resident: bool,

    /// Detached, semi-detached, townhouse or condominium
    #[arg(long)]
    pub property_type: Option<PropertyType>,

    /// Single family, duplex, triplex, fourplex or multiplex
    #[arg(long)]
    pub dwelling_type: Option<DwellingType>,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_land_transfer_tax(args: LandTransferArgs, ctx: &Context) -> CommandResult {
    let input: LandTransferTaxInput = match document_input(args.input.as_deref())? {
        Some(input) => input,
        None => LandTransferTaxInput {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            is_toronto_property: !args.outside_toronto,
            first_time_buyer: args.first_time_buyer,
            is_non_resident: args.non_resident,
            property_type: args.property_type.unwrap_or_default(),
            dwelling_type: args.dwelling_type,
        },
    };

    let result = land_transfer::calculate_land_transfer_tax_with(&input, &ctx.jurisdiction.land_transfer)?;
    Ok(serde_json::to_value(result)?)
}
