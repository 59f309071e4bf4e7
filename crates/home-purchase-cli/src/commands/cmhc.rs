use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;

use home_purchase_core::insurance::cmhc::{self, CmhcInput};
use home_purchase_core::types::{round_cents, round_to, Province};

use super::{document_input, CommandResult, Context};

/// Arguments for the CMHC premium and its provincial sales tax
#[derive(Args)]
pub struct CmhcArgs {
    /// Purchase price in CAD
    #[arg(long, alias = "purchase-price")]
    pub price: Option<Decimal>,

    /// Down payment in CAD
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Province code or name (ON, QC, SK; anything else has no PST)
    #[arg(long, default_value = "ON")]
    pub province: Province,

    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the statutory minimum down payment
#[derive(Args)]
pub struct MinDownPaymentArgs {
    /// Purchase price in CAD
    #[arg(long, alias = "purchase-price")]
    pub price: Decimal,
}

pub fn run_cmhc(args: CmhcArgs, ctx: &Context) -> CommandResult {
    let input: CmhcInput = match document_input(args.input.as_deref())? {
        Some(input) => input,
        None => CmhcInput {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            province: args.province,
        },
    };

    let result = cmhc::calculate_cmhc_premium_with(&input, &ctx.jurisdiction.cmhc)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_min_down_payment(args: MinDownPaymentArgs, ctx: &Context) -> CommandResult {
    if args.price <= Decimal::ZERO {
        return Err("--price must be greater than 0".into());
    }

    let schedule = &ctx.jurisdiction.cmhc;
    let minimum = schedule.min_down_payment(args.price);
    let mut warnings = Vec::new();
    if args.price > schedule.max_insured_price {
        warnings.push(format!(
            "Prices above {} are not eligible for CMHC insurance",
            schedule.max_insured_price
        ));
    }

    Ok(json!({
        "result": {
            "purchasePrice": args.price,
            "minimumDownPayment": round_cents(minimum),
            "minimumDownPaymentPct": round_to(minimum / args.price * Decimal::ONE_HUNDRED, 2),
        },
        "methodology": "Tiered statutory minimum down payment",
        "warnings": warnings,
    }))
}
