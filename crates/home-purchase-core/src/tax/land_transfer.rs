//! Ontario provincial and Toronto municipal land transfer tax, first-time
//! buyer rebates, and the Non-Resident Speculation Tax.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomePurchaseError;
use crate::tax::brackets::{compute_marginal_tax, Bracket, BracketTable};
use crate::types::{
    round_cents, with_metadata, ComputationOutput, DwellingType, Money, PropertyType, Rate,
};
use crate::HomePurchaseResult;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Bracket tables, rebate caps and NRST rate for one jurisdiction-year.
///
/// Tables are split by dwelling-unit count because the top marginal rates
/// only apply to one- and two-unit residences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandTransferTaxSchedule {
    pub provincial_up_to_two_units: BracketTable,
    pub provincial_multi_unit: BracketTable,
    pub municipal_up_to_two_units: BracketTable,
    /// Approximation: no authoritative multi-unit municipal data above 2M.
    pub municipal_multi_unit: BracketTable,
    pub provincial_rebate_cap: Money,
    pub municipal_rebate_cap: Money,
    pub nrst_rate: Rate,
}

impl LandTransferTaxSchedule {
    /// Ontario provincial LTT with City of Toronto MLTT.
    pub fn ontario_toronto() -> Self {
        let base = [
            Bracket::upto(dec!(55000), dec!(0.005)),
            Bracket::upto(dec!(250000), dec!(0.01)),
            Bracket::upto(dec!(400000), dec!(0.015)),
            Bracket::upto(dec!(2000000), dec!(0.02)),
        ];
        let with_tail = |tail: &[Bracket]| {
            let mut v = base.to_vec();
            v.extend_from_slice(tail);
            v
        };

        let table = BracketTable::from_static;

        LandTransferTaxSchedule {
            provincial_up_to_two_units: table(with_tail(&[Bracket::unbounded(dec!(0.025))])),
            provincial_multi_unit: table(with_tail(&[Bracket::unbounded(dec!(0.02))])),
            municipal_up_to_two_units: table(with_tail(&[
                Bracket::upto(dec!(3000000), dec!(0.025)),
                Bracket::upto(dec!(4000000), dec!(0.035)),
                Bracket::upto(dec!(5000000), dec!(0.045)),
                Bracket::upto(dec!(10000000), dec!(0.055)),
                Bracket::upto(dec!(20000000), dec!(0.065)),
                Bracket::unbounded(dec!(0.075)),
            ])),
            municipal_multi_unit: table(with_tail(&[Bracket::unbounded(dec!(0.02))])),
            provincial_rebate_cap: dec!(4000),
            municipal_rebate_cap: dec!(4475),
            nrst_rate: dec!(0.25),
        }
    }

    pub fn provincial_table(&self, dwelling_units: u32) -> &BracketTable {
        if dwelling_units <= 2 {
            &self.provincial_up_to_two_units
        } else {
            &self.provincial_multi_unit
        }
    }

    pub fn municipal_table(&self, dwelling_units: u32) -> &BracketTable {
        if dwelling_units <= 2 {
            &self.municipal_up_to_two_units
        } else {
            &self.municipal_multi_unit
        }
    }
}

impl Default for LandTransferTaxSchedule {
    fn default() -> Self {
        Self::ontario_toronto()
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandTransferTaxInput {
    pub purchase_price: Money,
    #[serde(default = "default_true", alias = "isToronto")]
    pub is_toronto_property: bool,
    #[serde(default)]
    pub first_time_buyer: bool,
    #[serde(default)]
    pub is_non_resident: bool,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub dwelling_type: Option<DwellingType>,
}

fn default_true() -> bool {
    true
}

impl LandTransferTaxInput {
    /// Dwelling-unit count; only detached and semi-detached houses are refined.
    pub fn dwelling_units(&self) -> u32 {
        match self.dwelling_type {
            Some(d) if self.property_type.has_dwelling_type() => d.units(),
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandTransferTaxOutput {
    #[serde(default)]
    pub purchase_price: Money,
    #[serde(default)]
    pub dwelling_units: u32,
    pub provincial_before_rebate: Money,
    pub provincial_rebate_applied: Money,
    pub provincial: Money,
    pub municipal_before_rebate: Money,
    pub municipal_rebate_applied: Money,
    pub municipal: Money,
    pub nrst: Money,
    pub total: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute land transfer tax with the default Ontario/Toronto schedule.
pub fn calculate_land_transfer_tax(
    input: &LandTransferTaxInput,
) -> HomePurchaseResult<ComputationOutput<LandTransferTaxOutput>> {
    calculate_land_transfer_tax_with(input, &LandTransferTaxSchedule::ontario_toronto())
}

/// Compute land transfer tax against an explicit schedule.
pub fn calculate_land_transfer_tax_with(
    input: &LandTransferTaxInput,
    schedule: &LandTransferTaxSchedule,
) -> HomePurchaseResult<ComputationOutput<LandTransferTaxOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = land_transfer_tax(input, schedule)?;

    if input.dwelling_units() > 2 && input.is_toronto_property && input.purchase_price > dec!(2000000) {
        warnings.push(
            "Municipal tax above $2,000,000 for more than two dwelling units uses a flat 2.0% approximation"
                .into(),
        );
    }
    if output.nrst > Decimal::ZERO {
        warnings.push(format!(
            "Non-Resident Speculation Tax of {} included in total",
            output.nrst
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Marginal-bracket land transfer tax with first-time buyer rebates and NRST",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Bare computation used by the aggregator and the local tax service.
pub fn land_transfer_tax(
    input: &LandTransferTaxInput,
    schedule: &LandTransferTaxSchedule,
) -> HomePurchaseResult<LandTransferTaxOutput> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(HomePurchaseError::invalid(
            "purchase_price",
            "Purchase price must be greater than 0",
        ));
    }

    let price = input.purchase_price;
    let units = input.dwelling_units();

    let provincial_before = compute_marginal_tax(price, schedule.provincial_table(units));
    let municipal_before = if input.is_toronto_property {
        compute_marginal_tax(price, schedule.municipal_table(units))
    } else {
        Decimal::ZERO
    };

    let provincial_rebate = if input.first_time_buyer {
        provincial_before.min(schedule.provincial_rebate_cap)
    } else {
        Decimal::ZERO
    };
    let municipal_rebate = if input.first_time_buyer && input.is_toronto_property {
        municipal_before.min(schedule.municipal_rebate_cap)
    } else {
        Decimal::ZERO
    };

    let provincial = provincial_before - provincial_rebate;
    let municipal = municipal_before - municipal_rebate;

    let nrst = if input.is_non_resident {
        price * schedule.nrst_rate
    } else {
        Decimal::ZERO
    };

    let total = provincial + municipal + nrst;

    tracing::debug!(%price, units, %provincial, %municipal, %nrst, "land transfer tax computed");

    Ok(LandTransferTaxOutput {
        purchase_price: price,
        dwelling_units: units,
        provincial_before_rebate: round_cents(provincial_before),
        provincial_rebate_applied: round_cents(provincial_rebate),
        provincial: round_cents(provincial),
        municipal_before_rebate: round_cents(municipal_before),
        municipal_rebate_applied: round_cents(municipal_rebate),
        municipal: round_cents(municipal),
        nrst: round_cents(nrst),
        total: round_cents(total),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
