//! CMHC mortgage default insurance: LTV premium tiers, provincial sales tax
//! on the premium, and the statutory minimum down payment.
//!
//! The premium engine is pure math over loan-to-value. Whether a purchase is
//! eligible for insured financing at all (price ceiling, 20% conventional
//! threshold, minimum down payment) is decided by the purchase summary.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomePurchaseError;
use crate::types::{round_cents, round_to, with_metadata, ComputationOutput, Money, Province, Rate};
use crate::HomePurchaseResult;

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

/// Premium rate for loans up to and including `max_ltv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumTier {
    pub max_ltv: Rate,
    pub rate: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvincialPst {
    pub province: Province,
    pub rate: Rate,
}

/// Canadian minimum down payment rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinDownPaymentRule {
    /// Portion of the price taxed at `lower_rate`.
    pub lower_portion: Money,
    pub lower_rate: Rate,
    /// Rate on the portion above `lower_portion`.
    pub upper_rate: Rate,
    /// At or above this price the whole price uses `full_rate`.
    pub full_rate_threshold: Money,
    pub full_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmhcSchedule {
    /// Ascending by `max_ltv`; LTV above the last tier is uninsurable.
    #[serde(deserialize_with = "deserialize_premium_tiers")]
    pub premium_tiers: Vec<PremiumTier>,
    /// Premium is only charged above this LTV.
    pub insurance_required_above_ltv: Rate,
    /// Highest purchase price eligible for insured financing.
    pub max_insured_price: Money,
    pub pst_rates: Vec<ProvincialPst>,
    pub min_down_payment: MinDownPaymentRule,
}

impl CmhcSchedule {
    pub fn canada() -> Self {
        CmhcSchedule {
            premium_tiers: vec![
                PremiumTier { max_ltv: dec!(0.65), rate: dec!(0.006) },
                PremiumTier { max_ltv: dec!(0.75), rate: dec!(0.017) },
                PremiumTier { max_ltv: dec!(0.80), rate: dec!(0.024) },
                PremiumTier { max_ltv: dec!(0.85), rate: dec!(0.028) },
                PremiumTier { max_ltv: dec!(0.90), rate: dec!(0.031) },
                PremiumTier { max_ltv: dec!(0.95), rate: dec!(0.040) },
            ],
            insurance_required_above_ltv: dec!(0.80),
            max_insured_price: dec!(1000000),
            pst_rates: vec![
                ProvincialPst { province: Province::On, rate: dec!(0.08) },
                ProvincialPst { province: Province::Qc, rate: dec!(0.09) },
                ProvincialPst { province: Province::Sk, rate: dec!(0.06) },
            ],
            min_down_payment: MinDownPaymentRule {
                lower_portion: dec!(500000),
                lower_rate: dec!(0.05),
                upper_rate: dec!(0.10),
                full_rate_threshold: dec!(1000000),
                full_rate: dec!(0.20),
            },
        }
    }

    /// Tier rate for `ltv`, or `Uninsurable` above the highest tier.
    pub fn premium_rate(&self, ltv: Rate) -> HomePurchaseResult<Rate> {
        self.premium_tiers
            .iter()
            .find(|t| ltv <= t.max_ltv)
            .map(|t| t.rate)
            .ok_or(HomePurchaseError::Uninsurable { ltv })
    }

    /// Sales tax rate on the premium; provinces without an entry pay none.
    pub fn pst_rate(&self, province: Province) -> Rate {
        self.pst_rates
            .iter()
            .find(|p| p.province == province)
            .map(|p| p.rate)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn min_down_payment(&self, price: Money) -> Money {
        let rule = &self.min_down_payment;
        if price >= rule.full_rate_threshold {
            return price * rule.full_rate;
        }
        if price <= rule.lower_portion {
            return price * rule.lower_rate;
        }
        rule.lower_portion * rule.lower_rate + (price - rule.lower_portion) * rule.upper_rate
    }
}

/// Tiers must be non-empty, strictly ascending by `max_ltv` within (0, 1],
/// with non-negative rates.
pub fn validate_premium_tiers(tiers: &[PremiumTier]) -> HomePurchaseResult<()> {
    if tiers.is_empty() {
        return Err(HomePurchaseError::invalid(
            "premium_tiers",
            "Premium schedule must contain at least one tier",
        ));
    }

    let mut last_ltv = Decimal::ZERO;
    for (i, t) in tiers.iter().enumerate() {
        if t.max_ltv <= last_ltv || t.max_ltv > Decimal::ONE {
            return Err(HomePurchaseError::invalid(
                "premium_tiers",
                format!("Tier max_ltv must be strictly increasing within (0, 1] (tier {i}: {})", t.max_ltv),
            ));
        }
        if t.rate < Decimal::ZERO {
            return Err(HomePurchaseError::invalid(
                "premium_tiers",
                format!("Tier {i} has a negative rate {}", t.rate),
            ));
        }
        last_ltv = t.max_ltv;
    }
    Ok(())
}

fn deserialize_premium_tiers<'de, D>(deserializer: D) -> Result<Vec<PremiumTier>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let tiers = Vec::<PremiumTier>::deserialize(deserializer)?;
    validate_premium_tiers(&tiers).map_err(serde::de::Error::custom)?;
    Ok(tiers)
}

impl Default for CmhcSchedule {
    fn default() -> Self {
        Self::canada()
    }
}

/// Premium rate for `ltv` under the default schedule.
pub fn cmhc_premium_rate(ltv: Rate) -> HomePurchaseResult<Rate> {
    CmhcSchedule::canada().premium_rate(ltv)
}

/// Statutory minimum down payment under the default schedule.
pub fn min_down_payment(price: Money) -> Money {
    CmhcSchedule::canada().min_down_payment(price)
}

/// Sales tax on a premium computed locally, rounded to the cent.
pub fn local_pst(premium: Money, province: Province, schedule: &CmhcSchedule) -> Money {
    round_cents(premium * schedule.pst_rate(province))
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmhcInput {
    pub purchase_price: Money,
    pub down_payment: Money,
    #[serde(default)]
    pub province: Province,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CmhcOutput {
    /// mortgage / price, 4 dp
    pub ltv: Rate,
    #[serde(default = "default_true")]
    pub insurable: bool,
    #[serde(default = "default_true")]
    pub insurance_required: bool,
    /// Percent, 2 dp (e.g. 3.10)
    pub premium_rate: Decimal,
    pub premium: Money,
    /// Percent, 2 dp (e.g. 8.00)
    pub pst_rate: Decimal,
    pub pst: Money,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the CMHC premium and its sales tax with the default schedule.
pub fn calculate_cmhc_premium(
    input: &CmhcInput,
) -> HomePurchaseResult<ComputationOutput<CmhcOutput>> {
    calculate_cmhc_premium_with(input, &CmhcSchedule::canada())
}

pub fn calculate_cmhc_premium_with(
    input: &CmhcInput,
    schedule: &CmhcSchedule,
) -> HomePurchaseResult<ComputationOutput<CmhcOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let output = cmhc_premium(input, schedule)?;

    if !output.insurable {
        warnings.push(format!(
            "Loan-to-value {} exceeds the insurable maximum; no premium computed and the purchase cannot proceed with insured financing",
            output.ltv
        ));
    } else if !output.insurance_required {
        warnings.push(format!(
            "Loan-to-value {} does not require mortgage default insurance",
            output.ltv
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "CMHC premium by LTV tier with provincial sales tax",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Bare computation used by the aggregator and the local tax service.
pub fn cmhc_premium(input: &CmhcInput, schedule: &CmhcSchedule) -> HomePurchaseResult<CmhcOutput> {
    validate_cmhc_input(input)?;

    let mortgage = (input.purchase_price - input.down_payment).max(Decimal::ZERO);
    let ltv = mortgage / input.purchase_price;
    let pst_rate = schedule.pst_rate(input.province);
    let insurance_required = ltv > schedule.insurance_required_above_ltv;

    let (insurable, rate) = match schedule.premium_rate(ltv) {
        Ok(rate) => (true, rate),
        Err(HomePurchaseError::Uninsurable { .. }) => {
            tracing::debug!(%ltv, "loan-to-value above insurable maximum");
            (false, Decimal::ZERO)
        }
        Err(e) => return Err(e),
    };

    let premium = if insurable && insurance_required {
        mortgage * rate
    } else {
        Decimal::ZERO
    };
    let pst = premium * pst_rate;

    Ok(CmhcOutput {
        ltv: round_to(ltv, 4),
        insurable,
        insurance_required,
        premium_rate: round_to(rate * dec!(100), 2),
        premium: round_cents(premium),
        pst_rate: round_to(pst_rate * dec!(100), 2),
        pst: round_cents(pst),
    })
}

fn validate_cmhc_input(input: &CmhcInput) -> HomePurchaseResult<()> {
    if input.purchase_price <= Decimal::ZERO {
        return Err(HomePurchaseError::invalid(
            "purchase_price",
            "Purchase price must be greater than 0",
        ));
    }
    if input.down_payment < Decimal::ZERO || input.down_payment > input.purchase_price {
        return Err(HomePurchaseError::invalid(
            "down_payment",
            "Down payment must be between 0 and the purchase price",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
