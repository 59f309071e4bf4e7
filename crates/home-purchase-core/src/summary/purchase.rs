//! Cash needed at closing and monthly carrying cost for a home purchase.
//!
//! Validation never halts the computation: every problem is collected into
//! `validation_messages` and a best-effort summary is still produced. Tax
//! service failures are reported separately in the envelope warnings and
//! recovered with the local engines.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Instant;

use crate::config::JurisdictionConfig;
use crate::error::HomePurchaseError;
use crate::insurance::cmhc::{cmhc_premium, local_pst, CmhcInput, CmhcOutput, CmhcSchedule};
use crate::mortgage::payment::monthly_payment;
use crate::sources::{LocalTaxService, TaxService};
use crate::tax::land_transfer::{land_transfer_tax, LandTransferTaxInput, LandTransferTaxOutput};
use crate::types::{
    round_cents, round_to, with_metadata, CmhcHandling, ComputationOutput, DwellingType, Money,
    PropertyType, Province, Rate,
};
use crate::HomePurchaseResult;

pub const MIN_APR_PERCENT: Decimal = dec!(0);
pub const MAX_APR_PERCENT: Decimal = dec!(25);
pub const MIN_AMORTIZATION_YEARS: Decimal = dec!(5);
pub const MAX_AMORTIZATION_YEARS: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseInputs {
    pub purchase_price: Money,
    pub down_payment: Money,
    #[serde(default)]
    pub deposit: Money,
    pub apr_percent: Decimal,
    #[serde(default = "default_amortization")]
    pub amortization_years: Decimal,
    #[serde(default)]
    pub province: Province,
    /// Only meaningful for Ontario purchases.
    #[serde(default = "default_true")]
    pub is_toronto_property: bool,
    #[serde(default)]
    pub first_time_buyer: bool,
    #[serde(default)]
    pub is_non_resident: bool,
    #[serde(default)]
    pub property_type: PropertyType,
    #[serde(default)]
    pub dwelling_type: Option<DwellingType>,
    #[serde(default)]
    pub cmhc_handling: CmhcHandling,
    #[serde(default)]
    pub monthly_maintenance: Money,
    #[serde(default)]
    pub monthly_utilities: Money,
    /// Added as given; enter rental income as a negative amount.
    #[serde(default)]
    pub monthly_rental: Money,
    #[serde(default)]
    pub monthly_insurance: Money,
    #[serde(default)]
    pub inspection_fee: Money,
    #[serde(default)]
    pub legal_fees: Money,
    #[serde(default)]
    pub annual_property_tax: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<NaiveDate>,
    /// Reference date for `days_until_closing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

fn default_amortization() -> Decimal {
    dec!(25)
}

fn default_true() -> bool {
    true
}

impl PurchaseInputs {
    fn land_transfer_request(&self) -> LandTransferTaxInput {
        LandTransferTaxInput {
            purchase_price: self.purchase_price,
            is_toronto_property: self.is_toronto_property && self.province == Province::On,
            first_time_buyer: self.first_time_buyer,
            is_non_resident: self.is_non_resident,
            property_type: self.property_type,
            dwelling_type: self.dwelling_type,
        }
    }

    fn cmhc_request(&self) -> CmhcInput {
        CmhcInput {
            purchase_price: self.purchase_price,
            down_payment: self.down_payment,
            province: self.province,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    pub mortgage_principal: Money,
    pub monthly_mortgage_payment: Money,
    pub total_cash_at_closing: Money,
    pub total_monthly_carrying_cost: Money,
    pub base_mortgage: Money,
    pub down_payment_pct: Rate,
    pub minimum_down_payment: Money,
    pub balance_of_down_payment: Money,
    pub cmhc_applicable: bool,
    pub financed_premium: Money,
    pub premium_at_closing: Money,
    pub cmhc_pst: Money,
    pub monthly_property_tax: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_until_closing: Option<i64>,
    pub land_transfer_tax: LandTransferTaxOutput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmhc: Option<CmhcOutput>,
    pub validation_messages: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Summarise a purchase with the built-in schedules and in-process engines.
pub fn calculate_purchase_summary(inputs: &PurchaseInputs) -> ComputationOutput<PurchaseSummary> {
    let service = LocalTaxService::default();
    calculate_purchase_summary_with(inputs, service.config(), &service)
}

/// Summarise a purchase, issuing tax lookups against `service`.
///
/// `config` supplies the local fallback engines and the eligibility rules.
pub fn calculate_purchase_summary_with(
    inputs: &PurchaseInputs,
    config: &JurisdictionConfig,
    service: &dyn TaxService,
) -> ComputationOutput<PurchaseSummary> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let validation_messages = validate_purchase(inputs, &config.cmhc);

    let price = inputs.purchase_price;
    let down = inputs.down_payment;
    let minimum_down_payment = config.cmhc.min_down_payment(price);
    let down_payment_pct = if price > Decimal::ZERO {
        down / price * dec!(100)
    } else {
        Decimal::ZERO
    };
    let conventional_pct = (Decimal::ONE - config.cmhc.insurance_required_above_ltv) * dec!(100);
    let cmhc_applicable = price > Decimal::ZERO
        && price <= config.cmhc.max_insured_price
        && down_payment_pct < conventional_pct
        && down >= minimum_down_payment;

    if inputs.province != Province::On {
        warnings.push(format!(
            "Land transfer tax uses the Ontario schedule; province {} has no municipal tax applied",
            inputs.province
        ));
    }

    // --- Independent lookups, issued concurrently ---
    let ltt_request = inputs.land_transfer_request();
    let cmhc_request = inputs.cmhc_request();
    let (ltt_req, cmhc_req) = (&ltt_request, &cmhc_request);
    let (ltt_lookup, pst_lookup) = thread::scope(|s| {
        let ltt = if price > Decimal::ZERO {
            Some(s.spawn(move || service.land_transfer_tax(ltt_req)))
        } else {
            None
        };
        let pst = if cmhc_applicable {
            Some(s.spawn(move || service.cmhc_pst(cmhc_req)))
        } else {
            None
        };
        (
            ltt.map(|h| join_lookup(h, service.name())),
            pst.map(|h| join_lookup(h, service.name())),
        )
    });

    let land_transfer_tax_out = match ltt_lookup {
        Some(Ok(out)) => out,
        Some(Err(e)) => {
            tracing::warn!(service = service.name(), error = %e, "land transfer tax lookup failed, computing locally");
            warnings.push(format!(
                "Land transfer tax service unavailable ({e}); using locally computed tax"
            ));
            local_land_transfer_tax(&ltt_request, config)
        }
        None => zero_land_transfer_tax(price),
    };

    // --- CMHC premium (always local) and PST (service, else local) ---
    let mut cmhc_out: Option<CmhcOutput> = None;
    let mut premium = Decimal::ZERO;
    let mut cmhc_pst = Decimal::ZERO;
    if cmhc_applicable {
        match cmhc_premium(&cmhc_request, &config.cmhc) {
            Ok(local) => {
                if !local.insurable {
                    warnings.push(format!(
                        "Loan-to-value {} is not insurable; CMHC financing cannot proceed",
                        local.ltv
                    ));
                }
                premium = local.premium;
                let fallback_pst = local_pst(premium, inputs.province, &config.cmhc);
                cmhc_pst = match pst_lookup {
                    Some(Ok(remote)) if remote.pst > Decimal::ZERO => remote.pst,
                    Some(Ok(_)) | None => fallback_pst,
                    Some(Err(e)) => {
                        tracing::warn!(service = service.name(), error = %e, "CMHC PST lookup failed, computing locally");
                        warnings.push(format!(
                            "CMHC premium tax service unavailable ({e}); using provincial rate table"
                        ));
                        fallback_pst
                    }
                };
                cmhc_out = Some(CmhcOutput { pst: cmhc_pst, ..local });
            }
            Err(e) => warnings.push(format!("CMHC premium not computed: {e}")),
        }
    }

    let (financed_premium, premium_at_closing) = match inputs.cmhc_handling {
        CmhcHandling::Finance => (premium, Decimal::ZERO),
        CmhcHandling::Upfront => (Decimal::ZERO, premium),
    };

    // --- Mortgage ---
    // Out-of-range terms are already reported; the payment uses the nearest valid term.
    let base_mortgage = (price - down).max(Decimal::ZERO);
    let mortgage_principal = base_mortgage + financed_premium;
    let payment = match monthly_payment(
        mortgage_principal,
        inputs.apr_percent.clamp(MIN_APR_PERCENT, MAX_APR_PERCENT),
        inputs
            .amortization_years
            .clamp(MIN_AMORTIZATION_YEARS, MAX_AMORTIZATION_YEARS),
    ) {
        Ok(payment) => payment,
        Err(e) => {
            warnings.push(format!("Mortgage payment not computed: {e}"));
            Decimal::ZERO
        }
    };

    // --- Totals ---
    let total_cash_at_closing = down
        + inputs.inspection_fee
        + inputs.legal_fees
        + land_transfer_tax_out.total
        + cmhc_pst
        + premium_at_closing
        - inputs.deposit;
    let monthly_property_tax = inputs.annual_property_tax / dec!(12);
    let total_monthly_carrying_cost = payment
        + monthly_property_tax
        + inputs.monthly_maintenance
        + inputs.monthly_utilities
        + inputs.monthly_rental
        + inputs.monthly_insurance;

    let days_until_closing = match (inputs.closing_date, inputs.as_of) {
        (Some(closing), Some(as_of)) => Some((closing - as_of).num_days().max(0)),
        _ => None,
    };

    tracing::debug!(
        %mortgage_principal,
        %payment,
        %total_cash_at_closing,
        cmhc_applicable,
        "purchase summary computed"
    );

    let summary = PurchaseSummary {
        mortgage_principal: round_cents(mortgage_principal),
        monthly_mortgage_payment: round_cents(payment),
        total_cash_at_closing: round_cents(total_cash_at_closing),
        total_monthly_carrying_cost: round_cents(total_monthly_carrying_cost),
        base_mortgage: round_cents(base_mortgage),
        down_payment_pct: round_to(down_payment_pct, 2),
        minimum_down_payment: round_cents(minimum_down_payment),
        balance_of_down_payment: round_cents((down - inputs.deposit).max(Decimal::ZERO)),
        cmhc_applicable,
        financed_premium: round_cents(financed_premium),
        premium_at_closing: round_cents(premium_at_closing),
        cmhc_pst: round_cents(cmhc_pst),
        monthly_property_tax: round_cents(monthly_property_tax),
        days_until_closing,
        land_transfer_tax: land_transfer_tax_out,
        cmhc: cmhc_out,
        validation_messages,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Closing costs (LTT, CMHC premium and PST) with semi-annually compounded mortgage payment",
        inputs,
        warnings,
        elapsed,
        summary,
    )
}

/// Collect every validation problem, in display order.
pub fn validate_purchase(inputs: &PurchaseInputs, cmhc: &CmhcSchedule) -> Vec<String> {
    let mut messages = Vec::new();
    let price = inputs.purchase_price;

    if price <= Decimal::ZERO {
        messages.push("Purchase price must be greater than 0.".to_string());
    }
    if inputs.deposit < Decimal::ZERO {
        messages.push("Deposit cannot be negative.".to_string());
    }
    if inputs.deposit > price {
        messages.push("Deposit cannot exceed purchase price.".to_string());
    }
    if inputs.down_payment < Decimal::ZERO || inputs.down_payment > price {
        messages.push("Down payment must be between 0 and purchase price.".to_string());
    }
    if inputs.apr_percent < MIN_APR_PERCENT || inputs.apr_percent > MAX_APR_PERCENT {
        messages.push("APR must be between 0% and 25%.".to_string());
    }
    if inputs.amortization_years < MIN_AMORTIZATION_YEARS
        || inputs.amortization_years > MAX_AMORTIZATION_YEARS
    {
        messages.push("Amortization must be between 5 and 30 years.".to_string());
    }
    if price > Decimal::ZERO {
        let min_down = cmhc.min_down_payment(price);
        if inputs.down_payment < min_down {
            messages.push(format!(
                "Down payment below Canadian minimum {} for this price.",
                format_cad(min_down)
            ));
        }
    }

    messages
}

/// `$1,234.56` style currency formatting.
pub fn format_cad(amount: Money) -> String {
    let rounded = round_cents(amount);
    let negative = rounded < Decimal::ZERO;
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${grouped}.{cents}", if negative { "-" } else { "" })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn join_lookup<T>(
    handle: thread::ScopedJoinHandle<'_, HomePurchaseResult<T>>,
    service: &str,
) -> HomePurchaseResult<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(HomePurchaseError::unavailable(service, "lookup panicked")))
}

fn local_land_transfer_tax(
    request: &LandTransferTaxInput,
    config: &JurisdictionConfig,
) -> LandTransferTaxOutput {
    land_transfer_tax(request, &config.land_transfer)
        .unwrap_or_else(|_| zero_land_transfer_tax(request.purchase_price))
}

fn zero_land_transfer_tax(price: Money) -> LandTransferTaxOutput {
    LandTransferTaxOutput {
        purchase_price: price,
        dwelling_units: 1,
        provincial_before_rebate: Decimal::ZERO,
        provincial_rebate_applied: Decimal::ZERO,
        provincial: Decimal::ZERO,
        municipal_before_rebate: Decimal::ZERO,
        municipal_rebate_applied: Decimal::ZERO,
        municipal: Decimal::ZERO,
        nrst: Decimal::ZERO,
        total: Decimal::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HomePurchaseResult;
    use rust_decimal_macros::dec;

    fn sample_inputs() -> PurchaseInputs {
        PurchaseInputs {
            purchase_price: dec!(600000),
            down_payment: dec!(60000),
            deposit: dec!(30000),
            apr_percent: dec!(4.25),
            amortization_years: dec!(25),
            province: Province::On,
            is_toronto_property: true,
            first_time_buyer: false,
            is_non_resident: false,
            property_type: PropertyType::Detached,
            dwelling_type: Some(DwellingType::SingleFamily),
            cmhc_handling: CmhcHandling::Finance,
            monthly_maintenance: dec!(150),
            monthly_utilities: dec!(250),
            monthly_rental: Decimal::ZERO,
            monthly_insurance: dec!(100),
            inspection_fee: dec!(500),
            legal_fees: dec!(2000),
            annual_property_tax: dec!(4800),
            closing_date: None,
            as_of: None,
        }
    }

    struct FailingService;

    impl TaxService for FailingService {
        fn name(&self) -> &str {
            "failing"
        }

        fn land_transfer_tax(
            &self,
            _input: &LandTransferTaxInput,
        ) -> HomePurchaseResult<LandTransferTaxOutput> {
            Err(HomePurchaseError::unavailable("failing", "timed out"))
        }

        fn cmhc_pst(&self, _input: &CmhcInput) -> HomePurchaseResult<CmhcOutput> {
            Err(HomePurchaseError::unavailable("failing", "timed out"))
        }
    }

    #[test]
    fn test_financed_premium_summary() {
        let out = calculate_purchase_summary(&sample_inputs());
        let s = &out.result;
        assert!(s.validation_messages.is_empty());
        assert!(s.cmhc_applicable);
        // 540000 * 3.1%
        assert_eq!(s.financed_premium, dec!(16740.00));
        assert_eq!(s.premium_at_closing, Decimal::ZERO);
        assert_eq!(s.cmhc_pst, dec!(1339.20));
        assert_eq!(s.mortgage_principal, dec!(556740.00));
        assert_eq!(s.monthly_mortgage_payment, dec!(3004.50));
        // LTT at 600k: 275 + 1950 + 2250 + 4000 = 8475, twice
        assert_eq!(s.land_transfer_tax.total, dec!(16950.00));
        // 60000 + 500 + 2000 + 16950 + 1339.20 - 30000
        assert_eq!(s.total_cash_at_closing, dec!(50789.20));
        // 3004.50 + 400 + 150 + 250 + 100
        assert_eq!(s.total_monthly_carrying_cost, dec!(3904.50));
        assert_eq!(s.balance_of_down_payment, dec!(30000.00));
        assert_eq!(s.down_payment_pct, dec!(10.00));
    }

    #[test]
    fn test_upfront_premium_goes_to_closing() {
        let mut inputs = sample_inputs();
        inputs.cmhc_handling = CmhcHandling::Upfront;
        let s = calculate_purchase_summary(&inputs).result;
        assert_eq!(s.financed_premium, Decimal::ZERO);
        assert_eq!(s.premium_at_closing, dec!(16740.00));
        assert_eq!(s.mortgage_principal, dec!(540000.00));
        assert_eq!(s.total_cash_at_closing, dec!(67529.20));
    }

    #[test]
    fn test_twenty_percent_down_skips_cmhc() {
        let mut inputs = sample_inputs();
        inputs.down_payment = dec!(120000);
        let s = calculate_purchase_summary(&inputs).result;
        assert!(!s.cmhc_applicable);
        assert!(s.cmhc.is_none());
        assert_eq!(s.cmhc_pst, Decimal::ZERO);
        assert_eq!(s.mortgage_principal, dec!(480000.00));
    }

    #[test]
    fn test_price_over_one_million_skips_cmhc() {
        let mut inputs = sample_inputs();
        inputs.purchase_price = dec!(1200000);
        inputs.down_payment = dec!(240000);
        inputs.deposit = dec!(50000);
        let s = calculate_purchase_summary(&inputs).result;
        assert!(!s.cmhc_applicable);
        assert!(s.validation_messages.is_empty());
    }

    #[test]
    fn test_below_minimum_down_payment_reported() {
        let mut inputs = sample_inputs();
        inputs.down_payment = dec!(30000);
        inputs.deposit = dec!(10000);
        let s = calculate_purchase_summary(&inputs).result;
        assert!(!s.cmhc_applicable);
        assert_eq!(s.minimum_down_payment, dec!(35000.00));
        assert_eq!(
            s.validation_messages,
            vec!["Down payment below Canadian minimum $35,000.00 for this price.".to_string()]
        );
    }

    #[test]
    fn test_collects_all_validation_messages() {
        let mut inputs = sample_inputs();
        inputs.purchase_price = Decimal::ZERO;
        inputs.deposit = dec!(-5);
        inputs.apr_percent = dec!(26);
        inputs.amortization_years = dec!(40);
        let out = calculate_purchase_summary(&inputs);
        let msgs = &out.result.validation_messages;
        assert_eq!(msgs.len(), 5, "{msgs:?}");
        assert_eq!(msgs[0], "Purchase price must be greater than 0.");
        assert!(msgs.iter().any(|m| m.starts_with("Deposit cannot be negative")));
        assert!(msgs.iter().any(|m| m.starts_with("Down payment must be between")));
        assert!(msgs.iter().any(|m| m.starts_with("APR")));
        assert!(msgs.iter().any(|m| m.starts_with("Amortization")));
        // Best-effort result still produced
        assert_eq!(out.result.land_transfer_tax.total, Decimal::ZERO);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_overlong_amortization_uses_longest_valid_term() {
        let mut inputs = sample_inputs();
        inputs.amortization_years = dec!(100000);
        let out = calculate_purchase_summary(&inputs);
        let s = &out.result;
        assert_eq!(
            s.validation_messages,
            vec!["Amortization must be between 5 and 30 years.".to_string()]
        );
        let expected = monthly_payment(dec!(556740), dec!(4.25), MAX_AMORTIZATION_YEARS).unwrap();
        assert_eq!(s.monthly_mortgage_payment, round_cents(expected));
        assert_eq!(s.total_cash_at_closing, dec!(50789.20));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_extreme_apr_uses_highest_valid_rate() {
        let mut inputs = sample_inputs();
        inputs.apr_percent = dec!(500);
        inputs.amortization_years = dec!(30);
        let s = calculate_purchase_summary(&inputs).result;
        assert_eq!(s.validation_messages, vec!["APR must be between 0% and 25%.".to_string()]);
        let expected = monthly_payment(dec!(556740), MAX_APR_PERCENT, dec!(30)).unwrap();
        assert_eq!(s.monthly_mortgage_payment, round_cents(expected));
        assert!(s.monthly_mortgage_payment > Decimal::ZERO);
    }

    #[test]
    fn test_summary_uses_one_wire_casing() {
        let s = calculate_purchase_summary(&sample_inputs()).result;
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["totalCashAtClosing"], "50789.20");
        assert_eq!(v["baseMortgage"], "540000.00");
        assert_eq!(v["landTransferTax"]["provincialBeforeRebate"], "8475.00");
        assert_eq!(v["cmhc"]["premiumRate"], "3.10");
        assert!(v["validationMessages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_service_failure_falls_back_locally() {
        let inputs = sample_inputs();
        let local = calculate_purchase_summary(&inputs).result;
        let out = calculate_purchase_summary_with(&inputs, &JurisdictionConfig::default(), &FailingService);
        assert_eq!(out.result.land_transfer_tax, local.land_transfer_tax);
        // premium * 8%
        assert_eq!(out.result.cmhc_pst, dec!(1339.20));
        assert_eq!(out.result.total_cash_at_closing, local.total_cash_at_closing);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.result.validation_messages.is_empty());
    }

    #[test]
    fn test_non_ontario_has_no_municipal_tax() {
        let mut inputs = sample_inputs();
        inputs.province = Province::Qc;
        let out = calculate_purchase_summary(&inputs);
        assert_eq!(out.result.land_transfer_tax.municipal, Decimal::ZERO);
        // 16740 * 9%
        assert_eq!(out.result.cmhc_pst, dec!(1506.60));
        assert!(out.warnings.iter().any(|w| w.contains("Ontario schedule")));
    }

    #[test]
    fn test_days_until_closing() {
        let mut inputs = sample_inputs();
        inputs.as_of = NaiveDate::from_ymd_opt(2025, 3, 1);
        inputs.closing_date = NaiveDate::from_ymd_opt(2025, 4, 5);
        assert_eq!(calculate_purchase_summary(&inputs).result.days_until_closing, Some(35));
        inputs.closing_date = NaiveDate::from_ymd_opt(2025, 2, 1);
        assert_eq!(calculate_purchase_summary(&inputs).result.days_until_closing, Some(0));
    }

    #[test]
    fn test_rental_offset_reduces_monthly_cost() {
        let mut inputs = sample_inputs();
        inputs.monthly_rental = dec!(-1200);
        let s = calculate_purchase_summary(&inputs).result;
        assert_eq!(s.total_monthly_carrying_cost, dec!(2704.50));
    }

    #[test]
    fn test_format_cad() {
        assert_eq!(format_cad(dec!(35000)), "$35,000.00");
        assert_eq!(format_cad(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_cad(dec!(999)), "$999.00");
        assert_eq!(format_cad(dec!(-1500.5)), "-$1,500.50");
    }
}
