use home_purchase_core::config::JurisdictionConfig;
use home_purchase_core::insurance::cmhc::{CmhcInput, CmhcOutput};
use home_purchase_core::sources::TaxService;
use home_purchase_core::summary::purchase::{
    calculate_purchase_summary, calculate_purchase_summary_with, PurchaseInputs,
};
use home_purchase_core::tax::land_transfer::{LandTransferTaxInput, LandTransferTaxOutput};
use home_purchase_core::types::{CmhcHandling, Province};
use home_purchase_core::{HomePurchaseError, HomePurchaseResult};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};

fn inputs_from_json(json: &str) -> PurchaseInputs {
    serde_json::from_str(json).unwrap()
}

fn first_time_condo() -> PurchaseInputs {
    inputs_from_json(
        r#"{
            "purchasePrice": "500000",
            "downPayment": "25000",
            "deposit": "10000",
            "aprPercent": "5",
            "amortizationYears": "25",
            "province": "Ontario",
            "firstTimeBuyer": true,
            "propertyType": "Condominium",
            "monthlyMaintenance": "450",
            "annualPropertyTax": "3000",
            "legalFees": "1800"
        }"#,
    )
}

/// Remote service that quotes its own PST and counts calls.
struct QuotingService {
    pst: Decimal,
    calls: AtomicUsize,
}

impl TaxService for QuotingService {
    fn name(&self) -> &str {
        "quoting"
    }

    fn land_transfer_tax(
        &self,
        input: &LandTransferTaxInput,
    ) -> HomePurchaseResult<LandTransferTaxOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LandTransferTaxOutput {
            purchase_price: input.purchase_price,
            dwelling_units: 1,
            provincial_before_rebate: dec!(1000),
            provincial_rebate_applied: Decimal::ZERO,
            provincial: dec!(1000),
            municipal_before_rebate: Decimal::ZERO,
            municipal_rebate_applied: Decimal::ZERO,
            municipal: Decimal::ZERO,
            nrst: Decimal::ZERO,
            total: dec!(1000),
        })
    }

    fn cmhc_pst(&self, input: &CmhcInput) -> HomePurchaseResult<CmhcOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if input.province == Province::Other {
            return Err(HomePurchaseError::unavailable("quoting", "unsupported province"));
        }
        Ok(CmhcOutput {
            ltv: Decimal::ZERO,
            insurable: true,
            insurance_required: true,
            premium_rate: Decimal::ZERO,
            premium: Decimal::ZERO,
            pst_rate: Decimal::ZERO,
            pst: self.pst,
        })
    }
}

// ===========================================================================
// Reference scenarios
// ===========================================================================

#[test]
fn test_first_time_condo_minimum_down() {
    let out = calculate_purchase_summary(&first_time_condo());
    let s = &out.result;

    assert!(s.validation_messages.is_empty(), "{:?}", s.validation_messages);
    assert!(s.cmhc_applicable);
    assert_eq!(s.minimum_down_payment, dec!(25000.00));
    assert_eq!(s.down_payment_pct, dec!(5.00));

    // LTV 0.95 -> 4.00% on 475000
    assert_eq!(s.financed_premium, dec!(19000.00));
    assert_eq!(s.cmhc_pst, dec!(1520.00));
    assert_eq!(s.mortgage_principal, dec!(494000.00));

    // 6475 before rebates in each jurisdiction
    assert_eq!(s.land_transfer_tax.provincial, dec!(2475.00));
    assert_eq!(s.land_transfer_tax.municipal, dec!(2000.00));

    // 25000 + 1800 + 4475 + 1520 - 10000
    assert_eq!(s.total_cash_at_closing, dec!(22795.00));
    assert_eq!(s.monthly_property_tax, dec!(250.00));
    assert_eq!(s.balance_of_down_payment, dec!(15000.00));
}

#[test]
fn test_summary_is_idempotent() {
    let inputs = first_time_condo();
    let a = calculate_purchase_summary(&inputs);
    let b = calculate_purchase_summary(&inputs);
    assert_eq!(a.result, b.result);
    assert_eq!(a.warnings, b.warnings);
}

#[test]
fn test_non_resident_adds_speculation_tax_to_cash() {
    let base = first_time_condo();
    let mut foreign = base.clone();
    foreign.is_non_resident = true;

    let local = calculate_purchase_summary(&base).result;
    let nr = calculate_purchase_summary(&foreign).result;
    assert_eq!(nr.land_transfer_tax.nrst, dec!(125000.00));
    assert_eq!(
        nr.total_cash_at_closing - local.total_cash_at_closing,
        dec!(125000.00)
    );
}

#[test]
fn test_toronto_flag_ignored_outside_ontario() {
    let mut inputs = first_time_condo();
    inputs.province = Province::Sk;
    inputs.is_toronto_property = true;
    let out = calculate_purchase_summary(&inputs);
    assert_eq!(out.result.land_transfer_tax.municipal, Decimal::ZERO);
    // 19000 * 6%
    assert_eq!(out.result.cmhc_pst, dec!(1140.00));
    assert_eq!(out.warnings.len(), 1);
}

// ===========================================================================
// Remote service behaviour
// ===========================================================================

#[test]
fn test_remote_values_take_precedence() {
    let service = QuotingService {
        pst: dec!(1234.56),
        calls: AtomicUsize::new(0),
    };
    let out = calculate_purchase_summary_with(
        &first_time_condo(),
        &JurisdictionConfig::default(),
        &service,
    );
    assert_eq!(service.calls.load(Ordering::SeqCst), 2);
    assert_eq!(out.result.land_transfer_tax.total, dec!(1000));
    assert_eq!(out.result.cmhc_pst, dec!(1234.56));
    // Premium always comes from the local engine
    assert_eq!(out.result.financed_premium, dec!(19000.00));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_zero_remote_pst_uses_local_rate() {
    let service = QuotingService {
        pst: Decimal::ZERO,
        calls: AtomicUsize::new(0),
    };
    let out = calculate_purchase_summary_with(
        &first_time_condo(),
        &JurisdictionConfig::default(),
        &service,
    );
    assert_eq!(out.result.cmhc_pst, dec!(1520.00));
}

#[test]
fn test_remote_pst_error_falls_back_with_warning() {
    let service = QuotingService {
        pst: dec!(99),
        calls: AtomicUsize::new(0),
    };
    let mut inputs = first_time_condo();
    inputs.province = Province::Other;
    let out = calculate_purchase_summary_with(&inputs, &JurisdictionConfig::default(), &service);
    assert_eq!(out.result.cmhc_pst, Decimal::ZERO);
    assert!(out
        .warnings
        .iter()
        .any(|w| w.starts_with("CMHC premium tax service unavailable")));
}

#[test]
fn test_cmhc_lookup_skipped_when_not_applicable() {
    let service = QuotingService {
        pst: dec!(99),
        calls: AtomicUsize::new(0),
    };
    let mut inputs = first_time_condo();
    inputs.down_payment = dec!(100000);
    let out = calculate_purchase_summary_with(&inputs, &JurisdictionConfig::default(), &service);
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    assert!(out.result.cmhc.is_none());
    assert_eq!(out.result.cmhc_pst, Decimal::ZERO);
}

#[test]
fn test_upfront_handling_from_json() {
    let mut inputs = first_time_condo();
    inputs.cmhc_handling = "upfront".parse::<CmhcHandling>().unwrap();
    let s = calculate_purchase_summary(&inputs).result;
    assert_eq!(s.mortgage_principal, dec!(475000.00));
    assert_eq!(s.premium_at_closing, dec!(19000.00));
    assert_eq!(s.total_cash_at_closing, dec!(41795.00));
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn prop_principal_includes_financed_premium(
        price in 100_000u64..1_000_000u64,
        down_pct in 5u64..30u64,
    ) {
        let mut inputs = first_time_condo();
        inputs.purchase_price = Decimal::from(price);
        inputs.down_payment = Decimal::from(price * down_pct / 100);
        inputs.deposit = Decimal::ZERO;
        let s = calculate_purchase_summary(&inputs).result;
        prop_assert_eq!(s.mortgage_principal, s.base_mortgage + s.financed_premium);
        prop_assert!(s.total_cash_at_closing >= inputs.down_payment);
        if !s.cmhc_applicable {
            prop_assert_eq!(s.financed_premium, Decimal::ZERO);
        }
    }
}
