//! Canadian fixed-rate mortgage payments.
//!
//! Canadian mortgages compound semi-annually by law, so the quoted nominal
//! APR converts to an effective monthly rate of `(1 + apr/2)^(2/12) - 1`
//! before the level-payment annuity formula is applied. All math in
//! `rust_decimal::Decimal`; no rounding inside the formula.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomePurchaseError;
use crate::types::{round_cents, round_to, with_metadata, ComputationOutput, Money, Rate};
use crate::HomePurchaseResult;

const ROOT_TOLERANCE: Decimal = dec!(0.0000000000001);
const ROOT_MAX_ITERATIONS: u32 = 40;

/// Longest schedule accepted: 100 years of monthly payments.
pub const MAX_PAYMENTS: u32 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgagePaymentInput {
    pub principal: Money,
    /// Nominal annual rate in percent (5 = 5%)
    pub apr_percent: Decimal,
    pub amortization_years: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgagePaymentOutput {
    pub principal: Money,
    pub number_of_payments: u32,
    pub effective_monthly_rate: Rate,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest: Money,
}

/// Number of monthly payments: `round(years * 12)`, at least one and at most
/// `MAX_PAYMENTS`.
pub fn number_of_payments(amortization_years: Decimal) -> HomePurchaseResult<u32> {
    if amortization_years < Decimal::ZERO {
        return Err(HomePurchaseError::invalid(
            "amortization_years",
            "Amortization cannot be negative",
        ));
    }
    let months = amortization_years
        .checked_mul(dec!(12))
        .and_then(|m| round_to(m, 0).to_u32())
        .filter(|&m| m <= MAX_PAYMENTS)
        .ok_or_else(|| {
            HomePurchaseError::invalid(
                "amortization_years",
                format!("Amortization cannot exceed {} years", MAX_PAYMENTS / 12),
            )
        })?;
    Ok(months.max(1))
}

/// Effective monthly rate for a semi-annually compounded nominal APR.
/// Negative APRs are treated as zero.
pub fn effective_monthly_rate(apr_percent: Decimal) -> HomePurchaseResult<Rate> {
    let nominal = apr_percent.max(Decimal::ZERO) / dec!(100);
    if nominal.is_zero() {
        return Ok(Decimal::ZERO);
    }
    // (1 + j/2)^(2/12) = sixth root of (1 + j/2)
    nth_root(Decimal::ONE + nominal / dec!(2), 6)
        .map(|root| root - Decimal::ONE)
        .ok_or_else(|| {
            HomePurchaseError::invalid(
                "apr_percent",
                format!("APR {apr_percent}% is too large to compute a monthly rate"),
            )
        })
}

/// Level monthly payment amortizing `principal` over `amortization_years`.
pub fn monthly_payment(
    principal: Money,
    apr_percent: Decimal,
    amortization_years: Decimal,
) -> HomePurchaseResult<Money> {
    let n = number_of_payments(amortization_years)?;
    let r = effective_monthly_rate(apr_percent)?;

    // Growth beyond the Decimal range leaves 1/growth below its precision.
    let discount = match checked_pow(Decimal::ONE + r, n) {
        Some(growth) => Decimal::ONE - Decimal::ONE / growth,
        None => Decimal::ONE,
    };
    if r.is_zero() || discount.is_zero() {
        return Ok(principal / Decimal::from(n));
    }

    principal
        .checked_mul(r)
        .and_then(|interest| interest.checked_div(discount))
        .ok_or_else(|| {
            HomePurchaseError::invalid("principal", "Payment exceeds the representable range")
        })
}

/// Payment schedule totals over the full amortization.
pub fn calculate_mortgage_payment(
    input: &MortgagePaymentInput,
) -> HomePurchaseResult<ComputationOutput<MortgagePaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.principal < Decimal::ZERO {
        return Err(HomePurchaseError::invalid(
            "principal",
            "Principal cannot be negative",
        ));
    }
    if input.amortization_years <= Decimal::ZERO {
        return Err(HomePurchaseError::invalid(
            "amortization_years",
            "Amortization must be greater than 0 years",
        ));
    }
    if input.apr_percent < Decimal::ZERO {
        warnings.push(format!(
            "Negative APR {}% treated as 0%",
            input.apr_percent
        ));
    }
    if input.apr_percent > dec!(25) {
        warnings.push(format!(
            "APR {}% is above the 25% range accepted for purchase summaries",
            input.apr_percent
        ));
    }

    let n = number_of_payments(input.amortization_years)?;
    let rate = effective_monthly_rate(input.apr_percent)?;
    let payment = monthly_payment(input.principal, input.apr_percent, input.amortization_years)?;
    let total_paid = payment.checked_mul(Decimal::from(n)).ok_or_else(|| {
        HomePurchaseError::invalid("principal", "Total paid exceeds the representable range")
    })?;

    let output = MortgagePaymentOutput {
        principal: input.principal,
        number_of_payments: n,
        effective_monthly_rate: rate,
        monthly_payment: round_cents(payment),
        total_paid: round_cents(total_paid),
        total_interest: round_cents(total_paid - input.principal),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-payment annuity with semi-annual compounding",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Decimal math helpers
// ---------------------------------------------------------------------------

/// `base^n` by squaring; `None` once the result leaves the Decimal range.
fn checked_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut b = base;
    let mut e = n;
    while e > 0 {
        if e & 1 == 1 {
            result = result.checked_mul(b)?;
        }
        e >>= 1;
        if e > 0 {
            b = b.checked_mul(b)?;
        }
    }
    Some(result)
}

/// nth root of `x` by Newton's method.
fn nth_root(x: Decimal, n: u32) -> Option<Decimal> {
    if x == Decimal::ONE || x.is_zero() || n == 1 {
        return Some(x);
    }

    let n_dec = Decimal::from(n);
    let mut guess = Decimal::ONE;

    for _ in 0..ROOT_MAX_ITERATIONS {
        let g_n_minus_1 = checked_pow(guess, n - 1)?;
        if g_n_minus_1.is_zero() {
            break;
        }
        let delta = g_n_minus_1.checked_mul(guess)?.checked_sub(x)?
            / n_dec.checked_mul(g_n_minus_1)?;
        guess = guess.checked_sub(delta)?;
        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    Some(guess)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        assert!(
            (actual - expected).abs() <= tol,
            "{msg}: expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn test_effective_monthly_rate_five_percent() {
        // (1.025)^(1/6) - 1
        assert_close(
            effective_monthly_rate(dec!(5)).unwrap(),
            dec!(0.0041239154651443),
            dec!(0.0000000000001),
            "monthly rate",
        );
    }

    #[test]
    fn test_semi_annual_equivalence() {
        let r = effective_monthly_rate(dec!(6)).unwrap();
        // Six monthly periods compound to one half-year at 3%
        assert_close(checked_pow(Decimal::ONE + r, 6).unwrap(), dec!(1.03), dec!(0.0000000001), "half-year growth");
    }

    #[test]
    fn test_monthly_payment_regression() {
        let pmt = monthly_payment(dec!(400000), dec!(5), dec!(25)).unwrap();
        assert_eq!(round_cents(pmt), dec!(2326.42));
    }

    #[test]
    fn test_zero_rate_straight_line() {
        assert_eq!(monthly_payment(dec!(300000), Decimal::ZERO, dec!(25)).unwrap(), dec!(1000));
        assert_eq!(monthly_payment(dec!(300000), dec!(-2), dec!(25)).unwrap(), dec!(1000));
    }

    #[test]
    fn test_number_of_payments_rounding() {
        assert_eq!(number_of_payments(dec!(25)).unwrap(), 300);
        assert_eq!(number_of_payments(dec!(0.04)).unwrap(), 1);
        assert_eq!(number_of_payments(dec!(2.5)).unwrap(), 30);
        assert_eq!(number_of_payments(Decimal::ZERO).unwrap(), 1);
        assert_eq!(number_of_payments(dec!(100)).unwrap(), MAX_PAYMENTS);
    }

    #[test]
    fn test_number_of_payments_out_of_range() {
        assert!(number_of_payments(dec!(100.1)).is_err());
        assert!(number_of_payments(dec!(1000000000)).is_err());
        assert!(number_of_payments(Decimal::MAX).is_err());
        assert!(number_of_payments(dec!(-5)).is_err());
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(5), dec!(25)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_calculate_totals() {
        let input = MortgagePaymentInput {
            principal: dec!(400000),
            apr_percent: dec!(5),
            amortization_years: dec!(25),
        };
        let result = calculate_mortgage_payment(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.number_of_payments, 300);
        assert_eq!(out.monthly_payment, dec!(2326.42));
        // 2326.41994... * 300
        assert_close(out.total_paid, dec!(697925.98), dec!(0.01), "total paid");
        assert_close(out.total_interest, dec!(297925.98), dec!(0.01), "total interest");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_calculate_rejects_bad_input() {
        let mut input = MortgagePaymentInput {
            principal: dec!(-1),
            apr_percent: dec!(5),
            amortization_years: dec!(25),
        };
        assert!(calculate_mortgage_payment(&input).is_err());
        input.principal = dec!(1000);
        input.amortization_years = Decimal::ZERO;
        assert!(calculate_mortgage_payment(&input).is_err());
    }

    #[test]
    fn test_high_apr_warning() {
        let input = MortgagePaymentInput {
            principal: dec!(100000),
            apr_percent: dec!(30),
            amortization_years: dec!(10),
        };
        let result = calculate_mortgage_payment(&input).unwrap();
        assert!(result.warnings.iter().any(|w| w.contains("25%")));
    }

    #[test]
    fn test_calculate_rejects_overlong_amortization() {
        let input = MortgagePaymentInput {
            principal: dec!(100000),
            apr_percent: dec!(5),
            amortization_years: dec!(100000),
        };
        match calculate_mortgage_payment(&input).unwrap_err() {
            HomePurchaseError::InvalidInput { field, .. } => assert_eq!(field, "amortization_years"),
            e => panic!("Expected InvalidInput, got {e:?}"),
        }
    }

    #[test]
    fn test_extreme_apr_payment_approaches_interest_only() {
        let input = MortgagePaymentInput {
            principal: dec!(100000),
            apr_percent: dec!(500),
            amortization_years: dec!(30),
        };
        let result = calculate_mortgage_payment(&input).unwrap();
        let out = &result.result;
        // (1 + r)^360 is past the Decimal range, so the payment is principal * r
        let r = effective_monthly_rate(dec!(500)).unwrap();
        assert_close(r, dec!(0.232191), dec!(0.000001), "monthly rate at 500%");
        assert_eq!(out.monthly_payment, round_cents(dec!(100000) * r));
        assert_eq!(out.number_of_payments, 360);
        assert!(result.warnings.iter().any(|w| w.contains("25%")));
    }

    #[test]
    fn test_unrepresentable_apr_is_an_error() {
        assert!(effective_monthly_rate(Decimal::MAX).is_err());
        assert!(monthly_payment(dec!(100000), Decimal::MAX, dec!(25)).is_err());
    }
}
