//! External collaborators: the jurisdiction tax service and the market-rate
//! source. Both are plain request/response lookups; every failure degrades to
//! a locally computed value or a configured default, never an abort.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::JurisdictionConfig;
use crate::insurance::cmhc::{cmhc_premium, CmhcInput, CmhcOutput};
use crate::tax::land_transfer::{land_transfer_tax, LandTransferTaxInput, LandTransferTaxOutput};
use crate::HomePurchaseResult;

/// Upper bound (exclusive) for a market APR to be applied automatically.
pub const MAX_AUTO_APR_PERCENT: Decimal = dec!(25);

/// Land transfer tax and CMHC premium-tax lookups.
pub trait TaxService: Send + Sync {
    fn name(&self) -> &str;

    fn land_transfer_tax(
        &self,
        input: &LandTransferTaxInput,
    ) -> HomePurchaseResult<LandTransferTaxOutput>;

    fn cmhc_pst(&self, input: &CmhcInput) -> HomePurchaseResult<CmhcOutput>;
}

/// Tax service backed by the in-process engines.
#[derive(Debug, Clone, Default)]
pub struct LocalTaxService {
    config: JurisdictionConfig,
}

impl LocalTaxService {
    pub fn new(config: JurisdictionConfig) -> Self {
        LocalTaxService { config }
    }

    pub fn config(&self) -> &JurisdictionConfig {
        &self.config
    }
}

impl TaxService for LocalTaxService {
    fn name(&self) -> &str {
        "local"
    }

    fn land_transfer_tax(
        &self,
        input: &LandTransferTaxInput,
    ) -> HomePurchaseResult<LandTransferTaxOutput> {
        land_transfer_tax(input, &self.config.land_transfer)
    }

    fn cmhc_pst(&self, input: &CmhcInput) -> HomePurchaseResult<CmhcOutput> {
        cmhc_premium(input, &self.config.cmhc)
    }
}

/// A quoted 5-year fixed mortgage rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRate {
    pub apr_percent: Decimal,
    pub source: String,
    pub as_of: NaiveDate,
}

impl MarketRate {
    /// Only rates strictly between 0% and 25% are applied automatically.
    pub fn is_applicable(&self) -> bool {
        self.apr_percent > Decimal::ZERO && self.apr_percent < MAX_AUTO_APR_PERCENT
    }
}

pub trait MarketRateSource: Send + Sync {
    fn name(&self) -> &str;

    fn five_year_fixed(&self) -> HomePurchaseResult<MarketRate>;
}

/// Configured default rate; never fails.
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    pub apr_percent: Decimal,
    pub label: String,
    pub as_of: NaiveDate,
}

impl StaticRateSource {
    pub fn new(apr_percent: Decimal, as_of: NaiveDate) -> Self {
        StaticRateSource {
            apr_percent,
            label: "Fallback (DEFAULT_5Y_FIXED_APR)".into(),
            as_of,
        }
    }

    pub fn rate(&self) -> MarketRate {
        MarketRate {
            apr_percent: self.apr_percent,
            source: self.label.clone(),
            as_of: self.as_of,
        }
    }
}

impl MarketRateSource for StaticRateSource {
    fn name(&self) -> &str {
        "static"
    }

    fn five_year_fixed(&self) -> HomePurchaseResult<MarketRate> {
        Ok(self.rate())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateResolution {
    pub rate: MarketRate,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl RateResolution {
    pub fn fallback(fallback: &StaticRateSource, warning: String) -> Self {
        RateResolution {
            rate: fallback.rate(),
            used_fallback: true,
            warning: Some(warning),
        }
    }
}

/// Ask `source` for the market rate, falling back to `fallback` on failure
/// or when the quote is outside the auto-apply range.
pub fn resolve_market_rate(
    source: &dyn MarketRateSource,
    fallback: &StaticRateSource,
) -> RateResolution {
    match source.five_year_fixed() {
        Ok(rate) if rate.is_applicable() => RateResolution {
            rate,
            used_fallback: false,
            warning: None,
        },
        Ok(rate) => RateResolution::fallback(
            fallback,
            format!(
                "Quoted rate {}% from {} is outside the applicable range; using {}%",
                rate.apr_percent,
                source.name(),
                fallback.apr_percent
            ),
        ),
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "market rate lookup failed, using fallback");
            RateResolution::fallback(
                fallback,
                format!(
                    "Could not retrieve market rate from {}; using {}%",
                    source.name(),
                    fallback.apr_percent
                ),
            )
        }
    }
}
