//! HTTP-backed collaborators for the core engines.

pub mod boc;
pub mod remote;

use home_purchase_core::sources::{LocalTaxService, MarketRateSource, StaticRateSource, TaxService};
use home_purchase_core::config::JurisdictionConfig;
use home_purchase_core::HomePurchaseResult;

use crate::config::{RatesProvider, Settings};

/// Rate source selected by `RATES_PROVIDER`.
pub fn market_rate_source(
    settings: &Settings,
    fallback: &StaticRateSource,
) -> HomePurchaseResult<Box<dyn MarketRateSource>> {
    Ok(match settings.rates_provider {
        RatesProvider::BankOfCanada => Box::new(boc::BankOfCanadaRateSource::new(
            &settings.boc_series_id,
            settings.rates_timeout,
        )?),
        RatesProvider::Static => Box::new(fallback.clone()),
    })
}

/// Remote tax service when configured, otherwise the in-process engines.
pub fn tax_service(
    settings: &Settings,
    config: &JurisdictionConfig,
) -> HomePurchaseResult<Box<dyn TaxService>> {
    Ok(match &settings.tax_service {
        Some(remote) => Box::new(remote::RemoteTaxService::new(remote)?),
        None => Box::new(LocalTaxService::new(config.clone())),
    })
}
