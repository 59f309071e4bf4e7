//! Bank of Canada Valet API: latest observation of a posted-rate series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

use home_purchase_core::sources::{MarketRate, MarketRateSource};
use home_purchase_core::{HomePurchaseError, HomePurchaseResult};

const VALET_BASE_URL: &str = "https://www.bankofcanada.ca/valet";
const SOURCE_LABEL: &str = "Bank of Canada (Valet)";
const NAME: &str = "bank-of-canada";

pub struct BankOfCanadaRateSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl BankOfCanadaRateSource {
    pub fn new(series_id: &str, timeout: Duration) -> HomePurchaseResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))?;

        Ok(Self {
            client,
            url: format!("{VALET_BASE_URL}/observations/{series_id}/json?recent=1"),
        })
    }
}

impl MarketRateSource for BankOfCanadaRateSource {
    fn name(&self) -> &str {
        NAME
    }

    fn five_year_fixed(&self) -> HomePurchaseResult<MarketRate> {
        tracing::debug!(url = %self.url, "fetching market rate");

        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))?;

        if !response.status().is_success() {
            return Err(HomePurchaseError::unavailable(
                NAME,
                format!("HTTP {}", response.status()),
            ));
        }

        let body: Value = response
            .json()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))?;
        parse_observation(&body)
    }
}

/// Read `observations[0]`: the date under `d`, the value under the first
/// other key's `v`.
pub fn parse_observation(body: &Value) -> HomePurchaseResult<MarketRate> {
    let obs = body
        .get("observations")
        .and_then(|o| o.get(0))
        .and_then(Value::as_object)
        .ok_or_else(|| HomePurchaseError::unavailable(NAME, "no observations in response"))?;

    let raw = obs
        .iter()
        .find(|(k, _)| k.as_str() != "d")
        .and_then(|(_, series)| series.get("v"))
        .ok_or_else(|| HomePurchaseError::unavailable(NAME, "observation has no value"))?;

    let apr_percent = match raw {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
    .ok_or_else(|| HomePurchaseError::unavailable(NAME, format!("non-numeric value {raw}")))?;

    let as_of = obs
        .get("d")
        .and_then(Value::as_str)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .ok_or_else(|| HomePurchaseError::unavailable(NAME, "observation has no date"))?;

    Ok(MarketRate {
        apr_percent,
        source: SOURCE_LABEL.into(),
        as_of,
    })
}
