//! Runtime settings read from the process environment (and `.env`).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 8000;
const DEFAULT_BOC_SERIES: &str = "V122521";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatesProvider {
    BankOfCanada,
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxServiceSettings {
    pub base_url: String,
    pub auth_header: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_apr_percent: Decimal,
    pub rates_provider: RatesProvider,
    pub boc_series_id: String,
    pub rates_timeout: Duration,
    /// `None` unless enabled with both a base URL and an API key.
    pub tax_service: Option<TaxServiceSettings>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let rates_provider = match get("RATES_PROVIDER").map(|v| v.to_lowercase()).as_deref() {
            None | Some("boc") => RatesProvider::BankOfCanada,
            Some("static") => RatesProvider::Static,
            Some(other) => {
                tracing::warn!(provider = other, "unknown RATES_PROVIDER, using static rate");
                RatesProvider::Static
            }
        };

        let enabled = get("TAX_SERVICE_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let tax_service = match (enabled, get("TAX_SERVICE_BASE_URL"), get("TAX_SERVICE_API_KEY")) {
            (true, Some(base_url), Some(api_key)) => Some(TaxServiceSettings {
                base_url: base_url.trim_end_matches('/').to_string(),
                auth_header: get("TAX_SERVICE_AUTH_HEADER").unwrap_or_else(|| "x-api-key".into()),
                api_key,
                timeout: millis(parsed(get("TAX_SERVICE_TIMEOUT_MS"), "TAX_SERVICE_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)),
            }),
            (true, _, _) => {
                tracing::warn!("TAX_SERVICE_ENABLED is set without a base URL and API key; using local engines");
                None
            }
            _ => None,
        };

        Settings {
            default_apr_percent: parsed(get("DEFAULT_5Y_FIXED_APR"), "DEFAULT_5Y_FIXED_APR", dec!(5.0)),
            rates_provider,
            boc_series_id: get("BOC_SERIES_ID").unwrap_or_else(|| DEFAULT_BOC_SERIES.into()),
            rates_timeout: millis(parsed(get("RATES_TIMEOUT_MS"), "RATES_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)),
            tax_service,
        }
    }
}

fn parsed<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, "unparseable setting, using default");
            default
        }),
        None => default,
    }
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
