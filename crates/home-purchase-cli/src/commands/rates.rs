use chrono::Local;
use serde_json::json;

use home_purchase_core::sources::{resolve_market_rate, RateResolution, StaticRateSource};

use super::{CommandResult, Context};
use crate::sources;

/// Resolve the current 5-year fixed rate through the configured provider.
pub fn current_rate(ctx: &Context) -> RateResolution {
    let fallback = StaticRateSource::new(ctx.settings.default_apr_percent, Local::now().date_naive());

    match sources::market_rate_source(&ctx.settings, &fallback) {
        Ok(source) => resolve_market_rate(source.as_ref(), &fallback),
        Err(e) => {
            tracing::warn!(error = %e, "market rate source could not be created");
            RateResolution::fallback(
                &fallback,
                format!("Market rate source unavailable ({e}); using {}%", fallback.apr_percent),
            )
        }
    }
}

pub fn run_market_rate(ctx: &Context) -> CommandResult {
    let resolution = current_rate(ctx);
    Ok(json!({
        "result": {
            "currency": "CAD",
            "aprPercent": resolution.rate.apr_percent,
            "source": resolution.rate.source,
            "asOf": resolution.rate.as_of,
            "usedFallback": resolution.used_fallback,
        },
        "methodology": "Latest 5-year conventional mortgage rate observation",
        "warnings": resolution.warning.into_iter().collect::<Vec<_>>(),
    }))
}
