//! Remote jurisdiction tax service reached over authenticated JSON POSTs.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use home_purchase_core::insurance::cmhc::{CmhcInput, CmhcOutput};
use home_purchase_core::sources::TaxService;
use home_purchase_core::tax::land_transfer::{LandTransferTaxInput, LandTransferTaxOutput};
use home_purchase_core::{HomePurchaseError, HomePurchaseResult};

use crate::config::TaxServiceSettings;

const NAME: &str = "tax-service";

pub struct RemoteTaxService {
    client: reqwest::blocking::Client,
    base_url: String,
    auth_header: String,
    api_key: String,
}

/// Services either return the full breakdown or a single figure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LandTransferReply {
    Full(LandTransferTaxOutput),
    Amount(AmountReply),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PremiumTaxReply {
    Full(CmhcOutput),
    Amount(AmountReply),
}

#[derive(Debug, Deserialize)]
struct AmountReply {
    #[serde(alias = "total", alias = "pst")]
    amount: Decimal,
}

impl RemoteTaxService {
    pub fn new(settings: &TaxServiceSettings) -> HomePurchaseResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
            auth_header: settings.auth_header.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> HomePurchaseResult<R> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "tax service request");

        let response = self
            .client
            .post(&url)
            .header(self.auth_header.as_str(), self.api_key.as_str())
            .json(body)
            .send()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))?;

        if !response.status().is_success() {
            return Err(HomePurchaseError::unavailable(
                NAME,
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json::<R>()
            .map_err(|e| HomePurchaseError::unavailable(NAME, e))
    }
}

impl TaxService for RemoteTaxService {
    fn name(&self) -> &str {
        NAME
    }

    fn land_transfer_tax(
        &self,
        input: &LandTransferTaxInput,
    ) -> HomePurchaseResult<LandTransferTaxOutput> {
        let reply: LandTransferReply = self.post("land-transfer-tax", input)?;
        land_transfer_from_reply(reply, input)
    }

    fn cmhc_pst(&self, input: &CmhcInput) -> HomePurchaseResult<CmhcOutput> {
        let reply: PremiumTaxReply = self.post("cmhc-insurance-tax", input)?;
        Ok(premium_tax_from_reply(reply))
    }
}

/// A zero quote for a positive price is treated as no quote.
fn land_transfer_from_reply(
    reply: LandTransferReply,
    input: &LandTransferTaxInput,
) -> HomePurchaseResult<LandTransferTaxOutput> {
    let price = input.purchase_price;
    let out = match reply {
        LandTransferReply::Full(out) => LandTransferTaxOutput {
            purchase_price: price,
            dwelling_units: input.dwelling_units(),
            ..out
        },
        LandTransferReply::Amount(a) => LandTransferTaxOutput {
            purchase_price: price,
            dwelling_units: input.dwelling_units(),
            provincial_before_rebate: Decimal::ZERO,
            provincial_rebate_applied: Decimal::ZERO,
            provincial: Decimal::ZERO,
            municipal_before_rebate: Decimal::ZERO,
            municipal_rebate_applied: Decimal::ZERO,
            municipal: Decimal::ZERO,
            nrst: Decimal::ZERO,
            total: a.amount,
        },
    };

    if out.total <= Decimal::ZERO && price > Decimal::ZERO {
        return Err(HomePurchaseError::unavailable(NAME, "empty land transfer tax quote"));
    }
    Ok(out)
}

fn premium_tax_from_reply(reply: PremiumTaxReply) -> CmhcOutput {
    match reply {
        PremiumTaxReply::Full(out) => out,
        PremiumTaxReply::Amount(a) => CmhcOutput {
            ltv: Decimal::ZERO,
            insurable: true,
            insurance_required: true,
            premium_rate: Decimal::ZERO,
            premium: Decimal::ZERO,
            pst_rate: Decimal::ZERO,
            pst: a.amount,
        },
    }
}
