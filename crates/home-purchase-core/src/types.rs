use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// All monetary values (CAD). Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Percentages are named `*_percent`.
pub type Rate = Decimal;

/// Round a currency amount to the cent, half away from zero. The result
/// always carries two decimal places.
pub fn round_cents(amount: Money) -> Money {
    let mut cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    cents.rescale(2);
    cents
}

/// Round to `dp` decimal places, half away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Province code used for CMHC premium sales tax.
///
/// Accepts codes or full names on input; anything unrecognised is `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Province {
    #[default]
    #[serde(rename = "ON", alias = "on", alias = "Ontario", alias = "ONTARIO")]
    On,
    #[serde(rename = "QC", alias = "qc", alias = "Quebec", alias = "QUEBEC")]
    Qc,
    #[serde(rename = "SK", alias = "sk", alias = "Saskatchewan", alias = "SASKATCHEWAN")]
    Sk,
    #[serde(rename = "OTHER")]
    #[serde(other)]
    Other,
}

impl Province {
    pub fn code(&self) -> &'static str {
        match self {
            Province::On => "ON",
            Province::Qc => "QC",
            Province::Sk => "SK",
            Province::Other => "OTHER",
        }
    }
}

impl FromStr for Province {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "ON" | "ONTARIO" => Province::On,
            "QC" | "QUEBEC" => Province::Qc,
            "SK" | "SASKATCHEWAN" => Province::Sk,
            _ => Province::Other,
        })
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Detached,
    #[serde(rename = "Semi-Detached")]
    SemiDetached,
    #[serde(rename = "Town-house", alias = "Townhouse")]
    Townhouse,
    Condominium,
}

impl PropertyType {
    /// Dwelling type only refines detached and semi-detached houses.
    pub fn has_dwelling_type(&self) -> bool {
        matches!(self, PropertyType::Detached | PropertyType::SemiDetached)
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' ', '_'], "").as_str() {
            "detached" => Ok(PropertyType::Detached),
            "semidetached" => Ok(PropertyType::SemiDetached),
            "townhouse" => Ok(PropertyType::Townhouse),
            "condominium" | "condo" => Ok(PropertyType::Condominium),
            other => Err(format!("unknown property type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DwellingType {
    #[default]
    #[serde(rename = "Single Family")]
    SingleFamily,
    Duplex,
    #[serde(alias = "Tri-plex")]
    Triplex,
    #[serde(rename = "Four-plex", alias = "Fourplex")]
    Fourplex,
    Multiplex,
    #[serde(other)]
    Other,
}

impl DwellingType {
    /// Number of dwelling units; unrecognised types count as one.
    pub fn units(&self) -> u32 {
        match self {
            DwellingType::SingleFamily => 1,
            DwellingType::Duplex => 2,
            DwellingType::Triplex => 3,
            DwellingType::Fourplex => 4,
            DwellingType::Multiplex => 5,
            DwellingType::Other => 1,
        }
    }
}

impl FromStr for DwellingType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(
            match s.trim().to_lowercase().replace(['-', ' ', '_'], "").as_str() {
                "singlefamily" | "single" => DwellingType::SingleFamily,
                "duplex" => DwellingType::Duplex,
                "triplex" => DwellingType::Triplex,
                "fourplex" => DwellingType::Fourplex,
                "multiplex" => DwellingType::Multiplex,
                _ => DwellingType::Other,
            },
        )
    }
}

/// How a CMHC premium is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CmhcHandling {
    /// Added to the mortgage principal.
    #[default]
    Finance,
    /// Paid in cash at closing.
    Upfront,
}

impl FromStr for CmhcHandling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "finance" | "financed" => Ok(CmhcHandling::Finance),
            "upfront" | "closing" => Ok(CmhcHandling::Upfront),
            other => Err(format!("unknown CMHC handling '{other}' (expected finance|upfront)")),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
