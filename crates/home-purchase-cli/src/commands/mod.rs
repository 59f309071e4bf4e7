pub mod cmhc;
pub mod land_transfer;
pub mod mortgage;
pub mod rates;
pub mod summary;

use home_purchase_core::config::JurisdictionConfig;

use crate::config::Settings;

/// Shared state handed to every command runner.
pub struct Context {
    pub settings: Settings,
    pub jurisdiction: JurisdictionConfig,
}

/// Result type returned by command runners.
pub type CommandResult = Result<serde_json::Value, Box<dyn std::error::Error>>;

/// Deserialise from `--input`, else piped stdin, else `None` so the caller
/// builds the input from flags.
pub fn document_input<T: serde::de::DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(crate::input::file::read_document(path)?));
    }
    match crate::input::stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}
