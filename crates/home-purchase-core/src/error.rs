use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomePurchaseError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Uninsurable: loan-to-value {ltv} exceeds the 95% CMHC ceiling")]
    Uninsurable { ltv: Decimal },

    #[error("External source unavailable: {source_name}: {reason}")]
    ExternalSourceUnavailable { source_name: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl HomePurchaseError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        HomePurchaseError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unavailable(source_name: &str, reason: impl std::fmt::Display) -> Self {
        HomePurchaseError::ExternalSourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for HomePurchaseError {
    fn from(e: serde_json::Error) -> Self {
        HomePurchaseError::SerializationError(e.to_string())
    }
}
