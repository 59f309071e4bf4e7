pub mod config;
pub mod error;
pub mod insurance;
pub mod mortgage;
pub mod sources;
pub mod summary;
pub mod tax;
pub mod types;

pub use error::HomePurchaseError;
pub use types::*;

/// Standard result type for all home-purchase operations
pub type HomePurchaseResult<T> = Result<T, HomePurchaseError>;
