pub mod brackets;
pub mod land_transfer;
