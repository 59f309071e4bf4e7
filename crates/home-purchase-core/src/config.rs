use serde::{Deserialize, Serialize};

use crate::insurance::cmhc::CmhcSchedule;
use crate::tax::land_transfer::LandTransferTaxSchedule;

/// Rate tables for one jurisdiction-year. Missing sections fall back to the
/// built-in Ontario/Toronto and national CMHC schedules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JurisdictionConfig {
    pub land_transfer: LandTransferTaxSchedule,
    pub cmhc: CmhcSchedule,
}
