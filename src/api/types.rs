use serde::{Deserialize, Serialize};
use crate::types::*;

#[derive(Clone, Debug, Deserialize)]
pub struct AssessRequest {
    pub address: String,
    #[serde(default)]
    pub options: AssessOptions,
}

impl AssessRequest {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            options: AssessOptions::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AssessOptions {
    #[serde(default = "default_true")]
    pub include_holders: bool,
    #[serde(default = "default_true")]
    pub include_liquidity: bool,
    #[serde(default)]
    pub force_refresh: bool,
}

fn default_true() -> bool { true }

impl Default for AssessOptions {
    fn default() -> Self {
        Self {
            include_holders: true,
            include_liquidity: true,
            force_refresh: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AssessResponse {
    pub schema_version: String,
    pub assessment_id: String,
    pub requested_at: String,
    pub address: String,
    pub status: AssessmentStatus,
    pub report: RiskReport,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Ok,
    Partial,
    Error,
}
