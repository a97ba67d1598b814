use serde::{Deserialize, Serialize};

use crate::enums::risk_tier::RiskTier;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Risk aggregate for a single pincode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PincodeRisk {
    pub pincode: String,
    pub returns: u64,
    pub high_risk_count: u64,
    pub avg_fraud_score: f64,
    pub risk_level: RiskTier,
    pub coordinates: Coordinates,
}

/// Risk aggregate for a state with its pincode breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRisk {
    pub state: String,
    pub total_returns: u64,
    pub high_risk_count: u64,
    pub avg_fraud_score: f64,
    pub risk_level: RiskTier,
    pub pincodes: Vec<PincodeRisk>,
}

/// Response for GET /api/risk-map-data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMapResponse {
    pub success: bool,
    pub data: Vec<StateRisk>,
    pub total_states: usize,
    pub total_high_risk_locations: usize,
}
