use contracts::dashboards::d403_risk_map::dto::{Coordinates, PincodeRisk, RiskMapResponse, StateRisk};
use contracts::enums::risk_tier::RiskTier;

/// Итоги, которые показывает демо-карта вместе с резервными данными
const FALLBACK_TOTAL_STATES: usize = 28;
const FALLBACK_HIGH_RISK_LOCATIONS: usize = 15;

fn pincode(
    pincode: &str,
    returns: u64,
    high_risk_count: u64,
    avg_fraud_score: f64,
    risk_level: RiskTier,
    lat: f64,
    lng: f64,
) -> PincodeRisk {
    PincodeRisk {
        pincode: pincode.to_string(),
        returns,
        high_risk_count,
        avg_fraud_score,
        risk_level,
        coordinates: Coordinates { lat, lng },
    }
}

/// Фиксированный набор данных карты на случай недоступности workflow
pub fn fallback_risk_data() -> Vec<StateRisk> {
    vec![
        StateRisk {
            state: "Maharashtra".to_string(),
            total_returns: 45,
            high_risk_count: 8,
            avg_fraud_score: 6.2,
            risk_level: RiskTier::High,
            pincodes: vec![
                pincode("400001", 12, 3, 7.1, RiskTier::High, 18.9220, 72.8347),
                pincode("411001", 8, 2, 5.8, RiskTier::Medium, 18.5204, 73.8567),
            ],
        },
        StateRisk {
            state: "Delhi".to_string(),
            total_returns: 32,
            high_risk_count: 5,
            avg_fraud_score: 5.9,
            risk_level: RiskTier::Medium,
            pincodes: vec![
                pincode("110001", 15, 3, 6.4, RiskTier::High, 28.6139, 77.2090),
                pincode("110092", 6, 1, 4.2, RiskTier::Medium, 28.6505, 77.2311),
            ],
        },
        StateRisk {
            state: "Karnataka".to_string(),
            total_returns: 28,
            high_risk_count: 4,
            avg_fraud_score: 5.1,
            risk_level: RiskTier::Medium,
            pincodes: vec![pincode("560001", 14, 2, 5.7, RiskTier::Medium, 12.9716, 77.5946)],
        },
    ]
}

pub fn fallback_response() -> RiskMapResponse {
    RiskMapResponse {
        success: true,
        data: fallback_risk_data(),
        total_states: FALLBACK_TOTAL_STATES,
        total_high_risk_locations: FALLBACK_HIGH_RISK_LOCATIONS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_response() {
        let response = fallback_response();
        assert!(response.success);
        assert_eq!(response.data.len(), 3);
        assert_eq!(response.total_states, 28);
        assert_eq!(response.total_high_risk_locations, 15);
        assert_eq!(response.data[1].pincodes[0].pincode, "110001");
    }
}
