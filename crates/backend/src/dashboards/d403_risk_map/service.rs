use std::collections::HashMap;

use contracts::dashboards::d403_risk_map::dto::{Coordinates, PincodeRisk, RiskMapResponse, StateRisk};
use contracts::domain::a025_return_judgment::aggregate::JudgmentRecord;
use contracts::enums::risk_tier::RiskTier;

use super::geo::{is_valid_pincode, pincode_coordinates, round6, state_center};
use crate::domain::a025_return_judgment::mapper::UNKNOWN;

#[derive(Debug, Default)]
struct PincodeAcc {
    pincode: String,
    returns: u64,
    high_risk_count: u64,
    total_fraud_score: f64,
    points: Vec<Coordinates>,
}

#[derive(Debug, Default)]
struct StateAcc {
    state: String,
    total_returns: u64,
    high_risk_count: u64,
    total_fraud_score: f64,
    pincodes: Vec<PincodeAcc>,
    pincode_index: HashMap<String, usize>,
}

impl StateAcc {
    fn pincode_mut(&mut self, pincode: &str) -> &mut PincodeAcc {
        let idx = match self.pincode_index.get(pincode) {
            Some(&idx) => idx,
            None => {
                self.pincodes.push(PincodeAcc {
                    pincode: pincode.to_string(),
                    ..Default::default()
                });
                let idx = self.pincodes.len() - 1;
                self.pincode_index.insert(pincode.to_string(), idx);
                idx
            }
        };
        &mut self.pincodes[idx]
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn average(total: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        round1(total / count as f64)
    }
}

/// Ключ группы пинкода: подставленный резервный пинкод группируется как "Unknown"
fn pincode_key(record: &JudgmentRecord) -> &str {
    if record.delivery_pincode_inferred || record.delivery_pincode.is_empty() {
        UNKNOWN
    } else {
        &record.delivery_pincode
    }
}

/// Сгруппировать записи по штату и пинкоду
///
/// Порядок штатов и пинкодов - порядок первого появления. Группа "Unknown"
/// учитывается в итогах штата, но в список пинкодов не попадает.
pub fn aggregate(records: &[JudgmentRecord]) -> Vec<StateRisk> {
    let mut states: Vec<StateAcc> = Vec::new();
    let mut state_index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let state_name = if record.delivery_state.is_empty() {
            UNKNOWN
        } else {
            record.delivery_state.as_str()
        };
        let idx = *state_index.entry(state_name.to_string()).or_insert_with(|| {
            states.push(StateAcc {
                state: state_name.to_string(),
                ..Default::default()
            });
            states.len() - 1
        });
        let state = &mut states[idx];

        let fraud_score = record.fraud_score.unwrap_or(0.0);
        let high_risk = record.is_high_risk();

        state.total_returns += 1;
        state.total_fraud_score += fraud_score;
        if high_risk {
            state.high_risk_count += 1;
        }

        let key = pincode_key(record).to_string();
        let pincode = state.pincode_mut(&key);
        pincode.returns += 1;
        pincode.total_fraud_score += fraud_score;
        if high_risk {
            pincode.high_risk_count += 1;
        }
        if is_valid_pincode(&key) {
            pincode.points.push(pincode_coordinates(&key));
        }
    }

    states
        .into_iter()
        .map(|state| {
            let center = state_center(&state.state);
            let pincodes = state
                .pincodes
                .into_iter()
                .filter(|p| p.pincode != UNKNOWN)
                .map(|p| {
                    let coordinates = if p.points.is_empty() {
                        center
                    } else {
                        let n = p.points.len() as f64;
                        Coordinates {
                            lat: round6(p.points.iter().map(|c| c.lat).sum::<f64>() / n),
                            lng: round6(p.points.iter().map(|c| c.lng).sum::<f64>() / n),
                        }
                    };
                    PincodeRisk {
                        avg_fraud_score: average(p.total_fraud_score, p.returns),
                        risk_level: RiskTier::for_pincode(p.high_risk_count),
                        pincode: p.pincode,
                        returns: p.returns,
                        high_risk_count: p.high_risk_count,
                        coordinates,
                    }
                })
                .collect();

            StateRisk {
                avg_fraud_score: average(state.total_fraud_score, state.total_returns),
                risk_level: RiskTier::for_state(state.high_risk_count),
                state: state.state,
                total_returns: state.total_returns,
                high_risk_count: state.high_risk_count,
                pincodes,
            }
        })
        .collect()
}

/// Ответ карты: число штатов и число пинкодов высокого риска
pub fn build_response(data: Vec<StateRisk>) -> RiskMapResponse {
    let total_high_risk_locations = data
        .iter()
        .flat_map(|s| s.pincodes.iter())
        .filter(|p| p.risk_level == RiskTier::High)
        .count();
    RiskMapResponse {
        success: true,
        total_states: data.len(),
        total_high_risk_locations,
        data,
    }
}
