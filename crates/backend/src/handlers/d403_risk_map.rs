use axum::extract::State;
use axum::Json;
use contracts::dashboards::d403_risk_map::dto::RiskMapResponse;

use crate::dashboards::d403_risk_map::{fallback, service};
use crate::domain::a025_return_judgment::service::fetch_batch;
use crate::state::AppState;

/// GET /api/risk-map-data
///
/// Workflow недоступен - демо-набор данных, карта не остается пустой.
pub async fn get_risk_map_data(State(state): State<AppState>) -> Json<RiskMapResponse> {
    match fetch_batch(state.judgments.as_ref()).await {
        Ok(batch) => {
            let data = service::aggregate(&batch.records);
            tracing::info!("Risk map: {} states from {} records", data.len(), batch.records.len());
            Json(service::build_response(data))
        }
        Err(e) => {
            tracing::error!("Risk map data fetch error: {}, serving fallback data", e);
            Json(fallback::fallback_response())
        }
    }
}
