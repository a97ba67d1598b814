use axum::extract::{Query, State};
use axum::Json;
use contracts::dashboards::d402_returns_intelligence::dto::{
    DashboardSummary, ReturnsQuery, ReturnsResponse,
};
use serde_json::Map;

use crate::dashboards::d402_returns_intelligence::service::{filter_returns, summarize};
use crate::domain::a025_return_judgment::service::fetch_batch;
use crate::state::AppState;

/// GET /api/returns
///
/// Ошибка workflow не превращается в HTTP-ошибку: нулевая сводка и поле `error`.
pub async fn get_returns(
    State(state): State<AppState>,
    Query(query): Query<ReturnsQuery>,
) -> Json<ReturnsResponse> {
    match fetch_batch(state.judgments.as_ref()).await {
        Ok(batch) => {
            let summary = summarize(&batch.records, &batch.summary);
            tracing::info!(
                "Returns dashboard: {} records, {} high risk",
                batch.records.len(),
                summary.high_risk_count
            );
            Json(ReturnsResponse {
                success: true,
                summary,
                returns: filter_returns(batch.records, &query),
                metadata: batch.metadata,
                error: None,
            })
        }
        Err(e) => {
            tracing::error!("Returns dashboard fetch error: {}", e);
            Json(ReturnsResponse {
                success: true,
                summary: DashboardSummary::default(),
                returns: Vec::new(),
                metadata: Map::new(),
                error: Some("Unable to fetch latest data".to_string()),
            })
        }
    }
}
