use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a026_merchant_config::aggregate::{MerchantConfig, SaveConfigResponse};
use contracts::shared::api_response::ErrorResponse;

use crate::domain::a026_merchant_config::service;
use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn storage_error(e: anyhow::Error) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(e.to_string())),
    )
}

/// GET /api/config/:merchant_id
pub async fn get_config(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
) -> Result<Json<MerchantConfig>, ApiError> {
    service::get_config(state.config_store.as_ref(), &merchant_id)
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Config fetch error for company {}: {}", merchant_id, e);
            storage_error(e)
        })
}

/// POST /api/config/:merchant_id
pub async fn save_config(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
    Json(config): Json<MerchantConfig>,
) -> Result<Json<SaveConfigResponse>, ApiError> {
    match service::save_config(state.config_store.as_ref(), &merchant_id, config).await {
        Ok(_) => Ok(Json(SaveConfigResponse {
            success: true,
            message: "Configuration saved".to_string(),
        })),
        Err(e) => {
            tracing::error!("Config save error for company {}: {}", merchant_id, e);
            Err(storage_error(e))
        }
    }
}
