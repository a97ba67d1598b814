use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // PLATFORM WEBHOOKS
        // ========================================
        .route(
            "/api/webhook-events",
            post(handlers::webhook_events::receive_webhook),
        )
        // ========================================
        // MERCHANT CONFIG (A026)
        // ========================================
        .route(
            "/api/config/:merchant_id",
            get(handlers::a026_merchant_config::get_config)
                .post(handlers::a026_merchant_config::save_config),
        )
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/returns",
            get(handlers::d402_returns_intelligence::get_returns),
        )
        .route(
            "/api/risk-map-data",
            get(handlers::d403_risk_map::get_risk_map_data),
        )
        .route(
            "/api/generate-report",
            get(handlers::d404_returns_report::generate_report),
        )
        // ========================================
        // USECASES
        // ========================================
        .route(
            "/api/simulate-return",
            post(handlers::u508_simulate_return::simulate_return),
        )
        .fallback_service(ServeDir::new("dist"))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors)
        .with_state(state)
}
