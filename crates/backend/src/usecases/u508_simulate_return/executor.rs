use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u508_simulate_return::{
    SimulateReturn, SimulateReturnRequest, SimulateReturnResponse,
};

use super::payload::{build_mock_payload, enrich_event};
use crate::domain::a026_merchant_config::service::{get_config, resolve_forward_url};
use crate::domain::a026_merchant_config::ConfigStore;
use crate::shared::forwarder::{ForwardError, Forwarder};

/// Executor для UseCase симуляции возврата
pub struct SimulateReturnExecutor {
    config_store: Arc<dyn ConfigStore>,
    forwarder: Arc<dyn Forwarder>,
    default_url: Option<String>,
    forward_timeout: Duration,
}

impl SimulateReturnExecutor {
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        forwarder: Arc<dyn Forwarder>,
        default_url: Option<String>,
        forward_timeout: Duration,
    ) -> Self {
        Self {
            config_store,
            forwarder,
            default_url,
            forward_timeout,
        }
    }

    /// Построить событие и переслать его мерчанту
    ///
    /// Ошибкой считается только сбой хранилища настроек. Без URL - demo-режим
    /// без сетевого вызова; сбой пересылки виден только в note/boltic_error.
    pub async fn execute(&self, request: SimulateReturnRequest) -> anyhow::Result<SimulateReturnResponse> {
        let now = Utc::now();
        let payload = build_mock_payload(&request, now);
        tracing::info!(
            "{}: {} return {} for company {}",
            SimulateReturn::full_name(),
            request.scenario.as_str(),
            payload.return_id,
            request.company_id
        );

        let config = get_config(self.config_store.as_ref(), &request.company_id).await?;
        let Some(url) = resolve_forward_url(&config, self.default_url.as_deref()) else {
            tracing::info!("No forwarding URL configured, demo mode");
            return Ok(SimulateReturnResponse {
                success: true,
                message: "Return request simulated successfully (demo mode)".to_string(),
                payload,
                demo_mode: Some(true),
                boltic_status: None,
                boltic_error: None,
                note: None,
            });
        };

        let enriched = enrich_event(serde_json::to_value(&payload)?, &config.rules, now);
        tracing::debug!("Forwarding payload: {}", enriched);

        let result = match tokio::time::timeout(
            self.forward_timeout,
            self.forwarder.forward(&url, &enriched),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ForwardError::Timeout),
        };

        Ok(match result {
            Ok(status) => {
                tracing::info!("Return request sent successfully: {}", payload.return_id);
                SimulateReturnResponse {
                    success: true,
                    message: "Return request submitted successfully".to_string(),
                    payload,
                    demo_mode: None,
                    boltic_status: Some(status),
                    boltic_error: None,
                    note: None,
                }
            }
            Err(e) => {
                tracing::error!("Workflow forward failed for {}: {}", payload.return_id, e);
                SimulateReturnResponse {
                    success: true,
                    message: "Return request received and is being processed".to_string(),
                    payload,
                    demo_mode: None,
                    boltic_status: None,
                    boltic_error: Some(e.short_description()),
                    note: Some("Processing may take a moment".to_string()),
                }
            }
        })
    }
}
