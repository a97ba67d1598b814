pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod state;
pub mod system;
pub mod usecases;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::domain::a026_merchant_config::repository::SqliteConfigStore;
use crate::shared::forwarder::HttpForwarder;
use crate::shared::workflow::WorkflowApiClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let db_path = shared::config::get_database_path(&config)?;
    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let judgments = WorkflowApiClient::new(
        config.upstream.workflow_url.clone(),
        config.upstream.timeout(),
    )?;
    tracing::info!("Workflow endpoint: {}", judgments.url());
    let forwarder = HttpForwarder::new(config.forwarder.timeout())?;

    let port = config.server.port;
    let state = AppState::new(
        config,
        Arc::new(judgments),
        Arc::new(SqliteConfigStore::new(conn)),
        Arc::new(forwarder),
    );
    let app = routes::configure_routes(state);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
