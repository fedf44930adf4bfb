//! API Gateway Library
//!
//! The JSON:API HTTP surface: routing, bearer-token authentication, the
//! document codec and one handler module per resource.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod jsonapi;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use auth_service_lib::Authenticator;
use resource_service_lib::infra::Database;
use resource_service_lib::service::Services;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the store, apply migrations and serve HTTP until shutdown.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Create services and token verifier
    let services = Arc::new(Services::from_database(db));
    let verifier = Arc::new(Authenticator::new(&config.jwt));

    let state = AppState::new(services, verifier);
    let app = create_router(state);

    // Build address
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
