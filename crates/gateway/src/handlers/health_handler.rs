//! Liveness endpoint, served outside the authenticated prefix.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Healthy,
    Unhealthy,
    Degraded,
}

/// Outcome of checking one dependency.
#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Dependencies {
    pub database: DependencyCheck,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub services: Dependencies,
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// 200 when the store answers, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let database = match state.services.health().ping().await {
        Ok(()) => DependencyCheck {
            status: Status::Healthy,
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            DependencyCheck {
                status: Status::Unhealthy,
                error: Some(e.user_message()),
            }
        }
    };

    let (code, status) = match database.status {
        Status::Healthy => (StatusCode::OK, Status::Healthy),
        _ => (StatusCode::SERVICE_UNAVAILABLE, Status::Degraded),
    };

    (
        code,
        Json(HealthReport {
            status,
            services: Dependencies { database },
        }),
    )
}
