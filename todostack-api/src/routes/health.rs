/// Health endpoint
///
/// `GET /health` is the only unauthenticated route besides `/v1/auth`.
/// It reports whether the process is up and whether the database
/// answers, reusing the same probe the pool runs at startup. A broken
/// database degrades the status instead of failing the request, so load
/// balancers can still read the body.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todostack_shared::db::pool;

/// Health report returned to probes
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Crate version of the running binary
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports process and database health
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_ok = pool::health_check(&state.db).await.is_ok();

    Ok(Json(HealthResponse {
        status: if database_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok { "connected" } else { "disconnected" }.to_string(),
    }))
}
