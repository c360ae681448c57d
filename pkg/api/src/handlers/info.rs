use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;
use pkg_constants::registry::{CLUSTER_ROLE_BINDING_PREFIX, ROLE_BINDING_PREFIX};

/// Service metadata returned by `GET /api/v1/info`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub endpoint: String,
    pub version: String,
    pub state_store: String,
    pub role_binding_count: usize,
    pub cluster_role_binding_count: usize,
}

/// GET /api/v1/info - service metadata and registry counts.
pub async fn service_info(State(state): State<AppState>) -> impl IntoResponse {
    let role_bindings = state
        .store
        .count_prefix(ROLE_BINDING_PREFIX)
        .await
        .unwrap_or_default();
    let cluster_role_bindings = state
        .store
        .count_prefix(CLUSTER_ROLE_BINDING_PREFIX)
        .await
        .unwrap_or_default();

    let info = ServiceInfo {
        endpoint: format!("http://{}", state.listen_addr),
        version: concat!("v", env!("CARGO_PKG_VERSION")).to_string(),
        state_store: "SlateDB (local)".to_string(),
        role_binding_count: role_bindings,
        cluster_role_binding_count: cluster_role_bindings,
    };
    (StatusCode::OK, Json(info)).into_response()
}

/// GET /healthz - liveness probe, unauthenticated.
pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
