use axum::{
    Json,
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;
use pkg_constants::registry::CLUSTER_ROLE_BINDING_PREFIX;
use pkg_state::keys;
use pkg_types::rbac::ClusterRoleBinding;
use pkg_types::validate::validate_cluster_role_binding;
use pkg_types::view::ClusterRoleBindingView;

/// POST /api/v1/clusterrolebindings - record a cluster binding.
pub async fn create_cluster_role_binding(
    State(state): State<AppState>,
    Json(mut crb): Json<ClusterRoleBinding>,
) -> impl IntoResponse {
    crb.uid = Uuid::new_v4().to_string();
    crb.created_at = Utc::now();

    if let Err(e) = validate_cluster_role_binding(&crb) {
        warn!("Rejected cluster role binding {}: {}", crb.name, e);
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let key = keys::cluster_role_binding_key(&crb.name);
    match state.store.contains(&key).await {
        Ok(true) => {
            return (StatusCode::CONFLICT, "Cluster role binding already exists").into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!("Failed to check for existing cluster role binding: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    if let Err(e) = state.store.put_json(&key, &crb).await {
        error!("Failed to store cluster role binding: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to store cluster role binding",
        )
            .into_response();
    }
    info!("Recorded cluster role binding {} (uid={})", crb.name, crb.uid);
    (StatusCode::CREATED, Json(crb)).into_response()
}

/// GET /api/v1/clusterrolebindings - list cluster binding views.
pub async fn list_cluster_role_bindings(State(state): State<AppState>) -> impl IntoResponse {
    let bindings: Vec<ClusterRoleBinding> =
        match state.store.list_json(CLUSTER_ROLE_BINDING_PREFIX).await {
            Ok(b) => b,
            Err(e) => {
                error!("Failed to list cluster role bindings: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to list cluster role bindings",
                )
                    .into_response();
            }
        };
    let views: Vec<ClusterRoleBindingView> =
        bindings.iter().map(ClusterRoleBindingView::from).collect();
    (StatusCode::OK, Json(views)).into_response()
}

/// GET /api/v1/clusterrolebindings/{name} - single cluster binding view.
pub async fn get_cluster_role_binding(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let key = keys::cluster_role_binding_key(&name);
    match state.store.get_json::<ClusterRoleBinding>(&key).await {
        Ok(Some(crb)) => (StatusCode::OK, Json(ClusterRoleBindingView::from(&crb))).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to fetch cluster role binding {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// DELETE /api/v1/clusterrolebindings/{name} - idempotent delete.
pub async fn delete_cluster_role_binding(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
) -> impl IntoResponse {
    let key = keys::cluster_role_binding_key(&name);
    match state.store.delete(&key).await {
        Ok(_) => {
            info!("Deleted cluster role binding {}", name);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!("Failed to delete cluster role binding {}: {}", name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
