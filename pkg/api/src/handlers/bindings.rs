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
use pkg_constants::registry::ROLE_BINDING_PREFIX;
use pkg_state::keys;
use pkg_types::rbac::RoleBinding;
use pkg_types::validate::validate_role_binding;
use pkg_types::view::RoleBindingView;

/// POST /api/v1/namespaces/{ns}/rolebindings - record a binding.
pub async fn create_role_binding(
    State(state): State<AppState>,
    AxumPath(ns): AxumPath<String>,
    Json(mut rb): Json<RoleBinding>,
) -> impl IntoResponse {
    rb.uid = Uuid::new_v4().to_string();
    rb.namespace = ns;
    rb.created_at = Utc::now();

    if let Err(e) = validate_role_binding(&rb) {
        warn!("Rejected role binding {}/{}: {}", rb.namespace, rb.name, e);
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    let key = keys::role_binding_key(&rb.namespace, &rb.name);
    match state.store.contains(&key).await {
        Ok(true) => {
            return (StatusCode::CONFLICT, "Role binding already exists").into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!("Failed to check for existing role binding: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    if let Err(e) = state.store.put_json(&key, &rb).await {
        error!("Failed to store role binding: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to store role binding",
        )
            .into_response();
    }
    info!(
        "Recorded role binding {}/{} (uid={})",
        rb.namespace, rb.name, rb.uid
    );
    (StatusCode::CREATED, Json(rb)).into_response()
}

/// GET /api/v1/namespaces/{ns}/rolebindings - list binding views in a namespace.
pub async fn list_role_bindings(
    State(state): State<AppState>,
    AxumPath(ns): AxumPath<String>,
) -> impl IntoResponse {
    let prefix = keys::role_binding_ns_prefix(&ns);
    let bindings: Vec<RoleBinding> = match state.store.list_json(&prefix).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to list role bindings in {}: {}", ns, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list role bindings",
            )
                .into_response();
        }
    };
    let views: Vec<RoleBindingView> = bindings.iter().map(RoleBindingView::from).collect();
    (StatusCode::OK, Json(views)).into_response()
}

/// GET /api/v1/rolebindings - list binding views across all namespaces.
pub async fn list_all_role_bindings(State(state): State<AppState>) -> impl IntoResponse {
    let bindings: Vec<RoleBinding> = match state.store.list_json(ROLE_BINDING_PREFIX).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to list role bindings: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list role bindings",
            )
                .into_response();
        }
    };
    let views: Vec<RoleBindingView> = bindings.iter().map(RoleBindingView::from).collect();
    (StatusCode::OK, Json(views)).into_response()
}

/// GET /api/v1/namespaces/{ns}/rolebindings/{name} - single binding view.
pub async fn get_role_binding(
    State(state): State<AppState>,
    AxumPath((ns, name)): AxumPath<(String, String)>,
) -> impl IntoResponse {
    let key = keys::role_binding_key(&ns, &name);
    match state.store.get_json::<RoleBinding>(&key).await {
        Ok(Some(rb)) => (StatusCode::OK, Json(RoleBindingView::from(&rb))).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to fetch role binding {}/{}: {}", ns, name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// DELETE /api/v1/namespaces/{ns}/rolebindings/{name} - idempotent delete.
pub async fn delete_role_binding(
    State(state): State<AppState>,
    AxumPath((ns, name)): AxumPath<(String, String)>,
) -> impl IntoResponse {
    let key = keys::role_binding_key(&ns, &name);
    match state.store.delete(&key).await {
        Ok(_) => {
            info!("Deleted role binding {}/{}", ns, name);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            error!("Failed to delete role binding {}/{}: {}", ns, name, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
