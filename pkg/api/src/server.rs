use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::AppState;
use crate::auth::auth_middleware;
use crate::handlers::{bindings, cluster_bindings, info as info_handler};
use crate::request_id::request_id_middleware;
use pkg_state::client::RegistryStore;

/// Server configuration passed from the binary's CLI.
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub data_dir: String,
    pub api_token: String,
}

pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let store = RegistryStore::open(&config.data_dir).await?;

    let state = AppState {
        store,
        api_token: config.api_token,
        listen_addr: config.addr.to_string(),
    };

    // Protected API routes
    let api_routes = Router::new()
        .route("/api/v1/info", get(info_handler::service_info))
        .route(
            "/api/v1/rolebindings",
            get(bindings::list_all_role_bindings),
        )
        .route(
            "/api/v1/namespaces/{ns}/rolebindings",
            post(bindings::create_role_binding).get(bindings::list_role_bindings),
        )
        .route(
            "/api/v1/namespaces/{ns}/rolebindings/{name}",
            get(bindings::get_role_binding).delete(bindings::delete_role_binding),
        )
        .route(
            "/api/v1/clusterrolebindings",
            post(cluster_bindings::create_cluster_role_binding)
                .get(cluster_bindings::list_cluster_role_bindings),
        )
        .route(
            "/api/v1/clusterrolebindings/{name}",
            get(cluster_bindings::get_cluster_role_binding)
                .delete(cluster_bindings::delete_cluster_role_binding),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes + merged
    let app = Router::new()
        .route("/healthz", get(info_handler::healthz))
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state);

    info!("Starting rbacview API server on {}", config.addr);
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
