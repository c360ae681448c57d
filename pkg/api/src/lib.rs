pub mod auth;
pub mod handlers;
pub mod request_id;
pub mod server;

use pkg_state::client::RegistryStore;

/// Shared application state injected into all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: RegistryStore,
    pub api_token: String,
    pub listen_addr: String,
}
