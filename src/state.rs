use std::sync::Arc;

use campusdesk_auth::{FileSessionStore, HttpTransport, RouteGate, SessionExchange, SessionStore};
use campusdesk_config::{ApiConfig, RedirectConfig, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<SessionExchange<HttpTransport>>,
    pub store: Arc<dyn SessionStore>,
    pub gate: RouteGate,
    pub redirect_config: RedirectConfig,
}

impl AppState {
    pub fn new(
        exchange: SessionExchange<HttpTransport>,
        store: Arc<dyn SessionStore>,
        redirect_config: RedirectConfig,
    ) -> Self {
        Self {
            exchange: Arc::new(exchange),
            gate: RouteGate::new(Arc::clone(&store)),
            store,
            redirect_config,
        }
    }
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    let api_config = ApiConfig::from_env();
    let storage_config = StorageConfig::from_env();

    let transport = HttpTransport::new(api_config.timeout)?;
    let store = Arc::new(FileSessionStore::new(storage_config.session_path));

    Ok(AppState::new(
        SessionExchange::new(transport, api_config),
        store,
        RedirectConfig::from_env(),
    ))
}
