use std::sync::Arc;

use equipmart_db::DbPool;

use crate::config::ServerConfig;

/// Handler state. Clones share the pool and the config.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
