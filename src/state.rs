use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Db;

#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = Db::new(&config.db);
        Ok(Self { db, config })
    }

    pub fn from_parts(db: Db, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}
