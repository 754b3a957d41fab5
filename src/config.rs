use serde::Deserialize;

/// PostgreSQL connection settings, each independently overridable.
#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub db: DbConfig,
    pub dev_seed: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "db".into()),
            name: std::env::var("POSTGRES_DB").unwrap_or_else(|_| "hackathondb".into()),
            user: std::env::var("POSTGRES_USER").unwrap_or_else(|_| "user".into()),
            password: std::env::var("POSTGRES_PASSWORD").unwrap_or_else(|_| "password".into()),
            port: std::env::var("DB_PORT")
                .ok()
                .map(|v| v.parse::<u16>())
                .transpose()
                .map_err(|e| anyhow::anyhow!("invalid DB_PORT: {e}"))?
                .unwrap_or(5432),
        };
        let dev_seed = std::env::var("DEV_SEED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Ok(Self { db, dev_seed })
    }
}
