mod app;
mod auth;
mod config;
mod db;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "studentauth=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init()?;

    // Best-effort bootstrap: the server still starts if the store is not
    // reachable yet and reports degraded health until it is.
    match state.db.acquire().await {
        Ok(mut conn) => {
            if let Err(e) = auth::repo::ensure_schema(&mut conn).await {
                tracing::warn!(error = %e, "schema bootstrap failed; continuing");
            } else {
                tracing::info!("schema ensured");
                if state.config.dev_seed {
                    if let Err(e) = auth::services::seed_dev_user(&state.db).await {
                        tracing::warn!(error = %e, "dev seed failed; continuing");
                    }
                }
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "database not reachable at startup; continuing")
        }
    }

    let app = app::build_app(state);
    app::serve(app).await
}
