use std::sync::Arc;

use anyhow::Context;
use taskdeck::{app_state::AppState, map_routes, settings::Settings, DataContext};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    // ── Storage ────────────────────────────────────────────────
    let data_context = DataContext::new(&settings.database_path)
        .with_context(|| format!("opening database {}", settings.database_path))?;

    if data_context
        .ensure_default_user(&settings.default_admin_username, &settings.default_admin_password)
        .context("seeding default user")?
    {
        tracing::info!(username = %settings.default_admin_username, "created default user");
    }

    // ── Router ─────────────────────────────────────────────────
    let addr = settings.bind_address();
    let static_files_dir = settings.static_files_dir.clone();
    let state = Arc::new(AppState {
        data_context,
        settings,
    });

    let mut app = map_routes(state);
    if let Some(dir) = static_files_dir {
        tracing::info!(%dir, "serving static files");
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }
    let app = app.layer(TraceLayer::new_for_http()).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // ── Start ──────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server running");
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
