use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use assistant_backend::config::Settings;
use assistant_backend::logging;
use assistant_backend::server::router;
use assistant_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings);

    let bind_addr = format!("0.0.0.0:{}", settings.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    let state = AppState::initialize(settings);
    tracing::info!("Listening on {}", addr);

    let app: Router = router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
