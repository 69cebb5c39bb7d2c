use pullup_log::{AppState, Config, Session, load_state, router};
use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env().await?;
    fs::create_dir_all(&config.data_dir).await?;

    let persisted = load_state(&config.data_dir).await;
    info!(
        sets = persisted.sets.len(),
        streak = persisted.streak,
        "loaded state from {}",
        config.data_dir.display()
    );

    let state = AppState::new(
        config.data_dir,
        config.glyphs,
        Session::from_persisted(persisted),
    );
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
