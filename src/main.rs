use bucket_gallery::{AppState, app, config::Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::time::LocalTime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载 .env 文件
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_timer(LocalTime::rfc_3339())
        .init();

    let config = Config::from_env();
    let state = AppState::initialize(&config).await;

    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
