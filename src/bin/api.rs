use anyhow::Result;
use progression::{api, app_state::AppState, config::Config, fetcher::PageFetcher, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    telemetry::init(config.log_format(), telemetry::SERVER_FILTER, std::io::stdout);

    let extractor = config.table_extractor()?;
    let fetcher = PageFetcher::new(&config.fetch_settings())?;
    let app = api::router(AppState::new(fetcher, extractor));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = config.bind_addr(), marker = config.table_marker(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
