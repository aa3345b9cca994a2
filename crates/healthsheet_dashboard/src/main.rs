use std::sync::Arc;

use healthsheet_client::config::Config;
use healthsheet_client::http_client::{ReqwestEstimatorClient, ReqwestSheetStore};
use healthsheet_dashboard::DashboardService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `HEALTHSHEET_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("HEALTHSHEET_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("healthsheet: log filter: {}", log_env);

    let cfg = Config::from_env()?;
    let store = Arc::new(ReqwestSheetStore::new(
        &cfg.base_url,
        cfg.spreadsheet_id.clone(),
        cfg.api_key.clone(),
    ));
    let estimator = Arc::new(ReqwestEstimatorClient::new(
        &cfg.estimator_url,
        cfg.api_key.clone(),
    ));
    let service = DashboardService::new(store.clone(), store, estimator);

    // One render cycle for today: daily summary plus the weight trend.
    let today = chrono::Local::now().date_naive();
    let summary = service.daily_summary(today).await?;
    let trend = service.weight_trend().await?;

    let rendered = serde_json::json!({
        "summary": summary,
        "weight_trend": trend,
    });
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    Ok(())
}
