// Signal engine entry point
use engine::config::ScanSettings;
use engine::data::MexcClient;
use engine::notify::WebhookNotifier;
use engine::services::Scanner;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; variables may come from the real environment.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting signal engine...");

    let settings = ScanSettings::load()?;
    info!(
        interval = %settings.interval,
        candle_limit = settings.candle_limit,
        policy = %settings.policy,
        symbols = ?settings.symbol_source(),
        "Configuration loaded"
    );

    let source = Arc::new(MexcClient::new(&settings.api_base_url, settings.request_timeout())?);
    let notifier = Arc::new(WebhookNotifier::new(&settings.webhook_url, settings.request_timeout())?);
    let scanner = Scanner::new(settings, source, notifier);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown requested");
    };

    scanner.run(shutdown).await;
    Ok(())
}
