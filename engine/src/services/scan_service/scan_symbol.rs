// Per-symbol pipeline: fetch -> indicators -> evaluate -> notify.
use super::SymbolOutcome;
use crate::config::ScanSettings;
use crate::data::MarketDataSource;
use crate::indicators::compute_indicators;
use crate::notify::AlertNotifier;
use crate::signals::evaluate;

pub async fn handle_scan_symbol(
    symbol: &str,
    settings: &ScanSettings,
    source: &dyn MarketDataSource,
    notifier: &dyn AlertNotifier,
) -> SymbolOutcome {
    tracing::debug!(%symbol, interval = %settings.interval, "Checking symbol");

    let candles = match source.fetch_candles(symbol, settings.interval, settings.candle_limit).await {
        Ok(candles) => candles,
        Err(e) => {
            tracing::warn!(%symbol, kind = e.kind(), error = %e, "Failed to fetch candles, skipping symbol");
            return SymbolOutcome::Skipped(e);
        }
    };

    let snapshot = match compute_indicators(&candles) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(%symbol, kind = e.kind(), error = %e, "Cannot compute indicators, skipping symbol");
            return SymbolOutcome::Skipped(e);
        }
    };

    let signal = evaluate(symbol, &snapshot, settings.policy);
    if !signal.is_actionable() {
        tracing::debug!(%symbol, policy = %settings.policy, "No trade setup");
        return SymbolOutcome::NoSignal;
    }

    tracing::info!(%symbol, direction = ?signal.direction, policy = %settings.policy, "Signal detected");
    let delivered = match notifier.notify(&signal.message).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(%symbol, kind = e.kind(), error = %e, "Failed to deliver alert");
            false
        }
    };
    SymbolOutcome::Signalled { signal, delivered }
}
