//! The scan loop: sweeps every symbol sequentially, sleeping between symbols and
//! between sweeps. Nothing that happens to a single symbol stops the loop.

use crate::config::ScanSettings;
use crate::data::MarketDataSource;
use crate::error::ScanError;
use crate::notify::AlertNotifier;
use shared::models::Signal;
use std::future::Future;
use std::sync::Arc;

pub mod resolve_symbols;
pub mod scan_symbol;

#[derive(Debug)]
pub enum SymbolOutcome {
    /// Fetch or indicator failure; the evaluator was not run.
    Skipped(ScanError),
    NoSignal,
    Signalled { signal: Signal, delivered: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub scanned: usize,
    pub skipped: usize,
    pub signals: usize,
    pub delivered: usize,
}

impl CycleReport {
    fn record(&mut self, outcome: &SymbolOutcome) {
        self.scanned += 1;
        match outcome {
            SymbolOutcome::Skipped(_) => self.skipped += 1,
            SymbolOutcome::NoSignal => {}
            SymbolOutcome::Signalled { delivered, .. } => {
                self.signals += 1;
                if *delivered {
                    self.delivered += 1;
                }
            }
        }
    }
}

pub struct Scanner {
    settings: ScanSettings,
    source: Arc<dyn MarketDataSource>,
    notifier: Arc<dyn AlertNotifier>,
}

impl Scanner {
    pub fn new(settings: ScanSettings, source: Arc<dyn MarketDataSource>, notifier: Arc<dyn AlertNotifier>) -> Self {
        Scanner {
            settings,
            source,
            notifier,
        }
    }

    pub async fn scan_symbol(&self, symbol: &str) -> SymbolOutcome {
        scan_symbol::handle_scan_symbol(symbol, &self.settings, self.source.as_ref(), self.notifier.as_ref()).await
    }

    /// One sweep over the symbol set. A failed symbol lookup yields an empty report.
    pub async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        let symbols = match resolve_symbols::handle_resolve_symbols(&self.settings, self.source.as_ref()).await {
            Ok(symbols) => symbols,
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Failed to resolve symbols, skipping sweep");
                return report;
            }
        };
        if symbols.is_empty() {
            tracing::warn!("No trading symbols available, skipping sweep");
            return report;
        }

        for (idx, symbol) in symbols.iter().enumerate() {
            if idx > 0 {
                tokio::time::sleep(self.settings.per_symbol_delay()).await;
            }
            let outcome = self.scan_symbol(symbol).await;
            report.record(&outcome);
        }

        tracing::info!(
            scanned = report.scanned,
            skipped = report.skipped,
            signals = report.signals,
            delivered = report.delivered,
            "Sweep complete"
        );
        report
    }

    /// Sweeps until `shutdown` resolves and returns the number of completed sweeps.
    pub async fn run<F>(&self, shutdown: F) -> usize
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut completed = 0;

        tracing::info!(
            policy = %self.settings.policy,
            interval = %self.settings.interval,
            sweep_delay_secs = self.settings.sweep_delay_secs,
            "Scanner started"
        );
        loop {
            tokio::select! {
                _ = self.run_cycle() => completed += 1,
                _ = &mut shutdown => break,
            }
            tokio::select! {
                _ = tokio::time::sleep(self.settings.sweep_delay()) => {}
                _ = &mut shutdown => break,
            }
        }
        tracing::info!(completed, "Scanner stopped");
        completed
    }
}
