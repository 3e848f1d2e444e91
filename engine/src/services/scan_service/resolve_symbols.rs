// Symbol list for one sweep: the configured list, or the exchange's tradable set.
use crate::config::{ScanSettings, SymbolSource};
use crate::data::MarketDataSource;
use crate::error::Result;

pub async fn handle_resolve_symbols(settings: &ScanSettings, source: &dyn MarketDataSource) -> Result<Vec<String>> {
    match settings.symbol_source() {
        SymbolSource::Fixed(symbols) => Ok(symbols),
        SymbolSource::Exchange => source.fetch_trading_symbols().await,
    }
}
