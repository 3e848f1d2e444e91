// Market data access: candle history and tradable symbol discovery over REST.
use super::kline_parser::{parse_klines, parse_trading_symbols};
use crate::error::{Result, ScanError};
use async_trait::async_trait;
use shared::models::{Candle, Interval};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mexc.com";
pub const MAX_KLINE_LIMIT: usize = 1000;

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Up to `limit` most recent candles, oldest first.
    async fn fetch_candles(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Candle>>;

    /// Symbols currently open for trading.
    async fn fetch_trading_symbols(&self) -> Result<Vec<String>>;
}

/// MEXC spot REST client. Every call is a fresh round-trip; nothing is cached.
#[derive(Debug, Clone)]
pub struct MexcClient {
    base_url: String,
    client: reqwest::Client,
}

impl MexcClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_body(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScanError::Response {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl MarketDataSource for MexcClient {
    async fn fetch_candles(&self, symbol: &str, interval: Interval, limit: usize) -> Result<Vec<Candle>> {
        if limit == 0 || limit > MAX_KLINE_LIMIT {
            return Err(ScanError::Config(format!(
                "kline limit must be between 1 and {}, got {}",
                MAX_KLINE_LIMIT, limit
            )));
        }

        let url = format!("{}/api/v3/klines", self.base_url);
        let limit_param = limit.to_string();
        let request = self.client.get(&url).query(&[
            ("symbol", symbol),
            ("interval", interval.as_token()),
            ("limit", limit_param.as_str()),
        ]);

        tracing::debug!(%symbol, %interval, limit, "Fetching klines");
        let body = self.get_body(request).await?;
        let candles = parse_klines(symbol, &body, limit)?;
        tracing::debug!(%symbol, count = candles.len(), "Fetched klines");
        Ok(candles)
    }

    async fn fetch_trading_symbols(&self) -> Result<Vec<String>> {
        let url = format!("{}/api/v3/exchangeInfo", self.base_url);
        let body = self.get_body(self.client.get(&url)).await?;
        let symbols = parse_trading_symbols(&body)?;
        tracing::info!(count = symbols.len(), "Discovered trading symbols");
        Ok(symbols)
    }
}
