pub mod kline_parser;
pub mod market_data;

pub use market_data::{MarketDataSource, MexcClient};
