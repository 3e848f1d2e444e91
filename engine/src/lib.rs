// Engine library root
// Candle fetch -> indicators -> signal evaluation -> alert delivery, plus the scan
// loop that drives them. Shared data models live in the `shared` crate.

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod notify;
pub mod services;
pub mod signals;

pub use error::{Result, ScanError};

#[cfg(test)]
pub(crate) mod fixtures;
#[cfg(test)]
pub(crate) mod http_stub;
