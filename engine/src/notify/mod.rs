// Alert delivery
pub mod webhook;

use crate::error::Result;
use async_trait::async_trait;

pub use webhook::WebhookNotifier;

#[async_trait]
pub trait AlertNotifier: Send + Sync {
    /// One delivery attempt for a pre-rendered message. Never retried.
    async fn notify(&self, message: &str) -> Result<()>;
}
