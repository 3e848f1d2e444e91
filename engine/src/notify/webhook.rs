// Discord-compatible webhook delivery: POST {"content": "..."}
use super::AlertNotifier;
use crate::error::{Result, ScanError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

fn is_accepted(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::OK || status == reqwest::StatusCode::NO_CONTENT
}

#[async_trait]
impl AlertNotifier for WebhookNotifier {
    async fn notify(&self, message: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&WebhookPayload { content: message })
            .send()
            .await?;

        let status = response.status();
        if !is_accepted(status) {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %body, "Webhook rejected alert");
            return Err(ScanError::Response {
                status: status.as_u16(),
                body,
            });
        }
        tracing::info!(status = status.as_u16(), "Alert delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_stub::{self, StubResponse};

    fn notifier(url: &str) -> WebhookNotifier {
        WebhookNotifier::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_notify_posts_content_json() {
        let (base_url, server) = http_stub::serve(vec![StubResponse::empty(204)]).await;
        notifier(&format!("{}/api/webhooks/1/abc", base_url))
            .notify("🚀 Long Signal on BTCUSDT")
            .await
            .unwrap();

        let requests = server.await.unwrap();
        assert!(requests[0].request_line.starts_with("POST /api/webhooks/1/abc "));
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body, serde_json::json!({ "content": "🚀 Long Signal on BTCUSDT" }));
    }

    #[tokio::test]
    async fn test_notify_accepts_200() {
        let (base_url, _server) = http_stub::serve(vec![StubResponse::json(200, "{}".to_string())]).await;
        assert!(notifier(&base_url).notify("hello").await.is_ok());
    }

    #[tokio::test]
    async fn test_notify_other_success_codes_are_failures() {
        for status in [201, 429, 500] {
            let (base_url, _server) = http_stub::serve(vec![StubResponse::json(status, "{\"message\":\"nope\"}".to_string())]).await;
            let err = notifier(&base_url).notify("hello").await.unwrap_err();
            assert!(matches!(err, ScanError::Response { status: s, .. } if s == status));
        }
    }

    #[tokio::test]
    async fn test_notify_transport_failure() {
        let base_url = http_stub::unused_base_url().await;
        let err = notifier(&base_url).notify("hello").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
