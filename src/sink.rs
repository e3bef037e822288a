//! Message sink
//!
//! Delivers a serialized report envelope to its destination. Delivery
//! failure surfaces to the caller; no retry or backoff lives at this layer.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

/// Acknowledgement returned by a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryAck {
    pub status: u16,
}

#[async_trait]
pub trait MessageSink {
    async fn send(&self, message: &str, destination: &str) -> Result<DeliveryAck>;
}

/// Sink posting the JSON envelope to an HTTP queue endpoint.
#[derive(Debug, Clone, Default)]
pub struct HttpQueueSink {
    client: reqwest::Client,
}

impl HttpQueueSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageSink for HttpQueueSink {
    async fn send(&self, message: &str, destination: &str) -> Result<DeliveryAck> {
        debug!(destination, bytes = message.len(), "delivering report");
        let response = self
            .client
            .post(destination)
            .header(CONTENT_TYPE, "application/json")
            .body(message.to_string())
            .send()
            .await?
            .error_for_status()?;

        Ok(DeliveryAck {
            status: response.status().as_u16(),
        })
    }
}
