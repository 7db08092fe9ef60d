//! Pub/Sub port - change notifications for published collections.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

/// Message received from a channel.
#[derive(Debug, Clone)]
pub struct PubSubMessage {
    pub channel: String,
    pub payload: String,
}

/// Live feed of messages on one channel. Dropping it ends the subscription.
pub type Subscription = Pin<Box<dyn Stream<Item = PubSubMessage> + Send>>;

/// Pub/Sub trait - abstraction over pub/sub backends.
#[async_trait]
pub trait PubSub: Send + Sync {
    /// Publish a message to a channel.
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError>;

    /// Subscribe to a channel.
    async fn subscribe(&self, channel: &str) -> Result<Subscription, PubSubError>;
}

/// Pub/Sub errors.
#[derive(Debug, thiserror::Error)]
pub enum PubSubError {
    #[error("Failed to publish: {0}")]
    PublishError(String),

    #[error("Failed to subscribe: {0}")]
    SubscribeError(String),
}
