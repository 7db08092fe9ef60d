//! In-memory pub/sub implementation.
//!
//! One broadcast channel per topic, shared by every subscriber in this
//! process. Each subscription is a stream; dropping it unsubscribes.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use blog_core::ports::{PubSub, PubSubError, PubSubMessage, Subscription};

/// In-memory pub/sub system.
pub struct InMemoryPubSub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<String>>>>,
    buffer_size: usize,
}

impl InMemoryPubSub {
    /// `buffer_size` is clamped to at least one message per channel.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Number of live subscriptions on `channel`.
    #[cfg(test)]
    async fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .read()
            .await
            .get(channel)
            .map_or(0, |sender| sender.receiver_count())
    }
}

impl Default for InMemoryPubSub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl PubSub for InMemoryPubSub {
    async fn publish(&self, channel: &str, message: &str) -> Result<(), PubSubError> {
        let channels = self.channels.read().await;

        match channels.get(channel) {
            // A send error only means nobody is listening right now.
            Some(sender) => match sender.send(message.to_string()) {
                Ok(receivers) => tracing::debug!(channel = %channel, receivers, "Message published"),
                Err(_) => tracing::debug!(channel = %channel, "No subscribers for channel"),
            },
            None => tracing::debug!(channel = %channel, "No subscribers for channel"),
        }

        Ok(())
    }

    async fn subscribe(&self, channel: &str) -> Result<Subscription, PubSubError> {
        let receiver = {
            let mut channels = self.channels.write().await;
            channels
                .entry(channel.to_string())
                .or_insert_with(|| broadcast::channel(self.buffer_size).0)
                .subscribe()
        };

        let channel_name = channel.to_string();
        tracing::info!(channel = %channel_name, "Subscribed to channel");

        let stream = futures::stream::unfold(
            (receiver, channel_name),
            |(mut receiver, channel)| async move {
                loop {
                    match receiver.recv().await {
                        Ok(payload) => {
                            let msg = PubSubMessage {
                                channel: channel.clone(),
                                payload,
                            };
                            return Some((msg, (receiver, channel)));
                        }
                        Err(broadcast::error::RecvError::Lagged(count)) => {
                            tracing::warn!(
                                channel = %channel,
                                lagged = count,
                                "Subscriber lagged behind"
                            );
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!(channel = %channel, "Channel closed");
                            return None;
                        }
                    }
                }
            },
        );

        Ok(Box::pin(stream))
    }
}
