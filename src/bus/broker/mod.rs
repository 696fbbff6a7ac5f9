use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Capacity of the channel between the pub/sub reader task and its consumer.
const SUBSCRIBE_CAPACITY: usize = 100;

/// Publish/subscribe broker the relay talks to.
///
/// Implementations must be safe to call concurrently from many tasks.
#[async_trait]
pub trait Broker: Send + Sync {
    async fn publish(&self, topic: &str, message: &str) -> Result<()>;

    /// Subscribe to `topics` and return a receiver of raw message payloads.
    /// The receiver closes when the underlying subscription ends.
    async fn subscribe(&self, topics: &[String]) -> Result<mpsc::Receiver<String>>;
}

/// Redis pub/sub backed broker.
///
/// Publishing shares one managed connection that reconnects after Redis restarts; each
/// subscription opens its own dedicated pub/sub connection, as Redis requires.
pub struct RedisBroker {
    client: redis::Client,
    publisher: ConnectionManager,
}

impl RedisBroker {
    pub async fn connect(url: &str) -> Result<Self> {
        if url.starts_with("rediss://") {
            info!("Redis TLS enabled (rediss://)");
        }
        let client = redis::Client::open(url).context("Failed to parse Redis URL")?;
        let publisher = ConnectionManager::new(client.clone())
            .await
            .context("Failed to connect to Redis")?;
        info!("connected to Redis");
        Ok(Self { client, publisher })
    }
}

#[async_trait]
impl Broker for RedisBroker {
    async fn publish(&self, topic: &str, message: &str) -> Result<()> {
        let mut conn = self.publisher.clone();
        // PUBLISH returns the number of subscribers that received the message
        let receivers: i64 = conn
            .publish(topic, message)
            .await
            .with_context(|| format!("Failed to publish to '{}'", topic))?;
        debug!("published to '{}' ({} receivers)", topic, receivers);
        Ok(())
    }

    async fn subscribe(&self, topics: &[String]) -> Result<mpsc::Receiver<String>> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .context("Failed to open Redis pub/sub connection")?;
        for topic in topics {
            pubsub
                .subscribe(topic)
                .await
                .with_context(|| format!("Failed to subscribe to '{}'", topic))?;
        }
        info!("subscribed to {:?}", topics);

        let (tx, rx) = mpsc::channel(SUBSCRIBE_CAPACITY);
        tokio::spawn(async move {
            let mut messages = pubsub.into_on_message();
            while let Some(msg) = messages.next().await {
                let payload: String = match msg.get_payload() {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(
                            "dropping non-text message on '{}': {}",
                            msg.get_channel_name(),
                            e
                        );
                        continue;
                    }
                };
                if tx.send(payload).await.is_err() {
                    debug!("subscriber dropped, closing Redis subscription");
                    break;
                }
            }
            warn!("Redis subscription stream ended");
        });
        Ok(rx)
    }
}
