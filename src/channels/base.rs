use crate::bus::PlatformUpdate;
use crate::errors::RelayResult;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Chat platform the relay receives updates from and delivers messages to.
///
/// `send` and `reply_to` are best-effort: callers log a failure and move on.
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    fn name(&self) -> &str;

    /// Start receiving updates. Returns the receiving end of the update stream;
    /// it closes when the platform listener stops.
    async fn start(&self) -> anyhow::Result<mpsc::Receiver<PlatformUpdate>>;

    async fn send(&self, chat_id: i64, text: &str) -> RelayResult<()>;

    /// Send `text` to `chat_id` as a threaded reply to `message_id`.
    async fn reply_to(&self, chat_id: i64, message_id: i32, text: &str) -> RelayResult<()>;
}
