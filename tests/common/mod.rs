// Shared test helpers; not every test binary uses every item.
#![allow(unused)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use telebridge::bus::{Broker, ContentFlags, InboundMessage, PlatformUpdate};
use telebridge::channels::ChatPlatform;
use telebridge::config::TopicsConfig;
use telebridge::errors::{RelayError, RelayResult};
use telebridge::relay::Relay;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Send { chat_id: i64, text: String },
    Reply { chat_id: i64, message_id: i32, text: String },
}

#[derive(Default)]
pub struct FakePlatform {
    pub calls: Arc<Mutex<Vec<PlatformCall>>>,
    /// Chats whose deliveries fail.
    pub failing_chats: Vec<i64>,
}

impl FakePlatform {
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    fn name(&self) -> &str {
        "fake"
    }

    async fn start(&self) -> anyhow::Result<mpsc::Receiver<PlatformUpdate>> {
        anyhow::bail!("tests feed updates directly")
    }

    async fn send(&self, chat_id: i64, text: &str) -> RelayResult<()> {
        self.calls.lock().unwrap().push(PlatformCall::Send {
            chat_id,
            text: text.to_string(),
        });
        if self.failing_chats.contains(&chat_id) {
            return Err(RelayError::delivery(format!("chat {}", chat_id), "forbidden"));
        }
        Ok(())
    }

    async fn reply_to(&self, chat_id: i64, message_id: i32, text: &str) -> RelayResult<()> {
        self.calls.lock().unwrap().push(PlatformCall::Reply {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeBroker {
    pub published: Arc<Mutex<Vec<(String, String)>>>,
    /// Publishing a message whose text equals this key waits before completing.
    pub slow_text: Option<(String, Duration)>,
}

impl FakeBroker {
    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broker for FakeBroker {
    async fn publish(&self, topic: &str, message: &str) -> anyhow::Result<()> {
        if let Some((ref text, delay)) = self.slow_text
            && message.contains(&format!("\"text\":\"{}\"", text))
        {
            tokio::time::sleep(delay).await;
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), message.to_string()));
        Ok(())
    }

    async fn subscribe(&self, _topics: &[String]) -> anyhow::Result<mpsc::Receiver<String>> {
        anyhow::bail!("tests feed commands directly")
    }
}

pub fn text_message(message_id: i32, text: &str) -> InboundMessage {
    InboundMessage {
        sender_id: 1,
        chat_id: 100,
        message_id,
        text: text.to_string(),
        flags: ContentFlags {
            text: !text.is_empty(),
            ..ContentFlags::default()
        },
    }
}

pub fn make_relay(
    platform: Arc<FakePlatform>,
    broker: Arc<FakeBroker>,
    publish_timeout: Duration,
) -> Relay {
    Relay::new(platform, broker, TopicsConfig::default(), publish_timeout)
}

/// Poll `check` until it returns true or `timeout` elapses.
pub async fn wait_for<F: Fn() -> bool>(check: F, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}
