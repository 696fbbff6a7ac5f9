//! The relay control loop.
//!
//! Platform updates are classified and published on their own task so a slow publish
//! never stalls update intake. Broker commands are decoded and dispatched in-line, one at
//! a time.

use crate::bus::codec::{decode_send_request, encode_event};
use crate::bus::{Broker, EventPayload, PlatformUpdate, SendRequest};
use crate::channels::ChatPlatform;
use crate::classify::classify;
use crate::config::TopicsConfig;
use crate::errors::{RelayError, RelayResult};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

pub struct Relay {
    platform: Arc<dyn ChatPlatform>,
    broker: Arc<dyn Broker>,
    topics: TopicsConfig,
    publish_timeout: Duration,
}

impl Relay {
    pub fn new(
        platform: Arc<dyn ChatPlatform>,
        broker: Arc<dyn Broker>,
        topics: TopicsConfig,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            platform,
            broker,
            topics,
            publish_timeout,
        }
    }

    /// Multiplex updates and commands. Never returns `Ok`; the loop ends with
    /// `StreamClosed` as soon as either stream closes.
    pub async fn run(
        &self,
        mut updates: mpsc::Receiver<PlatformUpdate>,
        mut commands: mpsc::Receiver<String>,
    ) -> RelayResult<()> {
        info!(
            "relay running: events -> '{}', commands <- '{}'",
            self.topics.events, self.topics.commands
        );

        let closed = loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(update) => {
                        // Fire-and-forget; the task logs its own outcome
                        drop(self.spawn_publish(update));
                    }
                    None => break format!("{} update", self.platform.name()),
                },
                command = commands.recv() => match command {
                    Some(raw) => {
                        if let Err(e) = self.handle_command(&raw).await {
                            log_dropped_command(&e);
                        }
                    }
                    None => break format!("commands topic '{}'", self.topics.commands),
                },
            }
        };

        error!("relay loop stopped: {} stream closed", closed);
        Err(RelayError::StreamClosed(closed))
    }

    /// Classify `update` and publish it on a separate task, bounded by the publish
    /// deadline. Expiry abandons this publish only.
    pub fn spawn_publish(&self, update: PlatformUpdate) -> JoinHandle<()> {
        let broker = self.broker.clone();
        let topic = self.topics.events.clone();
        let deadline = self.publish_timeout;

        tokio::spawn(async move {
            match tokio::time::timeout(deadline, publish_update(broker.as_ref(), &topic, update))
                .await
            {
                Ok(Ok(())) => {}
                Ok(Err(RelayError::NoMessage)) => debug!("update carries no message, skipped"),
                Ok(Err(e)) => warn!("unable to publish to '{}': {}", topic, e),
                Err(_) => warn!(
                    "publish to '{}' abandoned after {}s deadline",
                    topic,
                    deadline.as_secs_f64()
                ),
            }
        })
    }

    /// Decode, validate and dispatch one raw command.
    pub async fn handle_command(&self, raw: &str) -> RelayResult<()> {
        let request = decode_send_request(raw)?;
        self.dispatch(&request).await
    }

    async fn dispatch(&self, request: &SendRequest) -> RelayResult<()> {
        if request.is_reply() {
            debug!(
                "replying to message {} in chat {}",
                request.reply_to_message_id, request.chat_id
            );
            self.platform
                .reply_to(request.chat_id, request.reply_to_message_id, &request.text)
                .await
        } else {
            debug!("sending message to chat {}", request.chat_id);
            self.platform.send(request.chat_id, &request.text).await
        }
    }
}

/// Extract and classify the canonical message of `update`.
pub fn build_event(update: PlatformUpdate, timestamp: i64) -> RelayResult<EventPayload> {
    let msg = update.into_message()?;
    let types = classify(&msg);
    Ok(EventPayload {
        user_id: msg.sender_id,
        chat_id: msg.chat_id,
        message_id: msg.message_id,
        text: msg.text,
        types,
        timestamp,
    })
}

async fn publish_update(broker: &dyn Broker, topic: &str, update: PlatformUpdate) -> RelayResult<()> {
    let event = build_event(update, Utc::now().timestamp())?;
    let payload = encode_event(&event)?;
    broker
        .publish(topic, &payload)
        .await
        .map_err(|e| RelayError::delivery(format!("topic '{}'", topic), format!("{:#}", e)))?;
    debug!(
        "published message {} from chat {} as {:?}",
        event.message_id, event.chat_id, event.types
    );
    Ok(())
}

fn log_dropped_command(err: &RelayError) {
    match err {
        RelayError::MalformedPayload(_) | RelayError::Validation(_) => {
            warn!("unable to get message from commands topic: {}", err);
        }
        RelayError::Delivery { .. } => warn!("{}", err),
        other => warn!("command dropped: {}", other),
    }
}
