use crate::bus::{ContentFlags, InboundMessage, PlatformUpdate};
use crate::channels::base::ChatPlatform;
use crate::config::TelegramConfig;
use crate::errors::{RelayError, RelayResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{
    Message as TgMessage, MessageId, MessageOrigin, ReplyParameters, Update, UpdateKind,
};
use teloxide::update_listeners::Polling;
use tokio::sync::mpsc;
use tracing::{debug, info};

pub struct TelegramPlatform {
    config: TelegramConfig,
    bot: Bot,
    update_buffer: usize,
}

impl TelegramPlatform {
    /// Create the bot client and check the token with `getMe`.
    pub async fn connect(config: TelegramConfig, update_buffer: usize) -> Result<Self> {
        let bot = Bot::new(&config.token);
        let me = bot
            .get_me()
            .await
            .context("Failed to authorize Telegram bot")?;
        info!("authorized on account {}", me.username());
        Ok(Self {
            config,
            bot,
            update_buffer,
        })
    }
}

#[async_trait]
impl ChatPlatform for TelegramPlatform {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<PlatformUpdate>> {
        let (tx, rx) = mpsc::channel(self.update_buffer);

        let handler = dptree::entry().endpoint(move |update: Update| {
            let tx = tx.clone();
            async move {
                if tx.send(platform_update(&update)).await.is_err() {
                    debug!("relay loop gone, dropping update {}", update.id.0);
                }
                Ok::<(), anyhow::Error>(())
            }
        });

        let listener = Polling::builder(self.bot.clone())
            .timeout(Duration::from_secs(u64::from(self.config.poll_timeout)))
            .delete_webhook()
            .await
            .build();

        let mut dispatcher = Dispatcher::builder(self.bot.clone(), handler).build();

        tokio::spawn(async move {
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("Telegram update listener error"),
                )
                .await;
        });

        info!("Telegram update polling started");
        Ok(rx)
    }

    async fn send(&self, chat_id: i64, text: &str) -> RelayResult<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| RelayError::delivery(format!("chat {}", chat_id), e))?;
        Ok(())
    }

    async fn reply_to(&self, chat_id: i64, message_id: i32, text: &str) -> RelayResult<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_parameters(ReplyParameters::new(MessageId(message_id)))
            .await
            .map_err(|e| {
                RelayError::delivery(format!("chat {} reply to {}", chat_id, message_id), e)
            })?;
        Ok(())
    }
}

/// Map a Telegram update onto the platform-neutral shape. Update kinds other than new
/// and edited messages map to an empty update.
fn platform_update(update: &Update) -> PlatformUpdate {
    match &update.kind {
        UpdateKind::Message(msg) => PlatformUpdate::new_message(inbound_from(msg)),
        UpdateKind::EditedMessage(msg) => PlatformUpdate::edited(inbound_from(msg)),
        _ => PlatformUpdate::default(),
    }
}

fn inbound_from(msg: &TgMessage) -> InboundMessage {
    // Captions count as text so a captioned photo is both "photo" and "text"
    let text = msg.text().or_else(|| msg.caption()).unwrap_or_default();
    let origin = msg.forward_origin();
    let flags = ContentFlags {
        animation: msg.animation().is_some(),
        text: !text.is_empty(),
        audio: msg.audio().is_some(),
        photo: msg.photo().is_some(),
        sticker: msg.sticker().is_some(),
        video: msg.video().is_some(),
        voice: msg.voice().is_some(),
        document: msg.document().is_some(),
        video_note: msg.video_note().is_some(),
        forward: matches!(
            origin,
            Some(MessageOrigin::User { .. } | MessageOrigin::HiddenUser { .. })
        ),
        repost: matches!(
            origin,
            Some(MessageOrigin::Chat { .. } | MessageOrigin::Channel { .. })
        ),
        edited: msg.edit_date().is_some(),
    };

    InboundMessage {
        sender_id: msg.from.as_ref().map_or(0, |u| u.id.0 as i64),
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        text: text.to_string(),
        flags,
    }
}
