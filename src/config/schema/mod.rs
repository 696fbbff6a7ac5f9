use crate::errors::RelayError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Generates a `Debug` impl that redacts secret fields.
///
/// Field specifiers:
/// - `field_name`: printed normally via `&self.field_name`
/// - `redact(field_name)`: `String` field, shows `[empty]` or `[REDACTED]`
macro_rules! redact_debug {
    (@field $builder:ident, $self:ident, redact($field:ident)) => {
        $builder.field(
            stringify!($field),
            &if $self.$field.is_empty() {
                "[empty]"
            } else {
                "[REDACTED]"
            },
        );
    };
    (@field $builder:ident, $self:ident, $field:ident) => {
        $builder.field(stringify!($field), &$self.$field);
    };

    (@fields $builder:ident, $self:ident,) => {};
    (@fields $builder:ident, $self:ident, redact($field:ident), $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, redact($field));
        redact_debug!(@fields $builder, $self, $($rest)*);
    };
    (@fields $builder:ident, $self:ident, $field:ident, $($rest:tt)*) => {
        redact_debug!(@field $builder, $self, $field);
        redact_debug!(@fields $builder, $self, $($rest)*);
    };

    ($struct_name:ident, $($fields:tt)*) => {
        impl std::fmt::Debug for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut builder = f.debug_struct(stringify!($struct_name));
                redact_debug!(@fields builder, self, $($fields)*);
                builder.finish()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Telegram
// ---------------------------------------------------------------------------

fn default_poll_timeout() -> u32 {
    60
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    /// Long-poll timeout in seconds for `getUpdates`.
    #[serde(default = "default_poll_timeout", rename = "pollTimeout")]
    pub poll_timeout: u32,
    /// Verbose relay logging.
    #[serde(default)]
    pub debug: bool,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            poll_timeout: default_poll_timeout(),
            debug: false,
        }
    }
}

redact_debug!(TelegramConfig, redact(token), poll_timeout, debug,);

// ---------------------------------------------------------------------------
// Redis
// ---------------------------------------------------------------------------

#[derive(Clone, Serialize, Deserialize, Default)]
pub struct RedisConfig {
    #[serde(default)]
    pub url: String,
}

// URLs routinely embed a password
redact_debug!(RedisConfig, redact(url),);

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

fn default_events_topic() -> String {
    "telegram-message".to_string()
}

fn default_commands_topic() -> String {
    "telegram-send".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicsConfig {
    /// Classified inbound messages are published here.
    #[serde(default = "default_events_topic")]
    pub events: String,
    /// Send requests are consumed from here.
    #[serde(default = "default_commands_topic")]
    pub commands: String,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            events: default_events_topic(),
            commands: default_commands_topic(),
        }
    }
}

// ---------------------------------------------------------------------------
// Relay
// ---------------------------------------------------------------------------

fn default_publish_timeout_secs() -> u64 {
    2
}

fn default_update_buffer() -> usize {
    100
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(
        default = "default_publish_timeout_secs",
        rename = "publishTimeoutSecs"
    )]
    pub publish_timeout_secs: u64,
    #[serde(default = "default_update_buffer", rename = "updateBuffer")]
    pub update_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            publish_timeout_secs: default_publish_timeout_secs(),
            update_buffer: default_update_buffer(),
        }
    }
}

impl RelayConfig {
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub topics: TopicsConfig,
    #[serde(default)]
    pub relay: RelayConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), RelayError> {
        self.validate_credentials()?;
        self.validate_topics()?;
        self.validate_relay()?;
        Ok(())
    }

    fn validate_credentials(&self) -> Result<(), RelayError> {
        if self.telegram.token.trim().is_empty() {
            return Err(RelayError::Config(
                "telegram bot token is not provided (telegram.token or TELEGRAM_BOT_TOKEN)"
                    .into(),
            ));
        }
        let url = self.redis.url.trim();
        if url.is_empty() {
            return Err(RelayError::Config(
                "redis url is not provided (redis.url or REDIS_URL)".into(),
            ));
        }
        if !["redis://", "rediss://", "unix://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(RelayError::Config(
                "redis.url must start with redis://, rediss:// or unix://".into(),
            ));
        }
        Ok(())
    }

    fn validate_topics(&self) -> Result<(), RelayError> {
        if self.topics.events.is_empty() {
            return Err(RelayError::Config("topics.events must not be empty".into()));
        }
        if self.topics.commands.is_empty() {
            return Err(RelayError::Config(
                "topics.commands must not be empty".into(),
            ));
        }
        // The relay would consume its own events as commands
        if self.topics.events == self.topics.commands {
            return Err(RelayError::Config(
                "topics.events and topics.commands must differ".into(),
            ));
        }
        Ok(())
    }

    fn validate_relay(&self) -> Result<(), RelayError> {
        if self.relay.publish_timeout_secs == 0 {
            return Err(RelayError::Config(
                "relay.publishTimeoutSecs must be > 0".into(),
            ));
        }
        if self.relay.update_buffer == 0 {
            return Err(RelayError::Config("relay.updateBuffer must be > 0".into()));
        }
        Ok(())
    }
}
