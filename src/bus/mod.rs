pub mod broker;
pub mod codec;
pub mod events;

pub use broker::{Broker, RedisBroker};
pub use events::{ContentFlags, EventPayload, InboundMessage, PlatformUpdate, SendRequest};
