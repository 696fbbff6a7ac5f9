pub mod base;
pub mod telegram;

pub use base::ChatPlatform;
pub use telegram::TelegramPlatform;
