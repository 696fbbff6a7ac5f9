pub mod credentials;
pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, load_dotenv, read_config_file};
pub use schema::{Config, RedisConfig, RelayConfig, TelegramConfig, TopicsConfig};
