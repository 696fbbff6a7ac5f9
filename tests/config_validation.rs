use telebridge::config::credentials::apply_overrides_from;
use telebridge::config::{Config, read_config_file};

fn default_config() -> Config {
    serde_json::from_str("{}").unwrap()
}

fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

#[test]
fn test_missing_token_is_fatal() {
    let mut config = default_config();
    config.redis.url = "redis://localhost:6379".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("telegram bot token"));
}

#[test]
fn test_missing_redis_url_is_fatal() {
    let mut config = default_config();
    config.telegram.token = "123:abc".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("redis url"));
}

#[test]
fn test_env_only_configuration_validates() {
    let mut config = default_config();
    apply_overrides_from(
        &mut config,
        env(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("REDIS_URL", "redis://localhost:6379/0"),
        ]),
    );
    assert!(config.validate().is_ok());
    assert_eq!(config.topics.events, "telegram-message");
    assert_eq!(config.topics.commands, "telegram-send");
}

#[test]
fn test_env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"telegram": {"token": "file-token"}, "redis": {"url": "redis://file:6379"}}"#,
    )
    .unwrap();

    let mut config = read_config_file(Some(&path)).unwrap();
    apply_overrides_from(&mut config, env(&[("TELEGRAM_BOT_TOKEN", "env-token")]));

    assert_eq!(config.telegram.token, "env-token");
    assert_eq!(config.redis.url, "redis://file:6379");
    assert!(config.validate().is_ok());
}

#[test]
fn test_same_topic_for_both_directions_rejected() {
    let mut config = default_config();
    apply_overrides_from(
        &mut config,
        env(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("REDIS_URL", "redis://localhost"),
            ("TELEBRIDGE_EVENTS_TOPIC", "loop"),
            ("TELEBRIDGE_COMMANDS_TOPIC", "loop"),
        ]),
    );
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("must differ"));
}
