use super::schema::Config;
use tracing::debug;

macro_rules! define_overrides {
    ($( $name:literal, $env:literal => $($path:ident).+ );* $(;)?) => {
        /// (slot name, env var name) pairs.
        pub const ENV_OVERRIDES: &[(&str, &str)] = &[$(($name, $env)),*];

        /// Get the current value of a field by slot name.
        pub fn get_override_value<'a>(config: &'a Config, name: &str) -> Option<&'a str> {
            match name {
                $($name => Some(config.$($path).+.as_str()),)*
                _ => None,
            }
        }

        /// Apply overrides from `lookup`, which maps an env var name to its value.
        ///
        /// Set, non-empty values overwrite the corresponding config field.
        pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
        where
            F: Fn(&str) -> Option<String>,
        {
            $(
                if let Some(val) = lookup($env) {
                    if !val.is_empty() {
                        debug!("{} set from {}", $name, $env);
                        config.$($path).+ = val;
                    }
                }
            )*
        }
    };
}

define_overrides! {
    "telegram-token",  "TELEGRAM_BOT_TOKEN"        => telegram.token;
    "redis-url",       "REDIS_URL"                 => redis.url;
    "events-topic",    "TELEBRIDGE_EVENTS_TOPIC"   => topics.events;
    "commands-topic",  "TELEBRIDGE_COMMANDS_TOPIC" => topics.commands;
}

/// Apply process environment overrides, so secrets can be injected without touching
/// the config file (containers, CI, `.env`).
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_from(config, |var| std::env::var(var).ok());
}

/// Where a field's value came from, for `telebridge check`.
pub fn detect_source(name: &str, config: &Config) -> &'static str {
    if let Some(&(_, var)) = ENV_OVERRIDES.iter().find(|(n, _)| *n == name)
        && let Ok(val) = std::env::var(var)
        && !val.is_empty()
    {
        return "env";
    }
    match get_override_value(config, name) {
        Some(v) if !v.is_empty() => "config",
        _ => "[not set]",
    }
}
