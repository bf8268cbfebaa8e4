mod settings;

use std::str::FromStr;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{BusSettings, LoggingSettings, Settings};

/// Prefix of the environment variables that override file settings,
/// e.g. `NOTIBUS_BUS__DELIVERY=best_effort`.
pub const ENV_PREFIX: &str = "NOTIBUS";

/// Loads the configuration from `config/default` and environment variables.
pub fn load_config() -> Result<Settings, ConfigError> {
    load_config_from("config/default")
}

/// Loads the configuration from an optional file (any format the `config`
/// crate recognizes, extension may be omitted) and environment variables,
/// then merges it with default values.
pub fn load_config_from(path: &str) -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    let config = builder.build()?;
    let partial: PartialSettings = config.try_deserialize()?;
    let default = Settings::default();

    let bus = partial.bus.as_ref();
    let logging = partial.logging.as_ref();

    Ok(Settings {
        bus: BusSettings {
            acknowledge_subscriptions: bus
                .and_then(|b| b.acknowledge_subscriptions)
                .unwrap_or(default.bus.acknowledge_subscriptions),
            delivery: parse_or(
                bus.and_then(|b| b.delivery.as_deref()),
                default.bus.delivery,
            )?,
        },
        logging: LoggingSettings {
            level: logging
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
            sink: parse_or(
                logging.and_then(|l| l.sink.as_deref()),
                default.logging.sink,
            )?,
        },
    })
}

fn parse_or<T>(value: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    match value {
        Some(raw) => raw.parse().map_err(ConfigError::Message),
        None => Ok(default),
    }
}
