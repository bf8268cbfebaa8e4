use serde::Deserialize;

use crate::bus::DeliveryPolicy;
use crate::sink::SinkKind;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the bus and logging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub bus: BusSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the notification bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusSettings {
    /// Send a "Subscribed to ..." notification to every new member.
    pub acknowledge_subscriptions: bool,
    pub delivery: DeliveryPolicy,
}

/// Configuration settings for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub level: String,
    pub sink: SinkKind,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub bus: Option<PartialBusSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialBusSettings {
    pub acknowledge_subscriptions: Option<bool>,
    pub delivery: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
    pub sink: Option<String>,
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            acknowledge_subscriptions: true,
            delivery: DeliveryPolicy::FailFast,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            sink: SinkKind::Tracing,
        }
    }
}
