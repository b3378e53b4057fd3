//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use rust_decimal::Decimal;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Marketplace collaborator configuration.
    pub marketplace: Marketplace,

    /// Fees configuration.
    pub fees: Fees,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Marketplace collaborator configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Marketplace {
    /// Base URL of the marketplace REST API.
    #[default("http://127.0.0.1:9090/".to_owned())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Marketplace> for service::infra::marketplace::http::Config {
    fn from(value: Marketplace) -> Self {
        let Marketplace { base_url, timeout } = value;
        Self { base_url, timeout }
    }
}

/// Fees configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Fees {
    /// Cleaning fee charged once per booking.
    #[default(Decimal::from(50_000))]
    pub cleaning_fee: Decimal,

    /// Tax rate applied to the subtotal, in percent.
    #[default(Decimal::new(75, 1))]
    pub tax_rate: Decimal,

    /// Fraction of the grand total payable as a deposit, in percent.
    #[default(Decimal::from(70))]
    pub deposit: Decimal,
}

impl TryFrom<Fees> for service::Config {
    type Error = ConfigError;

    fn try_from(value: Fees) -> Result<Self, Self::Error> {
        let Fees {
            cleaning_fee,
            tax_rate,
            deposit,
        } = value;

        let percent = |name: &str, v| {
            common::Percent::new(v).ok_or_else(|| {
                ConfigError::Message(format!(
                    "`fees.{name}` must be within 0 and 100 percent",
                ))
            })
        };

        Ok(Self {
            fees: service::domain::price::FeeSchedule {
                cleaning_fee,
                tax_rate: percent("tax_rate", tax_rate)?,
                deposit: percent("deposit", deposit)?,
            },
        })
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
