//! [`Config`]-related definitions.

use common::Currency;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::payment;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Initial fleet configuration.
    pub fleet: Fleet,

    /// Payment gateway configuration.
    pub payment: Payment,

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

/// Service configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [`Currency`] rentals are priced in.
    #[default(Currency::Usd)]
    pub currency: Currency,
}

impl From<Service> for service::Config {
    fn from(value: Service) -> Self {
        let Service { currency } = value;
        Self { currency }
    }
}

/// Initial fleet configuration.
///
/// [`Vehicle`]s are added on startup, standard ones first.
///
/// [`Vehicle`]: service::domain::Vehicle
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Fleet {
    /// Number of standard [`Vehicle`]s.
    ///
    /// [`Vehicle`]: service::domain::Vehicle
    #[default(20)]
    pub standard: u16,

    /// Number of premium [`Vehicle`]s.
    ///
    /// [`Vehicle`]: service::domain::Vehicle
    #[default(10)]
    pub premium: u16,
}

/// Payment gateway configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Payment {
    /// Probability of a payment to be approved, within `[0, 1]` range.
    #[default(payment::Simulated::DEFAULT_APPROVAL_RATE)]
    pub approval_rate: f64,
}

impl TryFrom<Payment> for payment::Simulated {
    type Error = ConfigError;

    fn try_from(value: Payment) -> Result<Self, Self::Error> {
        let Payment { approval_rate } = value;
        Self::new(approval_rate).ok_or_else(|| {
            ConfigError::Message(format!(
                "`payment.approval_rate` must be within `[0, 1]`, \
                 got: {approval_rate}",
            ))
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
