use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{KycError, Result};
use crate::types::AuthToken;

/// Prefix for environment variables read by [`Config::from_env`]
pub const ENV_PREFIX: &str = "YOUVERIFY";

/// Youverify API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Live,
}

impl Environment {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api.sandbox.youverify.co/v2/api/",
            Environment::Live => "https://api.youverify.co/v2/api/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Live => "live",
        }
    }
}

impl FromStr for Environment {
    type Err = KycError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "live" | "production" => Ok(Environment::Live),
            other => Err(KycError::config(format!("Unknown environment '{}'", other))),
        }
    }
}

/// HTTP transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Prefix every request path is resolved against
    pub base_url: String,
    /// Whole-request timeout; `None` waits forever
    pub request_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    /// Treat non-2xx responses as transport failures
    pub error_for_status: bool,
    pub user_agent: String,
}

impl TransportConfig {
    /// Settings for `base_url` with a 30 s request timeout and a 10 s connect
    /// timeout. Set either field to `None` to wait without limit.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_ms: Some(30_000),
            connect_timeout_ms: Some(10_000),
            error_for_status: true,
            user_agent: format!("youverify-kyc/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| KycError::config(format!("Invalid base URL '{}': {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(KycError::config(format!(
                "Base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if !url.path().ends_with('/') {
            warn!(
                "Base URL '{}' has no trailing slash; its last path segment will be replaced by request paths",
                self.base_url
            );
        }

        if self.request_timeout_ms == Some(0) {
            return Err(KycError::config("Request timeout must be > 0"));
        }

        if self.connect_timeout_ms == Some(0) {
            return Err(KycError::config("Connect timeout must be > 0"));
        }

        Ok(())
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub transport: TransportConfig,
    pub token: AuthToken,
}

/// Shape of the variables read from the environment, after prefix stripping
#[derive(Debug, Deserialize)]
struct EnvSettings {
    token: Option<String>,
    environment: Option<String>,
    base_url: Option<String>,
    request_timeout_ms: Option<u64>,
    connect_timeout_ms: Option<u64>,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            return Err(KycError::config("API token required"));
        }

        self.transport.validate()
    }

    /// Sandbox configuration (safe for testing)
    pub fn sandbox(token: impl Into<AuthToken>) -> Self {
        Self::for_environment(Environment::Sandbox, token)
    }

    /// Live configuration (production, billed lookups)
    pub fn live(token: impl Into<AuthToken>) -> Self {
        Self::for_environment(Environment::Live, token)
    }

    /// Configuration pointing at a specific base URL
    pub fn custom(
        environment: Environment,
        base_url: impl Into<String>,
        token: impl Into<AuthToken>,
    ) -> Self {
        let mut config = Self::for_environment(environment, token);
        config.transport.base_url = base_url.into();
        config
    }

    fn for_environment(environment: Environment, token: impl Into<AuthToken>) -> Self {
        Self {
            environment,
            transport: TransportConfig::new(environment.default_base_url()),
            token: token.into(),
        }
    }

    /// Load configuration from `YOUVERIFY_*` variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_environment(::config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from an explicit environment source.
    pub fn from_environment(source: ::config::Environment) -> Result<Self> {
        let settings: EnvSettings = ::config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        let token = settings
            .token
            .ok_or_else(|| KycError::config(format!("{}_TOKEN is not set", ENV_PREFIX)))?;

        let environment = match settings.environment {
            Some(name) => name.parse()?,
            None => Environment::Sandbox,
        };

        let mut config = match settings.base_url {
            Some(base_url) => Self::custom(environment, base_url, token),
            None => Self::for_environment(environment, token),
        };

        if let Some(ms) = settings.request_timeout_ms {
            config.transport.request_timeout_ms = Some(ms);
        }
        if let Some(ms) = settings.connect_timeout_ms {
            config.transport.connect_timeout_ms = Some(ms);
        }

        config.validate()?;
        debug!(
            "Loaded {} configuration for {}",
            config.environment.name(),
            config.transport.base_url
        );
        Ok(config)
    }
}
