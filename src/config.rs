use std::env;
use std::fmt;
use std::time::Duration;

use crate::registry::ClientIdentity;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PCDOMAINS_SUFFIX: &str = "/pcdomains";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Startup configuration, read once from the environment
#[derive(Clone)]
pub struct Config {
    pub url: String,
    pub user: String,
    pub password: String,
    pub context: String,
    pub ssl_user: String,
    pub ssl_password: String,
    pub ssl_context: String,
    pub pcdomains_suffix: String,
    pub timeout: Option<Duration>,
    pub port: u16,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("context", &self.context)
            .field("ssl_user", &self.ssl_user)
            .field("ssl_password", &"<redacted>")
            .field("ssl_context", &self.ssl_context)
            .field("pcdomains_suffix", &self.pcdomains_suffix)
            .field("timeout", &self.timeout)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load from the process environment. Call `dotenv::dotenv()` first to
    /// pick up a local `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let timeout = match lookup("DOMAINROBOT_TIMEOUT_SECS") {
            Some(value) => Some(Duration::from_secs(value.trim().parse::<u64>().map_err(|_| {
                ConfigError::Invalid {
                    name: "DOMAINROBOT_TIMEOUT_SECS",
                    value: value.clone(),
                }
            })?)),
            None => None,
        };

        let port_var = lookup("SERVER_PORT")
            .map(|value| ("SERVER_PORT", value))
            .or_else(|| lookup("PORT").map(|value| ("PORT", value)));

        let port = match port_var {
            Some((name, value)) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name, value })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            url: required("DOMAINROBOT_URL")?,
            user: required("DOMAINROBOT_USER")?,
            password: required("DOMAINROBOT_PASSWORD")?,
            context: required("DOMAINROBOT_CONTEXT")?,
            ssl_user: required("DOMAINROBOT_SSL_USER")?,
            ssl_password: required("DOMAINROBOT_SSL_PASSWORD")?,
            ssl_context: required("DOMAINROBOT_SSL_CONTEXT")?,
            pcdomains_suffix: lookup("DOMAINROBOT_URL_PCDOMAINS_SUFFIX")
                .unwrap_or_else(|| DEFAULT_PCDOMAINS_SUFFIX.to_string()),
            timeout,
            port,
        })
    }

    pub fn general_identity(&self) -> ClientIdentity {
        ClientIdentity {
            name: "general",
            url: self.url.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            context: self.context.clone(),
        }
    }

    pub fn ssl_identity(&self) -> ClientIdentity {
        ClientIdentity {
            name: "ssl",
            url: self.url.clone(),
            user: self.ssl_user.clone(),
            password: self.ssl_password.clone(),
            context: self.ssl_context.clone(),
        }
    }

    /// General credentials against the valuation/research base URL
    pub fn pc_domains_identity(&self) -> ClientIdentity {
        ClientIdentity {
            name: "pc_domains",
            url: format!(
                "{}/{}",
                self.url.trim_end_matches('/'),
                self.pcdomains_suffix.trim_start_matches('/')
            ),
            ..self.general_identity()
        }
    }
}
