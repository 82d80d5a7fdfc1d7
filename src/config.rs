//! Environment-sourced configuration.
//!
//! | Variable       | Default                           |
//! |----------------|-----------------------------------|
//! | `SECRET_KEY`   | `secret-key`                      |
//! | `SERVER_HOST`  | `127.0.0.1`                       |
//! | `SERVER_PORT`  | `3000`                            |
//! | `ACCESS_TOKEN` | required                          |
//! | `DOMAIN`       | required                          |
//! | `API_BASE_URL` | `https://api.digitalocean.com/v2` |
//!
//! Empty values are treated the same as unset ones.
use crate::error::Error;
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

pub type Shared = Arc<Config>;

pub const DEFAULT_SECRET_KEY: &str = "secret-key";
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "https://api.digitalocean.com/v2";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Shared secret callers must pass as the `secret` query parameter.
    pub secret_key: String,
    pub server_host: String,
    pub server_port: u16,
    /// DigitalOcean personal access token.
    pub access_token: String,
    /// The hosted domain whose records can be updated, e.g. `example.com`.
    pub domain: String,
    pub api_base_url: String,
}

impl Config {
    /// Load a [`Config`] from the process environment, reading a `.env` file in the working
    /// directory first if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] if `ACCESS_TOKEN` or `DOMAIN` is absent.
    ///
    /// Returns [`Error::InvalidConfig`] if `SERVER_PORT` isn't a valid port number.
    pub fn from_env() -> Result<Self, Error> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a [`Config`] from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let server_port = match var("SERVER_PORT") {
            None => DEFAULT_SERVER_PORT,
            Some(port) => port.trim().parse::<u16>().map_err(|err| Error::InvalidConfig {
                name: "SERVER_PORT",
                reason: format!("{port:?}: {err}"),
            })?,
        };

        Ok(Self {
            secret_key: var("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string()),
            server_host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            access_token: var("ACCESS_TOKEN").ok_or(Error::MissingConfig("ACCESS_TOKEN"))?,
            domain: var("DOMAIN").ok_or(Error::MissingConfig("DOMAIN"))?,
            api_base_url: var("API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }

    /// Resolve the configured host and port to the address the HTTP API binds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BindAddr`] if `SERVER_HOST` doesn't resolve to any address.
    pub fn bind_addr(&self) -> Result<SocketAddr, Error> {
        let unresolved = |reason: String| Error::BindAddr {
            host: self.server_host.clone(),
            port: self.server_port,
            reason,
        };
        (self.server_host.as_str(), self.server_port)
            .to_socket_addrs()
            .map_err(|err| unresolved(err.to_string()))?
            .next()
            .ok_or_else(|| unresolved("no addresses".to_string()))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"<REDACTED>")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("access_token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
