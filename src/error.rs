//! Error types.

use std::net::SocketAddr;

/// Error enumerates the possible do-ddns error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned for any HTTP API path other than [`/update`][crate::api#update-any-method].
    #[error("not found")]
    NotFound,

    /// Returned when the `secret` query parameter doesn't match
    /// [`Config::secret_key`][crate::config::Config::secret_key].
    #[error("forbidden")]
    Forbidden,

    /// Returned when an authenticated update doesn't carry a non-empty `name`.
    #[error("bad request")]
    BadRequest,

    /// Returned when no A, CNAME or AAAA record in the configured domain has the requested name.
    #[error("name not found")]
    NameNotFound,

    /// Returned when a query parameter that must be given at most once is repeated.
    #[error("query parameter {0:?} given more than once")]
    RepeatedParameter(&'static str),

    /// Returned at startup when a required environment variable is unset or empty.
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Returned at startup when an environment variable holds a value that can't be used.
    #[error("invalid configuration for {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },

    /// Returned when the DNS provider answers a request with a non-success status.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Returned when the request to the DNS provider can't be completed.
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Returned when a provider response links to a page outside the configured API origin.
    #[error("refusing to follow page link outside the API origin: {0}")]
    ForeignPageLink(String),

    /// Returned when a DNS provider response body isn't the JSON shape we expect.
    #[error("invalid JSON: {0}")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when `SERVER_HOST` and `SERVER_PORT` don't resolve to an address the
    /// [HTTP API][crate::api] can bind.
    #[error("failed to resolve bind address {host}:{port}: {reason}")]
    BindAddr {
        host: String,
        port: u16,
        reason: String,
    },

    /// Returned when the [HTTP API][crate::api] listener can't be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: hyper::Error,
    },
}
