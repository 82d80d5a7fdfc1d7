//! do-ddns
//!
//! A minimal dynamic DNS bridge for domains hosted on [DigitalOcean DNS][do-dns].
//!
//! Serves a single shared-secret authenticated [HTTP endpoint][crate::api] that routers, cron
//! jobs or other webhook-capable clients can call to point an existing `A`, `AAAA` or `CNAME`
//! record at new data. The record is looked up by name in the configured domain and updated in
//! place through the [DigitalOcean API][do-api]; records are never created or deleted.
//!
//! TLS is not terminated here. Run behind a reverse proxy when exposing the API beyond
//! localhost.
//!
//! [do-dns]: https://docs.digitalocean.com/products/networking/dns/
//! [do-api]: https://docs.digitalocean.com/reference/api/api-reference/#tag/Domain-Records
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod config;
pub mod error;
pub mod provider;
pub mod records;

pub use api::new as new_http;
pub use config::{Config, Shared};
pub use provider::{DigitalOceanProvider, DnsProvider, DynProvider, InMemoryProvider};
pub use records::{RecordUpdater, Resolver};
