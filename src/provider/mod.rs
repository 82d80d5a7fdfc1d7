//! DNS provider management API access.
//!
//! Supports a narrow, generic interface over a hosted DNS provider: checking the account the
//! credentials belong to, listing the records of a domain, and updating a single record by id.
//!
//! Two implementations are provided, [`digitalocean::DigitalOceanProvider`] and
//! [`memory::InMemoryProvider`]. The former talks to the [DigitalOcean API][do-api] over HTTPS.
//! The latter keeps a fixed record set in memory and records every update it is asked to apply.
//!
//! [do-api]: https://docs.digitalocean.com/reference/api/api-reference/#tag/Domain-Records

use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

pub mod digitalocean;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use digitalocean::DigitalOceanProvider;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryProvider;

/// `DynProvider` is a type alias for a [`DnsProvider`] shared by every in-flight request.
#[allow(clippy::module_name_repetitions)]
pub type DynProvider = Arc<dyn DnsProvider>;

/// Provider-assigned record identifier.
pub type RecordId = u64;

/// The type of a DNS record.
///
/// Only [`RecordType::A`], [`RecordType::AAAA`] and [`RecordType::CNAME`] records can be updated.
/// Every other type is carried as [`RecordType::Other`] so it round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    Other(String),
}

impl RecordType {
    /// Whether records of this type may be resolved and updated.
    #[must_use]
    pub fn is_updatable(&self) -> bool {
        matches!(self, RecordType::A | RecordType::AAAA | RecordType::CNAME)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CNAME => "CNAME",
            RecordType::Other(other) => other,
        }
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CNAME" => RecordType::CNAME,
            _ => RecordType::Other(value),
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        RecordType::from(value.to_string())
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as the provider reports it.
///
/// Fields this crate doesn't act on (TTL, priority, weight...) are kept in `extra` so the record
/// can be echoed back to API clients exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub name: String,
    #[serde(default)]
    pub data: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DnsRecord {
    pub fn new(
        id: RecordId,
        record_type: impl Into<RecordType>,
        name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id,
            record_type: record_type.into(),
            name: name.into(),
            data: data.into(),
            extra: Map::default(),
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} (id {})",
            self.record_type, self.name, self.data, self.id
        )
    }
}

/// The fields sent to the provider when updating a record.
///
/// `data` is left out of the request body entirely when the caller didn't supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// The account the provider credentials belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An async trait describing the DNS provider operations needed to update records in place.
///
/// Implementations make a single attempt per call and report provider failures as
/// [`Error::Provider`]; retrying is left to the caller.
#[allow(clippy::module_name_repetitions)]
#[async_trait::async_trait]
pub trait DnsProvider: Send + Sync {
    /// Fetch the account the credentials belong to. Used as a startup connectivity check.
    async fn get_account(&self) -> Result<Account, Error>;

    /// List every record of the given domain, in provider order.
    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DnsRecord>, Error>;

    /// Replace the record with the given id, returning the record as the provider stored it.
    async fn update_domain_record(
        &self,
        domain: &str,
        id: RecordId,
        update: RecordUpdate,
    ) -> Result<DnsRecord, Error>;
}
