use crate::config::Shared;
use crate::error::Error;
use crate::provider::{DnsRecord, DynProvider};

#[derive(Clone)]
pub struct Resolver {
    config: Shared,
    provider: DynProvider,
}

impl Resolver {
    #[must_use]
    pub fn new(config: Shared, provider: DynProvider) -> Self {
        Self { config, provider }
    }

    /// Find the first updatable record in the configured domain whose name equals `name`.
    ///
    /// The comparison is exact and case-sensitive. Types are filtered before names are
    /// compared, so e.g. an `MX` record is never returned even if it's the only record with
    /// a matching name.
    ///
    /// # Errors
    ///
    /// Returns whatever error the provider reports when listing records. `Ok(None)` means the
    /// listing succeeded but nothing matched.
    pub async fn resolve(&self, name: &str) -> Result<Option<DnsRecord>, Error> {
        let records = self
            .provider
            .list_domain_records(&self.config.domain)
            .await?;
        Ok(records
            .into_iter()
            .filter(|r| r.record_type.is_updatable())
            .find(|r| r.name == name))
    }
}
