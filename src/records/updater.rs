use crate::config::Shared;
use crate::error::Error;
use crate::provider::{DnsRecord, DynProvider, RecordUpdate};

#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct RecordUpdater {
    config: Shared,
    provider: DynProvider,
}

impl RecordUpdater {
    #[must_use]
    pub fn new(config: Shared, provider: DynProvider) -> Self {
        Self { config, provider }
    }

    /// Replace the data of a resolved record, keeping its name and type.
    ///
    /// `data` is passed to the provider as given; when it's `None` the provider decides whether
    /// that's acceptable.
    ///
    /// # Errors
    ///
    /// Returns the provider's error unchanged if the update is rejected or can't be sent.
    pub async fn apply_update(
        &self,
        record: &DnsRecord,
        data: Option<String>,
    ) -> Result<DnsRecord, Error> {
        tracing::info!(
            "updating {} record {:?} with {:?}",
            record.record_type,
            record.name,
            data
        );
        let update = RecordUpdate {
            name: record.name.clone(),
            record_type: record.record_type.clone(),
            data,
        };
        self.provider
            .update_domain_record(&self.config.domain, record.id, update)
            .await
    }
}
