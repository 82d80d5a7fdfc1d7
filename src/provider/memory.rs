use crate::error::Error;
use crate::provider::{Account, DnsProvider, DnsRecord, RecordId, RecordUpdate};
use serde_json::Map;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An update the provider was asked to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCall {
    pub domain: String,
    pub id: RecordId,
    pub update: RecordUpdate,
}

#[derive(Debug, Default)]
struct State {
    domains: HashMap<String, Vec<DnsRecord>>,
    updates: Vec<UpdateCall>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Failures {
    account: bool,
    list: bool,
    update: bool,
}

/// An in-memory DNS provider. Updates are applied to the held record set and recorded so they
/// can be inspected later. Clones share the same record set.
#[derive(Debug, Default, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct InMemoryProvider {
    state: Arc<RwLock<State>>,
    failures: Failures,
}

impl InMemoryProvider {
    /// Create a provider hosting a single domain with the given records, in that order.
    #[must_use]
    pub fn new(domain: impl Into<String>, records: Vec<DnsRecord>) -> Self {
        let mut domains = HashMap::new();
        domains.insert(domain.into(), records);
        Self {
            state: Arc::new(RwLock::new(State {
                domains,
                updates: Vec::new(),
            })),
            failures: Failures::default(),
        }
    }

    /// Make [`DnsProvider::get_account`] fail as if the credentials were rejected.
    #[must_use]
    pub fn failing_account(mut self) -> Self {
        self.failures.account = true;
        self
    }

    /// Make [`DnsProvider::list_domain_records`] fail as if the provider were unavailable.
    #[must_use]
    pub fn failing_list(mut self) -> Self {
        self.failures.list = true;
        self
    }

    /// Make [`DnsProvider::update_domain_record`] fail as if the provider were unavailable.
    #[must_use]
    pub fn failing_update(mut self) -> Self {
        self.failures.update = true;
        self
    }

    /// Every update call received so far, oldest first.
    pub async fn updates(&self) -> Vec<UpdateCall> {
        self.state.read().await.updates.clone()
    }

    /// The current record set of a domain.
    pub async fn records(&self, domain: &str) -> Vec<DnsRecord> {
        self.state
            .read()
            .await
            .domains
            .get(domain)
            .cloned()
            .unwrap_or_default()
    }

    fn unavailable() -> Error {
        Error::Provider {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }

    fn not_found() -> Error {
        Error::Provider {
            status: 404,
            message: "not_found: The resource you were accessing could not be found.".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for InMemoryProvider {
    async fn get_account(&self) -> Result<Account, Error> {
        if self.failures.account {
            return Err(Error::Provider {
                status: 401,
                message: "unauthorized: Unable to authenticate you".to_string(),
            });
        }
        Ok(Account {
            email: "ddns@example.com".to_string(),
            extra: Map::default(),
        })
    }

    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DnsRecord>, Error> {
        if self.failures.list {
            return Err(Self::unavailable());
        }
        self.state
            .read()
            .await
            .domains
            .get(domain)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn update_domain_record(
        &self,
        domain: &str,
        id: RecordId,
        update: RecordUpdate,
    ) -> Result<DnsRecord, Error> {
        let mut state = self.state.write().await;
        state.updates.push(UpdateCall {
            domain: domain.to_string(),
            id,
            update: update.clone(),
        });
        if self.failures.update {
            return Err(Self::unavailable());
        }

        let Some(data) = update.data else {
            return Err(Error::Provider {
                status: 422,
                message: "unprocessable_entity: Data needs to be provided".to_string(),
            });
        };
        let record = state
            .domains
            .get_mut(domain)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
            .ok_or_else(Self::not_found)?;
        record.name = update.name;
        record.record_type = update.record_type;
        record.data = data;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RecordType;

    #[tokio::test]
    async fn updates_apply_in_place_and_are_recorded() {
        let provider =
            InMemoryProvider::new("example.com", vec![DnsRecord::new(1, "A", "home", "1.2.3.4")]);
        let update = RecordUpdate {
            name: "home".to_string(),
            record_type: RecordType::A,
            data: Some("5.6.7.8".to_string()),
        };

        let updated = provider
            .update_domain_record("example.com", 1, update.clone())
            .await
            .unwrap();
        assert_eq!(updated.data, "5.6.7.8");
        assert_eq!(provider.records("example.com").await[0].data, "5.6.7.8");
        assert_eq!(
            provider.updates().await,
            vec![UpdateCall {
                domain: "example.com".to_string(),
                id: 1,
                update
            }]
        );
    }

    #[tokio::test]
    async fn unknown_domain_and_record_are_provider_errors() {
        let provider = InMemoryProvider::new("example.com", vec![]);
        assert!(matches!(
            provider.list_domain_records("example.org").await,
            Err(Error::Provider { status: 404, .. })
        ));
        let update = RecordUpdate {
            name: "home".to_string(),
            record_type: RecordType::A,
            data: Some("5.6.7.8".to_string()),
        };
        assert!(matches!(
            provider.update_domain_record("example.com", 7, update).await,
            Err(Error::Provider { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn missing_data_is_rejected() {
        let provider =
            InMemoryProvider::new("example.com", vec![DnsRecord::new(1, "A", "home", "1.2.3.4")]);
        let update = RecordUpdate {
            name: "home".to_string(),
            record_type: RecordType::A,
            data: None,
        };
        assert!(matches!(
            provider.update_domain_record("example.com", 1, update).await,
            Err(Error::Provider { status: 422, .. })
        ));
        assert_eq!(provider.records("example.com").await[0].data, "1.2.3.4");
    }

    #[tokio::test]
    async fn failures_can_be_injected() {
        let provider = InMemoryProvider::new("example.com", vec![])
            .failing_account()
            .failing_list();
        assert!(provider.get_account().await.is_err());
        assert!(provider.list_domain_records("example.com").await.is_err());
    }
}
