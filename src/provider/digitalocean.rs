//! A [DigitalOcean API v2][do-api] implementation of the [`DnsProvider`][super::DnsProvider]
//! trait.
//!
//! [do-api]: https://docs.digitalocean.com/reference/api/api-reference/
use crate::config::Config;
use crate::error::Error;
use crate::provider::{Account, DnsProvider, DnsRecord, RecordId, RecordUpdate};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;

/// Records requested per page when listing a domain.
const PAGE_SIZE: u32 = 1000;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct AccountResponse {
    account: Account,
}

#[derive(Deserialize)]
struct RecordResponse {
    domain_record: DnsRecord,
}

#[derive(Deserialize)]
struct RecordsPage {
    domain_records: Vec<DnsRecord>,
    #[serde(default)]
    links: Links,
}

#[derive(Deserialize, Default)]
struct Links {
    #[serde(default)]
    pages: Pages,
}

#[derive(Deserialize, Default)]
struct Pages {
    next: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    id: Option<String>,
    message: String,
}

/// DNS provider backed by the DigitalOcean domain records API.
///
/// Each trait call makes the minimum number of HTTP requests (one, or one per page when listing)
/// with reqwest's default timeouts. Nothing is retried or cached.
#[derive(Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct DigitalOceanProvider {
    access_token: String,
    base_url: String,
    base: Url,
    client: Client,
}

impl DigitalOceanProvider {
    /// Create a provider that authenticates with `access_token` against the API rooted at
    /// `base_url` (e.g. `https://api.digitalocean.com/v2`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `base_url` isn't an absolute URL.
    ///
    /// Returns [`Error::Http`] if the HTTP client can't be constructed.
    pub fn new(access_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self, Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url).map_err(|err| Error::InvalidConfig {
            name: "API_BASE_URL",
            reason: format!("{base_url:?}: {err}"),
        })?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            access_token: access_token.into(),
            base_url,
            base,
            client,
        })
    }

    /// Create a provider from the [`Config::access_token`] and [`Config::api_base_url`].
    ///
    /// # Errors
    ///
    /// See [`DigitalOceanProvider::new`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::new(config.access_token.clone(), config.api_base_url.clone())
    }

    /// Whether `link` points at the same scheme, host and port as the configured API.
    fn same_origin(&self, link: &str) -> bool {
        Url::parse(link).is_ok_and(|link| link.origin() == self.base.origin())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!("provider responded {status}");

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(ErrorResponse {
                    id: Some(id),
                    message,
                }) => format!("{id}: {message}"),
                Ok(ErrorResponse { id: None, message }) => message,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string(),
            };
            return Err(Error::Provider {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl DnsProvider for DigitalOceanProvider {
    async fn get_account(&self) -> Result<Account, Error> {
        let url = format!("{}/account", self.base_url);
        tracing::debug!("GET {url}");
        let res: AccountResponse = self.send(self.client.get(&url)).await?;
        Ok(res.account)
    }

    async fn list_domain_records(&self, domain: &str) -> Result<Vec<DnsRecord>, Error> {
        let mut url = format!(
            "{}/domains/{domain}/records?per_page={PAGE_SIZE}",
            self.base_url
        );
        let mut records = Vec::new();
        loop {
            tracing::debug!("GET {url}");
            let page: RecordsPage = self.send(self.client.get(&url)).await?;
            records.extend(page.domain_records);
            match page.links.pages.next {
                Some(next) if next != url => {
                    // The bearer token is sent with every page request.
                    if !self.same_origin(&next) {
                        return Err(Error::ForeignPageLink(next));
                    }
                    url = next;
                }
                _ => break,
            }
        }
        Ok(records)
    }

    async fn update_domain_record(
        &self,
        domain: &str,
        id: RecordId,
        update: RecordUpdate,
    ) -> Result<DnsRecord, Error> {
        let url = format!("{}/domains/{domain}/records/{id}", self.base_url);
        tracing::debug!("PUT {url}");
        let res: RecordResponse = self.send(self.client.put(&url).json(&update)).await?;
        Ok(res.domain_record)
    }
}

impl fmt::Debug for DigitalOceanProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalOceanProvider")
            .field("access_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
