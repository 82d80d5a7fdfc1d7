use crate::api::routes;
use crate::config::Shared;
use crate::error::Error;
use crate::provider::DynProvider;
use crate::records::{RecordUpdater, Resolver};
use axum::routing::IntoMakeService;
use axum::Router;
use hyper::server::conn::AddrIncoming;

/// The bound, not yet running, HTTP API server.
pub type Server = hyper::Server<AddrIncoming, IntoMakeService<Router>>;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: Shared,
    pub resolver: Resolver,
    pub updater: RecordUpdater,
}

impl AppState {
    pub(super) fn new(config: Shared, provider: DynProvider) -> Self {
        Self {
            resolver: Resolver::new(config.clone(), provider.clone()),
            updater: RecordUpdater::new(config.clone(), provider),
            config,
        }
    }
}

/// Bind the HTTP API to [`Config::bind_addr`][crate::config::Config::bind_addr].
///
/// # Errors
///
/// Returns [`Error::BindAddr`] if the bind address can't be resolved.
///
/// Returns [`Error::Bind`] if the listener can't be created.
pub fn new(config: Shared, provider: DynProvider) -> Result<Server, Error> {
    let addr = config.bind_addr()?;
    let builder = axum::Server::try_bind(&addr).map_err(|source| Error::Bind { addr, source })?;
    Ok(builder.serve(routes::new(AppState::new(config, provider)).into_make_service()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::provider::InMemoryProvider;
    use std::net::TcpListener;
    use std::sync::Arc;

    fn config(host: &str, port: u16) -> Shared {
        let port = port.to_string();
        Arc::new(
            Config::from_lookup(|key| match key {
                "SERVER_HOST" => Some(host.to_string()),
                "SERVER_PORT" => Some(port.clone()),
                "ACCESS_TOKEN" => Some("tok".to_string()),
                "DOMAIN" => Some("example.com".to_string()),
                _ => None,
            })
            .unwrap(),
        )
    }

    fn provider() -> DynProvider {
        Arc::new(InMemoryProvider::new("example.com", vec![]))
    }

    #[tokio::test]
    async fn unresolvable_host_is_a_bind_failure() {
        // Interior NUL bytes are rejected before any lookup is attempted.
        let Err(err) = new(config("bad\0host", 3000), provider()) else {
            panic!("bind unexpectedly succeeded");
        };
        assert!(matches!(err, Error::BindAddr { port: 3000, .. }), "{err:?}");
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = taken.local_addr().unwrap().port();
        let Err(err) = new(config("127.0.0.1", port), provider()) else {
            panic!("bind unexpectedly succeeded");
        };
        assert!(matches!(err, Error::Bind { .. }), "{err:?}");
    }
}
