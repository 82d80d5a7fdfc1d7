use crate::api::api_error::APIError;
use crate::api::model::{Param, UpdateRecordRequest, UpdateRecordResult};
use crate::api::server::AppState;
use crate::config::Shared;
use crate::error::Error;
use crate::provider::DynProvider;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

/// Build the API [`Router`] serving updates for `config` through `provider`.
pub fn router(config: Shared, provider: DynProvider) -> Router {
    new(AppState::new(config, provider))
}

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/update", any(update))
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        // The query carries the shared secret, so spans record the path only.
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::debug_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .with_state(state)
}

async fn log_request<B>(request: Request<B>, next: Next<B>) -> Response {
    tracing::info!(
        method = %request.method(),
        path = %request.uri().path(),
        "request"
    );
    next.run(request).await
}

#[allow(clippy::unused_async)]
async fn not_found() -> APIError {
    Error::NotFound.into()
}

async fn update(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<UpdateRecordResult>, APIError> {
    let req = UpdateRecordRequest::from_pairs(pairs);

    if !req.secret_matches(&state.config.secret_key) {
        tracing::debug!("rejected update with invalid secret");
        return Err(Error::Forbidden.into());
    }

    if req.name_missing() {
        tracing::debug!("rejected update without a record name");
        return Err(Error::BadRequest.into());
    }

    let resolved = match req.name.single() {
        Some(name) => state.resolver.resolve(name).await,
        None => Ok(None),
    };
    let record = match resolved {
        Ok(Some(record)) => record,
        Ok(None) => {
            tracing::debug!(
                "no updatable record named {:?} in {}",
                req.name,
                state.config.domain
            );
            return Err(Error::NameNotFound.into());
        }
        Err(err) => {
            tracing::error!("domain update failed: {err}");
            return Err(err.into());
        }
    };

    let data = match req.data {
        Param::Missing => None,
        Param::Single(data) => Some(data),
        Param::Repeated(_) => {
            let err = Error::RepeatedParameter("data");
            tracing::error!("domain update failed: {err}");
            return Err(err.into());
        }
    };

    match state.updater.apply_update(&record, data).await {
        Ok(record) => {
            tracing::info!("updated {record}");
            Ok(Json(UpdateRecordResult { ok: true, record }))
        }
        Err(err) => {
            tracing::error!("domain update failed: {err}");
            Err(err.into())
        }
    }
}
