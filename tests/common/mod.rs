//! A local stand-in for the DigitalOcean domain records API.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "dop_v1_test";
pub const DOMAIN: &str = "example.com";
/// A domain whose first page links to a server outside the mock API.
pub const FOREIGN_LINK_DOMAIN: &str = "foreign.example";

/// A request the mock API received.
#[derive(Debug, Clone)]
pub struct Received {
    pub method: Method,
    pub uri: String,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct MockApi {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Received>>>,
}

impl MockApi {
    pub fn base_url(&self) -> String {
        format!("http://{}/v2", self.addr)
    }

    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }

    fn record(&self, method: Method, uri: &Uri, body: Option<Value>) {
        self.received.lock().unwrap().push(Received {
            method,
            uri: uri.to_string(),
            body,
        });
    }
}

/// Serve the mock API on an ephemeral localhost port.
pub fn spawn_mock_api() -> MockApi {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let mock = MockApi {
        addr: listener.local_addr().unwrap(),
        received: Arc::default(),
    };

    let app = Router::new()
        .route("/v2/account", get(account))
        .route("/v2/domains/:domain/records", get(list_records))
        .route("/v2/domains/:domain/records/:id", axum::routing::put(update_record))
        .with_state(mock.clone());
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(server);
    mock
}

/// An address nothing is listening on.
pub fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn api_error(status: StatusCode, id: &str, message: &str) -> Response {
    (status, Json(json!({"id": id, "message": message}))).into_response()
}

fn unauthorized(headers: &HeaderMap) -> Option<Response> {
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization") {
        Some(value) if value == expected.as_str() => None,
        _ => Some(api_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "Unable to authenticate you",
        )),
    }
}

fn not_found() -> Response {
    api_error(
        StatusCode::NOT_FOUND,
        "not_found",
        "The resource you were accessing could not be found.",
    )
}

async fn account(State(mock): State<MockApi>, uri: Uri, headers: HeaderMap) -> Response {
    mock.record(Method::GET, &uri, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    Json(json!({
        "account": {
            "email": "ddns@example.com",
            "email_verified": true,
            "status": "active",
            "droplet_limit": 25
        }
    }))
    .into_response()
}

async fn list_records(
    State(mock): State<MockApi>,
    Path(domain): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    mock.record(Method::GET, &uri, None);
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    if domain == FOREIGN_LINK_DOMAIN {
        return Json(json!({
            "domain_records": [
                {"id": 7, "type": "A", "name": "home", "data": "1.2.3.4", "ttl": 1800}
            ],
            "links": {"pages": {
                "next": format!("http://{}/v2/domains/{FOREIGN_LINK_DOMAIN}/records?page=2", closed_addr())
            }},
            "meta": {"total": 2}
        }))
        .into_response();
    }
    if domain != DOMAIN {
        return not_found();
    }

    match params.get("page").map(String::as_str) {
        None | Some("1") => Json(json!({
            "domain_records": [
                {"id": 1, "type": "MX", "name": "home", "data": "mail.example.com", "priority": 10, "ttl": 1800},
                {"id": 2, "type": "A", "name": "www", "data": "1.2.3.4", "ttl": 1800}
            ],
            "links": {"pages": {
                "next": format!("http://{}/v2/domains/{DOMAIN}/records?page=2&per_page=2", mock.addr),
                "last": format!("http://{}/v2/domains/{DOMAIN}/records?page=2&per_page=2", mock.addr)
            }},
            "meta": {"total": 3}
        }))
        .into_response(),
        Some("2") => Json(json!({
            "domain_records": [
                {"id": 3, "type": "A", "name": "home", "data": "1.2.3.4", "ttl": 1800}
            ],
            "links": {"pages": {
                "first": format!("http://{}/v2/domains/{DOMAIN}/records?page=1&per_page=2", mock.addr),
                "prev": format!("http://{}/v2/domains/{DOMAIN}/records?page=1&per_page=2", mock.addr)
            }},
            "meta": {"total": 3}
        }))
        .into_response(),
        Some(_) => Json(json!({"domain_records": [], "links": {}, "meta": {"total": 3}}))
            .into_response(),
    }
}

async fn update_record(
    State(mock): State<MockApi>,
    Path((domain, id)): Path<(String, u64)>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.record(Method::PUT, &uri, Some(body.clone()));
    if let Some(rejection) = unauthorized(&headers) {
        return rejection;
    }
    if domain != DOMAIN || ![1, 2, 3].contains(&id) {
        return not_found();
    }
    let Some(data) = body.get("data").and_then(Value::as_str) else {
        return api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "unprocessable_entity",
            "Data needs to be a valid IP address",
        );
    };
    Json(json!({
        "domain_record": {
            "id": id,
            "type": body["type"],
            "name": body["name"],
            "data": data,
            "priority": null,
            "port": null,
            "ttl": 1800,
            "weight": null,
            "flags": null,
            "tag": null
        }
    }))
    .into_response()
}
