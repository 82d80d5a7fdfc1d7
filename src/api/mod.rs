//! HTTP API for updating DNS records of the configured domain.
//!
//! # API Endpoints
//!
//! ## `/update` (any method)
//!
//!   Expects the query parameters `secret`, `name` and `data`:
//!
//!   ```bash
//!   ❯ curl 'http://localhost:3000/update?secret=secret-key&name=home&data=203.0.113.7'
//!   {"ok":true,"record":{"id":3352896,"type":"A","name":"home","data":"203.0.113.7","ttl":1800,...}}
//!   ```
//!
//!  `secret` must equal [`Config::secret_key`][crate::config::Config::secret_key]. `name` is
//!  compared exactly against the names of the `A`, `AAAA` and `CNAME` records of
//!  [`Config::domain`][crate::config::Config::domain]; the first match has its data replaced by
//!  `data`, keeping its name and type. `data` isn't validated here, the DNS provider accepts or
//!  rejects it.
//!
//!  Conditions are checked in order and the first that applies decides the response:
//!
//!  | Status | Body                            | When                                  |
//!  |--------|---------------------------------|---------------------------------------|
//!  | 403    | `{"error":"forbidden"}`         | `secret` missing or wrong             |
//!  | 400    | `{"error":"bad request"}`       | `name` missing or empty               |
//!  | 410    | `{"error":"name not found"}`    | no matching record                    |
//!  | 500    | `{"error":"<message>"}`         | the provider failed or rejected it    |
//!  | 200    | `{"ok":true,"record":{...}}`    | the record was updated                |
//!
//!  The `record` in a successful response is the record exactly as the provider returned it.
//!
//! ## Anything else
//!
//!   Returns HTTP 404 (Not Found) and the JSON body `{"error":"not found"}`.

mod api_error;
mod model;
mod routes;
pub mod server;

pub use routes::router;
pub use server::new;
