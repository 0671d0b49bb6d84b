//! HTTP server for command submission.
//!
//! # Endpoints
//!
//! - `GET  /healthcheck`  — Liveness probe
//! - `POST /boinc2docker` — Tokenize and run a command, capturing its stdout

pub mod routes;

pub use routes::{app_router, AppState, CommandRequest};
