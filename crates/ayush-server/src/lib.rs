//! HTTP API for AYUSH disease code lookup.
//!
//! # Endpoints
//!
//! - `GET /` - service information
//! - `GET /health` - liveness and table load summary
//! - `POST /lookup` - resolve a disease name
//! - `POST /save_lookup` - store a lookup result
//! - `POST /users`, `POST /login`, `GET /profile/{user_id}` - lookup history
//! - `POST /fhir_resource` - clinical form to collection bundle
//! - `POST /fhir_bundle` - transaction bundle validation

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
