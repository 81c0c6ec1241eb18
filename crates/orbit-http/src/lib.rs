//! HTTP client for the space guide backend.
//!
//! This crate implements the core-owned ports over the backend's JSON routes:
//!
//! - [`AskPort`](orbit_core::AskPort): `POST /api/ask`, abortable through a
//!   cancellation token
//! - [`SatellitePort`](orbit_core::SatellitePort): `GET /api/iss-position`
//! - [`ServiceStatusPort`](orbit_core::ServiceStatusPort): `GET /test`
//!
//! # Usage
//!
//! ```ignore
//! use orbit_http::{ApiClientConfig, DefaultApiClient};
//!
//! let client = DefaultApiClient::new(&ApiClientConfig::new().with_base_url("http://127.0.0.1:5000"))?;
//! ```

#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod routes;

pub use client::{DefaultApiClient, OrbitApiClient};
pub use config::ApiClientConfig;
pub use error::{HttpError, HttpResult};
