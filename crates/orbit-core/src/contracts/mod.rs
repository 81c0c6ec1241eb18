//! Wire contracts shared between the HTTP client and the core services.

pub mod http;
