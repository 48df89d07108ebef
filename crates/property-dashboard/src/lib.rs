//! Property search relay. Queries are forwarded to the upstream listing API
//! and every answer goes back through `propjson`'s safe serializer.

pub mod cli;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod routes;

pub use crate::gateway::{FetchResult, HttpUpstream, PropertyQuery, Upstream, respond};
pub use crate::routes::{AppState, router};
