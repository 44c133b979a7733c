//! # haven
//!
//! HTTP server and command-line report for haven. The binaries share the
//! router and startup wiring defined here.

pub mod api;
pub mod bootstrap;

pub use api::{build_router, AppState};
