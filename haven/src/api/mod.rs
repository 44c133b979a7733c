//! HTTP boundary layer
//!
//! Thin JSON adapter over [`haven_core::store::EventStore`] and
//! [`haven_core::RecommendationEngine`]. Handlers validate, check the user
//! exists, and hand off to the blocking pool; all decisions live in the core.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use router::build_router;
pub use state::AppState;
