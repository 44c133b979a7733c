//! Shared handler state

use super::error::{ApiError, ApiResult};
use haven_core::store::EventStore;
use haven_core::{Error, RecommendationEngine, UserId};
use std::sync::Arc;

/// What every handler receives via `State(..)`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EventStore>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(store: Arc<dyn EventStore>, engine: RecommendationEngine) -> Self {
        Self {
            store,
            engine: Arc::new(engine),
        }
    }

    /// Run a store call on the blocking pool. `what` names the resource for
    /// the 500 message.
    pub async fn run<T, F>(&self, what: &'static str, f: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn EventStore, &RecommendationEngine) -> haven_core::Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let engine = Arc::clone(&self.engine);

        tokio::task::spawn_blocking(move || f(store.as_ref(), engine.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Blocking task failed");
                ApiError::Internal(format!("Failed to fetch {}", what))
            })?
            .map_err(|e| ApiError::from_core(e, what))
    }

    /// Like [`AppState::run`], but 404s first when the user does not exist.
    pub async fn for_user<T, F>(&self, user: UserId, what: &'static str, f: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn EventStore, &RecommendationEngine, &UserId) -> haven_core::Result<T>
            + Send
            + 'static,
    {
        self.run(what, move |store, engine| {
            if store.get_user(&user)?.is_none() {
                return Err(Error::not_found("user", user.as_str()));
            }
            f(store, engine, &user)
        })
        .await
    }
}
