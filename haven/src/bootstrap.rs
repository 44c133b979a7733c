//! Startup wiring shared by the binaries

use anyhow::{Context, Result};
use haven_core::config::StorageBackend;
use haven_core::store::EventStore;
use haven_core::{Catalog, Config, Database, MemoryStore, NewUser, RecommendationEngine, User};
use std::sync::Arc;

/// Open the configured event store, running migrations for SQLite.
pub fn open_store(config: &Config) -> Result<Arc<dyn EventStore>> {
    match config.storage.backend {
        StorageBackend::Sqlite => {
            let path = config.storage.database_path();
            let db = Database::open(&path)
                .with_context(|| format!("failed to open database at {}", path.display()))?;
            db.migrate().context("failed to run database migrations")?;
            tracing::info!(path = %path.display(), "Opened SQLite store");
            Ok(Arc::new(db))
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store; nothing will be persisted");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Create the demo account unless it already exists.
pub fn seed_demo_user(store: &dyn EventStore) -> Result<()> {
    let demo = User::demo();
    if store.get_user(&demo.id)?.is_some() {
        return Ok(());
    }
    store
        .create_user(NewUser {
            id: Some(demo.id.to_string()),
            username: demo.username,
            name: demo.name,
        })
        .context("failed to seed demo user")?;
    tracing::info!(user = %demo.id, "Seeded demo user");
    Ok(())
}

/// Build the recommendation engine from the configured catalog.
pub fn load_engine(config: &Config) -> Result<RecommendationEngine> {
    let catalog = match config.recommendations.catalog_path {
        Some(ref path) => Catalog::load_from(path)
            .with_context(|| format!("failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin(),
    };
    tracing::info!(entries = catalog.len(), "Loaded activity catalog");
    Ok(RecommendationEngine::new(catalog))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_demo_user_is_idempotent() {
        let store = MemoryStore::new();
        seed_demo_user(&store).unwrap();
        seed_demo_user(&store).unwrap();
        let demo = store.get_user(&User::demo().id).unwrap().unwrap();
        assert_eq!(demo.name, "Alex");
    }

    #[test]
    fn test_memory_backend() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        let store = open_store(&config).unwrap();
        assert!(store.get_user(&User::demo().id).unwrap().is_none());
    }

    #[test]
    fn test_default_engine_uses_builtin_catalog() {
        let engine = load_engine(&Config::default()).unwrap();
        assert_eq!(engine.catalog().len(), 18);
    }
}
