//! # haven-core
//!
//! Core library for haven, a personal wellness journal.
//!
//! This library provides:
//! - Domain types for mood check-ins, journal entries, breathing sessions and hobbies
//! - Event-log storage: in-memory and SQLite
//! - Progress stats (streak, totals)
//! - Emotional-state classification and ranked activity suggestions
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use haven_core::{Config, Database, RecommendationEngine, UserId};
//!
//! let config = Config::load().expect("failed to load config");
//!
//! let db = Database::open(&config.storage.database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! let engine = RecommendationEngine::default();
//! let report = engine
//!     .recommend_for_user(&db, &UserId::from("default-user"))
//!     .expect("failed to build report");
//! println!("{}", report.mood_context);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{
    Catalog, CatalogEntry, EmotionalContext, MoodContext, RecommendationEngine,
    RecommendationReport, SupportResource, UserStatsSnapshot,
};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use store::{EventLog, EventStore, MemoryStore};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod store;
pub mod types;
