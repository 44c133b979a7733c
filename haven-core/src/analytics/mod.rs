//! Analytics for haven
//!
//! Two derived views over a user's event logs:
//! - [`stats`]: activity streak and per-log totals
//! - [`engine`]: emotional-state classification and ranked activity suggestions
//!
//! Everything here is a pure function of the logs plus the catalog. Nothing
//! is cached or persisted.

pub mod catalog;
pub mod classifier;
pub mod engine;
pub mod guidance;
pub mod ranker;
pub mod stats;

pub use catalog::{
    support_resources, Catalog, CatalogEntry, Difficulty, StressLevel, SupportResource,
};
pub use classifier::{classify, EmotionalContext, MoodContext, JOURNAL_WINDOW, MOOD_WINDOW};
pub use engine::{RecommendationEngine, RecommendationReport};
pub use guidance::{GuidanceSource, StaticGuidance};
pub use ranker::{recommend, RankedSuggestions, SuggestionFocus, MAX_SUGGESTIONS};
pub use stats::{compute_stats, compute_stats_at, current_streak, UserStatsSnapshot};
