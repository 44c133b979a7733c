//! Recommendation orchestration.
//!
//! [`RecommendationEngine`] is the single entry point the boundary layer
//! calls. It pulls the user's logs through an [`EventLog`], classifies,
//! ranks, and packages the result. It holds no per-user state, so repeated
//! calls over unchanged logs produce identical reports.

use super::catalog::{Catalog, CatalogEntry, SupportResource};
use super::classifier::{classify, MoodContext};
use super::guidance::{GuidanceSource, StaticGuidance};
use super::ranker::recommend;
use super::stats::{compute_stats, UserStatsSnapshot};
use crate::error::Result;
use crate::store::EventLog;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything the activity-suggestion view needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationReport {
    pub suggestions: Vec<CatalogEntry>,
    pub average_mood: f64,
    pub mood_context: MoodContext,
    pub recommendations: Vec<String>,
    pub emotional_patterns: BTreeMap<String, u32>,
    pub support_resources: Vec<SupportResource>,
}

/// Classifier + ranker over a fixed catalog.
#[derive(Clone)]
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    guidance: Arc<dyn GuidanceSource>,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_guidance(catalog, Arc::new(StaticGuidance))
    }

    pub fn with_guidance(catalog: Catalog, guidance: Arc<dyn GuidanceSource>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            guidance,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build a recommendation report for one user.
    ///
    /// A user with no history gets the neutral report (average 3, moderate).
    /// Log failures propagate unchanged.
    pub fn recommend_for_user<L: EventLog + ?Sized>(
        &self,
        log: &L,
        user: &UserId,
    ) -> Result<RecommendationReport> {
        let moods = log.list_mood_events(user)?;
        let journals = log.list_journal_events(user)?;
        let adopted = log.list_adopted_hobbies(user)?;

        let ctx = classify(&moods, &journals);
        tracing::debug!(
            user = %user,
            average_mood = ctx.average_mood,
            mood_context = %ctx.mood_context,
            low_mood_count = ctx.low_mood_count,
            needs_connection = ctx.needs_connection,
            "Classified emotional state"
        );

        let ranked = recommend(&self.catalog, &ctx, &adopted, self.guidance.as_ref());

        Ok(RecommendationReport {
            suggestions: ranked.suggestions,
            average_mood: ctx.average_mood,
            mood_context: ctx.mood_context,
            recommendations: ranked.recommendations,
            emotional_patterns: ctx.emotional_patterns,
            support_resources: ranked.support_resources,
        })
    }

    /// Progress stats for one user as of now.
    pub fn stats_for_user<L: EventLog + ?Sized>(
        &self,
        log: &L,
        user: &UserId,
    ) -> Result<UserStatsSnapshot> {
        compute_stats(log, user)
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}
