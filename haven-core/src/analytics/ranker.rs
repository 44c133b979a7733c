//! Catalog filtering and ranking
//!
//! Turns an [`EmotionalContext`] into at most [`MAX_SUGGESTIONS`] catalog
//! entries. Steps:
//! 1. Drop entries whose name matches an adopted hobby (case-insensitive)
//! 2. Pick a [`SuggestionFocus`] and keep only entries it admits
//! 3. Sort by mood boost, descending (crisis-support entries first in a crisis)
//! 4. Truncate
//!
//! There is no fallback: a focus that admits nothing yields no suggestions.

use super::catalog::{
    support_resources, Catalog, CatalogEntry, Difficulty, StressLevel, SupportResource,
};
use super::classifier::{EmotionalContext, MoodContext};
use super::guidance::GuidanceSource;
use crate::types::AdoptedHobby;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 6;

/// Which filter selected the candidates.
///
/// Mirrors the label except that a non-acute user who needs connection gets
/// [`SuggestionFocus::Connection`] regardless of average mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionFocus {
    /// Crisis-support entries only
    Crisis,
    /// High or moderate stress entries, plus crisis support
    StressRelief,
    /// Social entries, the Connection category, or mood boost >= 4
    Connection,
    /// Mood boost >= 3 and not Hard
    Uplift,
    /// Mood boost >= 3
    Maintain,
}

impl SuggestionFocus {
    /// Branches are checked in order; the first that applies wins.
    pub fn for_context(ctx: &EmotionalContext) -> Self {
        match ctx.mood_context {
            MoodContext::Crisis => SuggestionFocus::Crisis,
            MoodContext::HighStress => SuggestionFocus::StressRelief,
            _ if ctx.needs_connection => SuggestionFocus::Connection,
            MoodContext::Moderate => SuggestionFocus::Uplift,
            MoodContext::Good => SuggestionFocus::Maintain,
        }
    }

    pub fn admits(&self, entry: &CatalogEntry) -> bool {
        match self {
            SuggestionFocus::Crisis => entry.is_crisis_support(),
            SuggestionFocus::StressRelief => {
                matches!(
                    entry.stress_level,
                    Some(StressLevel::High) | Some(StressLevel::Moderate)
                ) || entry.is_crisis_support()
            }
            SuggestionFocus::Connection => {
                entry.is_social_support() || entry.category == "Connection" || entry.mood_boost >= 4
            }
            SuggestionFocus::Uplift => {
                entry.mood_boost >= 3 && entry.difficulty != Difficulty::Hard
            }
            SuggestionFocus::Maintain => entry.mood_boost >= 3,
        }
    }
}

/// Output of [`recommend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSuggestions {
    pub focus: SuggestionFocus,
    pub suggestions: Vec<CatalogEntry>,
    pub recommendations: Vec<String>,
    pub support_resources: Vec<SupportResource>,
}

/// Filter and rank the catalog for one user's emotional context.
pub fn recommend(
    catalog: &Catalog,
    ctx: &EmotionalContext,
    adopted: &[AdoptedHobby],
    guidance: &dyn GuidanceSource,
) -> RankedSuggestions {
    let focus = SuggestionFocus::for_context(ctx);
    let crisis = ctx.mood_context == MoodContext::Crisis;

    // (catalog index, entry); the index is the final tie-break
    let mut candidates: Vec<(usize, &CatalogEntry)> = catalog
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| !adopted.iter().any(|h| e.matches_name(&h.name)))
        .filter(|(_, e)| focus.admits(e))
        .collect();

    candidates.sort_by(|(ia, a), (ib, b)| {
        let crisis_first = if crisis {
            b.is_crisis_support().cmp(&a.is_crisis_support())
        } else {
            Ordering::Equal
        };
        crisis_first
            .then_with(|| b.mood_boost.cmp(&a.mood_boost))
            .then_with(|| ia.cmp(ib))
    });

    let suggestions: Vec<CatalogEntry> = candidates
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, e)| e.clone())
        .collect();

    tracing::debug!(
        focus = ?focus,
        label = %ctx.mood_context,
        suggestions = suggestions.len(),
        "Ranked catalog"
    );

    RankedSuggestions {
        focus,
        suggestions,
        recommendations: guidance.guidance(focus),
        support_resources: if ctx.mood_context.is_acute() {
            support_resources()
        } else {
            Vec::new()
        },
    }
}
