//! Emotional-state classification
//!
//! Reads the most recent mood check-ins and journal entries and assigns one
//! of four labels. Checks run in priority order and the first match wins:
//!
//! | Label | Condition |
//! |-------|-----------|
//! | `crisis` | average mood < 2, or more than 5 check-ins at 2 or below |
//! | `high-stress` | more than 3 anxious/stressed/overwhelmed tags, or average < 2.5 |
//! | `moderate` | average < 3.5 |
//! | `good` | everything else |
//!
//! `needs_connection` is a separate signal (repeated sadness or loneliness)
//! that the ranker consults only when the label is not acute.

use crate::types::{JournalEvent, MoodEvent, Timestamped};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of mood check-ins considered.
pub const MOOD_WINDOW: usize = 14;
/// Number of journal entries considered.
pub const JOURNAL_WINDOW: usize = 10;

/// Average used when there are no check-ins at all.
const NEUTRAL_MOOD: f64 = 3.0;
/// Scores at or below this count as a low day.
const LOW_MOOD_SCORE: u8 = 2;
const STRESS_TAGS: [&str; 3] = ["anxious", "stressed", "overwhelmed"];

/// Inferred emotional state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoodContext {
    Crisis,
    HighStress,
    Moderate,
    Good,
}

impl MoodContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodContext::Crisis => "crisis",
            MoodContext::HighStress => "high-stress",
            MoodContext::Moderate => "moderate",
            MoodContext::Good => "good",
        }
    }

    /// Crisis or high stress: the states that surface support lines.
    pub fn is_acute(&self) -> bool {
        matches!(self, MoodContext::Crisis | MoodContext::HighStress)
    }
}

impl std::fmt::Display for MoodContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the ranker needs to know about the user's recent state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalContext {
    pub average_mood: f64,
    pub mood_context: MoodContext,
    /// Tag -> occurrences across the journal window
    pub emotional_patterns: BTreeMap<String, u32>,
    /// Check-ins in the window scored 2 or lower
    pub low_mood_count: usize,
    pub needs_connection: bool,
}

impl EmotionalContext {
    /// Occurrences of one tag in the journal window.
    pub fn pattern_count(&self, tag: &str) -> u32 {
        self.emotional_patterns.get(tag).copied().unwrap_or(0)
    }
}

/// The newest `n` events, newest first. Equal timestamps order by id.
fn most_recent<T: Timestamped>(events: &[T], n: usize) -> Vec<&T> {
    let mut sorted: Vec<&T> = events.iter().collect();
    sorted.sort_by(|a, b| {
        b.timestamp()
            .cmp(&a.timestamp())
            .then_with(|| a.event_id().cmp(b.event_id()))
    });
    sorted.truncate(n);
    sorted
}

/// Classify a user's emotional state from their logs.
///
/// Input order does not matter; events are ordered by timestamp before the
/// windows are applied.
pub fn classify(moods: &[MoodEvent], journals: &[JournalEvent]) -> EmotionalContext {
    let recent_moods = most_recent(moods, MOOD_WINDOW);
    let recent_journals = most_recent(journals, JOURNAL_WINDOW);

    let average_mood = if recent_moods.is_empty() {
        NEUTRAL_MOOD
    } else {
        let sum: u32 = recent_moods.iter().map(|m| u32::from(m.mood_score)).sum();
        f64::from(sum) / recent_moods.len() as f64
    };

    let mut emotional_patterns: BTreeMap<String, u32> = BTreeMap::new();
    for entry in &recent_journals {
        for tag in &entry.emotion_tags {
            *emotional_patterns.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let low_mood_count = recent_moods
        .iter()
        .filter(|m| m.mood_score <= LOW_MOOD_SCORE)
        .count();
    let stress_tags: u32 = STRESS_TAGS
        .iter()
        .map(|tag| emotional_patterns.get(*tag).copied().unwrap_or(0))
        .sum();

    let mood_context = if average_mood < 2.0 || low_mood_count > 5 {
        MoodContext::Crisis
    } else if stress_tags > 3 || average_mood < 2.5 {
        MoodContext::HighStress
    } else if average_mood < 3.5 {
        MoodContext::Moderate
    } else {
        MoodContext::Good
    };

    let sad = emotional_patterns.get("sad").copied().unwrap_or(0);
    let lonely = emotional_patterns.get("lonely").copied().unwrap_or(0);
    let needs_connection = sad > 2 || lonely > 1;

    EmotionalContext {
        average_mood,
        mood_context,
        emotional_patterns,
        low_mood_count,
        needs_connection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    fn moods(scores: &[u8]) -> Vec<MoodEvent> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| MoodEvent {
                id: format!("m{}", i),
                user_id: UserId::from("u"),
                mood_score: score,
                notes: None,
                timestamp: base() + Duration::hours(i as i64),
            })
            .collect()
    }

    fn journals(tag_sets: &[&[&str]]) -> Vec<JournalEvent> {
        tag_sets
            .iter()
            .enumerate()
            .map(|(i, tags)| JournalEvent {
                id: format!("j{}", i),
                user_id: UserId::from("u"),
                content: "entry".to_string(),
                emotion_tags: tags.iter().map(|t| t.to_string()).collect(),
                timestamp: base() + Duration::hours(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_cold_start_is_neutral() {
        let ctx = classify(&[], &[]);
        assert_eq!(ctx.average_mood, 3.0);
        assert_eq!(ctx.mood_context, MoodContext::Moderate);
        assert!(ctx.emotional_patterns.is_empty());
        assert!(!ctx.needs_connection);
    }

    #[test]
    fn test_all_ones_is_crisis() {
        let ctx = classify(&moods(&[1; 14]), &[]);
        assert_eq!(ctx.average_mood, 1.0);
        assert_eq!(ctx.mood_context, MoodContext::Crisis);
        assert_eq!(ctx.low_mood_count, 14);
    }

    #[test]
    fn test_low_count_triggers_crisis_despite_average() {
        // six 2s and eight 5s average to ~3.7, but six low days is a crisis
        let mut scores = vec![2u8; 6];
        scores.extend([5u8; 8]);
        let ctx = classify(&moods(&scores), &[]);
        assert!(ctx.average_mood > 3.5);
        assert_eq!(ctx.mood_context, MoodContext::Crisis);
    }

    #[test]
    fn test_five_low_days_with_healthy_average_is_not_crisis() {
        // five 2s and nine 5s average to ~3.9; only a sixth low day tips it over
        let mut scores = vec![2u8; 5];
        scores.extend([5u8; 9]);
        let ctx = classify(&moods(&scores), &[]);
        assert_eq!(ctx.low_mood_count, 5);
        assert!(ctx.average_mood > 3.5);
        assert_eq!(ctx.mood_context, MoodContext::Good);
    }

    #[test]
    fn test_equal_timestamps_ignore_input_order() {
        // 15 check-ins at one instant, so the window has to drop exactly one
        let events: Vec<MoodEvent> = (0..15)
            .map(|i| MoodEvent {
                id: format!("m{:02}", i),
                user_id: UserId::from("u"),
                mood_score: if i % 2 == 0 { 5 } else { 1 },
                notes: None,
                timestamp: base(),
            })
            .collect();
        let mut reversed = events.clone();
        reversed.reverse();

        let forward = classify(&events, &[]);
        assert_eq!(forward, classify(&reversed, &[]));
        // m14 (a 5) sorts last and falls outside the window
        assert_eq!(forward.low_mood_count, 7);
        assert_eq!(forward.average_mood, 3.0);
    }

    #[test]
    fn test_crisis_beats_stress_tags() {
        let tags: &[&[&str]] = &[&["anxious", "stressed"], &["overwhelmed", "anxious"]];
        let ctx = classify(&moods(&[1, 1, 2]), &journals(tags));
        assert_eq!(ctx.mood_context, MoodContext::Crisis);
    }

    #[test]
    fn test_stress_tags_trigger_high_stress() {
        let tags: &[&[&str]] = &[&["anxious", "stressed"], &["overwhelmed", "anxious"]];
        let ctx = classify(&moods(&[4, 4, 4]), &journals(tags));
        assert_eq!(ctx.pattern_count("anxious"), 2);
        assert_eq!(ctx.mood_context, MoodContext::HighStress);

        // exactly three is not enough
        let tags: &[&[&str]] = &[&["anxious", "stressed"], &["overwhelmed"]];
        let ctx = classify(&moods(&[4, 4, 4]), &journals(tags));
        assert_eq!(ctx.mood_context, MoodContext::Good);
    }

    #[test]
    fn test_average_thresholds() {
        assert_eq!(
            classify(&moods(&[2, 3]), &[]).mood_context,
            MoodContext::Moderate
        );
        assert_eq!(
            classify(&moods(&[2, 2, 3]), &[]).mood_context,
            MoodContext::HighStress
        );
        assert_eq!(
            classify(&moods(&[3, 4]), &[]).mood_context,
            MoodContext::Good
        );
    }

    #[test]
    fn test_mood_window_uses_most_recent() {
        // 14 recent 5s preceded by older 1s that must be ignored
        let mut events = moods(&[1; 10]);
        let recent: Vec<MoodEvent> = moods(&[5; 14])
            .into_iter()
            .map(|mut e| {
                e.timestamp += Duration::days(30);
                e
            })
            .collect();
        events.extend(recent);
        events.reverse();

        let ctx = classify(&events, &[]);
        assert_eq!(ctx.average_mood, 5.0);
        assert_eq!(ctx.mood_context, MoodContext::Good);
    }

    #[test]
    fn test_journal_window_counts_tags_per_occurrence() {
        let mut sets: Vec<&[&str]> = vec![&["lonely"][..]; 5];
        sets.extend(vec![&["sad", "sad"][..]; 10]);
        let ctx = classify(&[], &journals(&sets));
        // only the newest 10 entries count, and a tag counts each time it appears
        assert_eq!(ctx.pattern_count("sad"), 20);
        assert_eq!(ctx.pattern_count("lonely"), 0);
        assert!(ctx.needs_connection);
    }

    #[test]
    fn test_needs_connection_thresholds() {
        let tags: &[&[&str]] = &[&["lonely"], &["lonely"]];
        assert!(classify(&[], &journals(tags)).needs_connection);

        let tags: &[&[&str]] = &[&["sad"], &["sad"], &["lonely"]];
        assert!(!classify(&[], &journals(tags)).needs_connection);
    }

    #[test]
    fn test_label_wire_format() {
        assert_eq!(
            serde_json::to_value(MoodContext::HighStress).unwrap(),
            "high-stress"
        );
        assert_eq!(MoodContext::Crisis.to_string(), "crisis");
        assert!(MoodContext::HighStress.is_acute());
        assert!(!MoodContext::Moderate.is_acute());
    }
}
