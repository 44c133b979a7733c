//! Progress statistics: activity streak and per-log totals.

use crate::error::Result;
use crate::store::EventLog;
use crate::types::UserId;
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Derived progress numbers for one user. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsSnapshot {
    /// Consecutive calendar days, ending today, with at least one event
    pub current_streak: u32,
    /// mood + journal + breathing
    pub total_sessions: usize,
    pub breathing_total: usize,
    pub journal_total: usize,
    pub mood_total: usize,
    /// Adopted hobbies (not part of `total_sessions`)
    pub hobby_total: usize,
}

/// Compute stats as of the current local time.
pub fn compute_stats<L: EventLog + ?Sized>(log: &L, user: &UserId) -> Result<UserStatsSnapshot> {
    compute_stats_at(log, user, &Local::now())
}

/// Compute stats as of `now`. Calendar days are taken in `now`'s timezone.
pub fn compute_stats_at<L: EventLog + ?Sized, Tz: TimeZone>(
    log: &L,
    user: &UserId,
    now: &DateTime<Tz>,
) -> Result<UserStatsSnapshot> {
    let moods = log.list_mood_events(user)?;
    let journals = log.list_journal_events(user)?;
    let breathing = log.list_activity_events(user)?;
    let hobby_total = log.list_adopted_hobbies(user)?.len();

    let timestamps = moods
        .iter()
        .map(|m| m.timestamp)
        .chain(journals.iter().map(|j| j.timestamp))
        .chain(breathing.iter().map(|b| b.timestamp));
    let current_streak = current_streak(timestamps, now);

    let snapshot = UserStatsSnapshot {
        current_streak,
        total_sessions: moods.len() + journals.len() + breathing.len(),
        breathing_total: breathing.len(),
        journal_total: journals.len(),
        mood_total: moods.len(),
        hobby_total,
    };

    tracing::debug!(
        user = %user,
        streak = snapshot.current_streak,
        total_sessions = snapshot.total_sessions,
        "Computed stats"
    );
    Ok(snapshot)
}

/// Count consecutive days, walking back from `now`'s date, that contain at
/// least one timestamp. Returns 0 when today has none.
pub fn current_streak<Tz, I>(timestamps: I, now: &DateTime<Tz>) -> u32
where
    Tz: TimeZone,
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let tz = now.timezone();
    let active_days: HashSet<NaiveDate> = timestamps
        .into_iter()
        .map(|ts| ts.with_timezone(&tz).date_naive())
        .collect();

    let mut streak = 0;
    let mut day = now.date_naive();
    while active_days.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}
