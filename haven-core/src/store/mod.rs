//! Event-log collaborators
//!
//! The analytics never touch storage directly. They read through
//! [`EventLog`], which any backend can implement:
//! - [`MemoryStore`]: volatile maps, for tests and throwaway servers
//! - [`crate::db::Database`]: SQLite file with migrations
//!
//! [`EventStore`] adds the write side used by the HTTP layer. The core only
//! ever needs the read side.

pub mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::*;
use chrono::{DateTime, Timelike, Utc};

/// Read access to one user's event logs.
///
/// Lists come back newest first. Callers that care about recency still
/// order events themselves.
pub trait EventLog: Send + Sync {
    /// All mood check-ins for the user
    fn list_mood_events(&self, user: &UserId) -> Result<Vec<MoodEvent>>;

    /// All journal entries for the user
    fn list_journal_events(&self, user: &UserId) -> Result<Vec<JournalEvent>>;

    /// All breathing sessions for the user
    fn list_activity_events(&self, user: &UserId) -> Result<Vec<ActivityEvent>>;

    /// Hobbies the user has adopted
    fn list_adopted_hobbies(&self, user: &UserId) -> Result<Vec<AdoptedHobby>>;
}

/// Full persistence interface used by the boundary layer.
///
/// Record-level operations are scoped to a user: an id that belongs to a
/// different user behaves as missing.
pub trait EventStore: EventLog {
    // Users
    fn get_user(&self, id: &UserId) -> Result<Option<User>>;
    fn create_user(&self, user: NewUser) -> Result<User>;

    // Mood
    fn record_mood(&self, user: &UserId, entry: NewMoodEvent) -> Result<MoodEvent>;

    /// Mood check-ins with `start <= date <= end`, oldest first
    fn list_mood_events_between(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>>;

    // Journal
    fn create_journal_entry(&self, user: &UserId, entry: NewJournalEntry)
        -> Result<JournalEvent>;
    fn get_journal_entry(&self, user: &UserId, id: &str) -> Result<Option<JournalEvent>>;
    fn update_journal_entry(
        &self,
        user: &UserId,
        id: &str,
        update: JournalUpdate,
    ) -> Result<Option<JournalEvent>>;
    fn delete_journal_entry(&self, user: &UserId, id: &str) -> Result<bool>;

    // Breathing
    fn record_breathing_session(
        &self,
        user: &UserId,
        session: NewBreathingSession,
    ) -> Result<ActivityEvent>;

    // Hobbies
    fn create_hobby(&self, user: &UserId, hobby: NewHobby) -> Result<AdoptedHobby>;
    fn update_hobby(
        &self,
        user: &UserId,
        id: &str,
        update: HobbyUpdate,
    ) -> Result<Option<AdoptedHobby>>;
    fn delete_hobby(&self, user: &UserId, id: &str) -> Result<bool>;
}

/// Keep the newest `limit` items of a newest-first list.
pub fn take_recent<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

/// Current time at the precision every backend stores.
fn stamp() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

pub(crate) fn build_mood_event(user: &UserId, entry: NewMoodEvent) -> Result<MoodEvent> {
    entry.validate()?;
    Ok(MoodEvent {
        id: new_id(),
        user_id: user.clone(),
        mood_score: entry.mood,
        notes: entry.notes,
        timestamp: stamp(),
    })
}

pub(crate) fn build_journal_event(user: &UserId, entry: NewJournalEntry) -> Result<JournalEvent> {
    entry.validate()?;
    Ok(JournalEvent {
        id: new_id(),
        user_id: user.clone(),
        content: entry.content,
        emotion_tags: entry.emotions.unwrap_or_default(),
        timestamp: stamp(),
    })
}

pub(crate) fn build_activity_event(user: &UserId, session: NewBreathingSession) -> ActivityEvent {
    ActivityEvent {
        id: new_id(),
        user_id: user.clone(),
        duration_minutes: session.duration,
        completed: session.completed,
        timestamp: stamp(),
    }
}

pub(crate) fn build_hobby(user: &UserId, hobby: NewHobby) -> Result<AdoptedHobby> {
    hobby.validate()?;
    Ok(AdoptedHobby {
        id: new_id(),
        user_id: user.clone(),
        name: hobby.name,
        category: hobby.category,
        frequency: hobby.frequency,
        enjoyment_level: hobby.enjoyment_level,
        last_practiced: hobby.last_practiced,
        is_active: hobby.is_active.unwrap_or(true),
        created_at: stamp(),
    })
}

pub(crate) fn build_user(user: NewUser) -> Result<User> {
    user.validate()?;
    Ok(User {
        id: UserId::new(user.id.unwrap_or_else(new_id)),
        username: user.username,
        name: user.name,
    })
}
