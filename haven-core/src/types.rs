//! Core domain types for haven
//!
//! These types represent the event logs a user produces while using the app,
//! plus the account records the boundary layer checks before calling into the
//! analytics.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Mood event** | A check-in with a 1-5 mood score |
//! | **Journal event** | A free-text entry tagged with emotions |
//! | **Activity event** | A guided breathing session |
//! | **Adopted hobby** | An activity the user already added to their toolkit |
//!
//! Field names on the wire are camelCase and keep the names the web client
//! already uses (`mood`, `emotions`, `duration`, `date`).

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest valid mood score.
pub const MOOD_MIN: u8 = 1;
/// Highest valid mood score.
pub const MOOD_MAX: u8 = 5;

/// Generate a fresh record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================
// Users
// ============================================

/// Opaque user identifier threaded through every core call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A known account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub name: String,
}

impl User {
    /// The account seeded for single-user demo deployments.
    pub fn demo() -> Self {
        Self {
            id: UserId::from("default-user"),
            username: "demo".to_string(),
            name: "Alex".to_string(),
        }
    }
}

/// Request body for creating an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    /// Explicit id; generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub username: String,
    pub name: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::InvalidInput("username must not be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("name must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================
// Event logs
// ============================================

/// Anything placed on the user's timeline.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;

    /// Breaks ties between events logged at the same instant.
    fn event_id(&self) -> &str;
}

/// A mood check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEvent {
    pub id: String,
    pub user_id: UserId,
    /// 1 (very low) to 5 (very good)
    #[serde(rename = "mood")]
    pub mood_score: u8,
    pub notes: Option<String>,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Timestamped for MoodEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn event_id(&self) -> &str {
        &self.id
    }
}

/// Request body for a mood check-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMoodEvent {
    pub mood: u8,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewMoodEvent {
    pub fn validate(&self) -> Result<()> {
        if !(MOOD_MIN..=MOOD_MAX).contains(&self.mood) {
            return Err(Error::InvalidInput(format!(
                "mood must be between {} and {}, got {}",
                MOOD_MIN, MOOD_MAX, self.mood
            )));
        }
        Ok(())
    }
}

/// A journal entry with its emotion tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEvent {
    pub id: String,
    pub user_id: UserId,
    pub content: String,
    /// Tags from the client's emotion picker; free-form tags are kept as-is
    #[serde(rename = "emotions")]
    pub emotion_tags: Vec<String>,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Timestamped for JournalEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn event_id(&self) -> &str {
        &self.id
    }
}

/// Request body for a new journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub content: String,
    #[serde(default)]
    pub emotions: Option<Vec<String>>,
}

impl NewJournalEntry {
    pub fn validate(&self) -> Result<()> {
        validate_journal_content(&self.content)
    }
}

/// Partial update to a journal entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JournalUpdate {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub emotions: Option<Vec<String>>,
}

impl JournalUpdate {
    pub fn validate(&self) -> Result<()> {
        match self.content {
            Some(ref content) => validate_journal_content(content),
            None => Ok(()),
        }
    }

    /// Apply this update to an existing entry.
    pub fn apply(self, entry: &mut JournalEvent) {
        if let Some(content) = self.content {
            entry.content = content;
        }
        if let Some(emotions) = self.emotions {
            entry.emotion_tags = emotions;
        }
    }
}

fn validate_journal_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(Error::InvalidInput(
            "journal content must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// A guided breathing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: String,
    pub user_id: UserId,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    pub completed: bool,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl Timestamped for ActivityEvent {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn event_id(&self) -> &str {
        &self.id
    }
}

/// Request body for logging a breathing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBreathingSession {
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
}

// ============================================
// Hobbies
// ============================================

/// An activity the user has added to their personal toolkit.
///
/// Only the name matters to recommendations: it suppresses catalog entries
/// with the same (case-insensitive) name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptedHobby {
    pub id: String,
    pub user_id: UserId,
    pub name: String,
    pub category: String,
    /// e.g. "daily", "weekly", "monthly", "occasional"
    pub frequency: String,
    /// 1-5
    pub enjoyment_level: u8,
    pub last_practiced: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

/// Request body for adopting a hobby.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHobby {
    pub name: String,
    pub category: String,
    pub frequency: String,
    pub enjoyment_level: u8,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewHobby {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("hobby name must not be empty".to_string()));
        }
        validate_enjoyment(self.enjoyment_level)
    }
}

/// Partial update to an adopted hobby.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HobbyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub enjoyment_level: Option<u8>,
    #[serde(default)]
    pub last_practiced: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl HobbyUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput("hobby name must not be empty".to_string()));
            }
        }
        match self.enjoyment_level {
            Some(level) => validate_enjoyment(level),
            None => Ok(()),
        }
    }

    /// Apply this update to an existing hobby.
    pub fn apply(self, hobby: &mut AdoptedHobby) {
        if let Some(name) = self.name {
            hobby.name = name;
        }
        if let Some(category) = self.category {
            hobby.category = category;
        }
        if let Some(frequency) = self.frequency {
            hobby.frequency = frequency;
        }
        if let Some(level) = self.enjoyment_level {
            hobby.enjoyment_level = level;
        }
        if self.last_practiced.is_some() {
            hobby.last_practiced = self.last_practiced;
        }
        if let Some(active) = self.is_active {
            hobby.is_active = active;
        }
    }
}

fn validate_enjoyment(level: u8) -> Result<()> {
    if !(1..=5).contains(&level) {
        return Err(Error::InvalidInput(format!(
            "enjoymentLevel must be between 1 and 5, got {}",
            level
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_validation() {
        assert!(NewMoodEvent { mood: 1, notes: None }.validate().is_ok());
        assert!(NewMoodEvent { mood: 5, notes: None }.validate().is_ok());
        assert!(NewMoodEvent { mood: 0, notes: None }.validate().is_err());
        assert!(NewMoodEvent { mood: 6, notes: None }.validate().is_err());
    }

    #[test]
    fn test_journal_validation() {
        let entry = NewJournalEntry {
            content: "   ".to_string(),
            emotions: None,
        };
        assert!(entry.validate().is_err());

        let update = JournalUpdate {
            content: None,
            emotions: Some(vec!["calm".to_string()]),
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_journal_update_applies_partially() {
        let mut entry = JournalEvent {
            id: "j1".to_string(),
            user_id: UserId::from("u1"),
            content: "before".to_string(),
            emotion_tags: vec!["sad".to_string()],
            timestamp: Utc::now(),
        };
        JournalUpdate {
            content: None,
            emotions: Some(vec!["hopeful".to_string()]),
        }
        .apply(&mut entry);

        assert_eq!(entry.content, "before");
        assert_eq!(entry.emotion_tags, vec!["hopeful".to_string()]);
    }

    #[test]
    fn test_hobby_validation() {
        let hobby = NewHobby {
            name: "Music Therapy".to_string(),
            category: "Sound Healing".to_string(),
            frequency: "weekly".to_string(),
            enjoyment_level: 7,
            last_practiced: None,
            is_active: None,
        };
        assert!(hobby.validate().is_err());
        assert!(HobbyUpdate {
            name: Some(String::new()),
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let event = MoodEvent {
            id: "m1".to_string(),
            user_id: UserId::from("u1"),
            mood_score: 4,
            notes: None,
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["mood"], 4);
        assert_eq!(json["userId"], "u1");
        assert!(json.get("date").is_some());
    }
}
