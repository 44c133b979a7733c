//! Volatile in-process event store.

use super::{
    build_activity_event, build_hobby, build_journal_event, build_mood_event, build_user,
    EventLog, EventStore,
};
use crate::error::{Error, Result};
use crate::types::*;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    moods: Vec<MoodEvent>,
    journals: Vec<JournalEvent>,
    breathing: Vec<ActivityEvent>,
    hobbies: Vec<AdoptedHobby>,
}

/// Event store backed by in-memory vectors.
///
/// Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::CollaboratorUnavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::CollaboratorUnavailable("memory store lock poisoned".to_string()))
    }

    // Backfill helpers: insert events with caller-chosen ids and timestamps.

    pub fn insert_mood_event(&self, event: MoodEvent) -> Result<()> {
        self.write()?.moods.push(event);
        Ok(())
    }

    pub fn insert_journal_event(&self, event: JournalEvent) -> Result<()> {
        self.write()?.journals.push(event);
        Ok(())
    }

    pub fn insert_activity_event(&self, event: ActivityEvent) -> Result<()> {
        self.write()?.breathing.push(event);
        Ok(())
    }

    pub fn insert_hobby(&self, hobby: AdoptedHobby) -> Result<()> {
        self.write()?.hobbies.push(hobby);
        Ok(())
    }
}

fn newest_first<T, F>(items: &[T], user: &UserId, owner: F) -> Vec<T>
where
    T: Clone + Timestamped,
    F: Fn(&T) -> &UserId,
{
    let mut out: Vec<T> = items.iter().filter(|e| owner(e) == user).cloned().collect();
    out.sort_by(|a, b| {
        b.timestamp()
            .cmp(&a.timestamp())
            .then_with(|| a.event_id().cmp(b.event_id()))
    });
    out
}

impl EventLog for MemoryStore {
    fn list_mood_events(&self, user: &UserId) -> Result<Vec<MoodEvent>> {
        Ok(newest_first(&self.read()?.moods, user, |e| &e.user_id))
    }

    fn list_journal_events(&self, user: &UserId) -> Result<Vec<JournalEvent>> {
        Ok(newest_first(&self.read()?.journals, user, |e| &e.user_id))
    }

    fn list_activity_events(&self, user: &UserId) -> Result<Vec<ActivityEvent>> {
        Ok(newest_first(&self.read()?.breathing, user, |e| &e.user_id))
    }

    fn list_adopted_hobbies(&self, user: &UserId) -> Result<Vec<AdoptedHobby>> {
        let tables = self.read()?;
        let mut hobbies: Vec<AdoptedHobby> = tables
            .hobbies
            .iter()
            .filter(|h| &h.user_id == user)
            .cloned()
            .collect();
        hobbies.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(hobbies)
    }
}

impl EventStore for MemoryStore {
    fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    fn create_user(&self, user: NewUser) -> Result<User> {
        let user = build_user(user)?;
        let mut tables = self.write()?;
        if tables.users.contains_key(&user.id) {
            return Err(Error::InvalidInput(format!("user {} already exists", user.id)));
        }
        tables.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn record_mood(&self, user: &UserId, entry: NewMoodEvent) -> Result<MoodEvent> {
        let event = build_mood_event(user, entry)?;
        self.insert_mood_event(event.clone())?;
        Ok(event)
    }

    fn list_mood_events_between(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>> {
        let mut events: Vec<MoodEvent> = self
            .list_mood_events(user)?
            .into_iter()
            .filter(|e| e.timestamp >= start && e.timestamp <= end)
            .collect();
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(events)
    }

    fn create_journal_entry(
        &self,
        user: &UserId,
        entry: NewJournalEntry,
    ) -> Result<JournalEvent> {
        let event = build_journal_event(user, entry)?;
        self.insert_journal_event(event.clone())?;
        Ok(event)
    }

    fn get_journal_entry(&self, user: &UserId, id: &str) -> Result<Option<JournalEvent>> {
        Ok(self
            .read()?
            .journals
            .iter()
            .find(|e| e.id == id && &e.user_id == user)
            .cloned())
    }

    fn update_journal_entry(
        &self,
        user: &UserId,
        id: &str,
        update: JournalUpdate,
    ) -> Result<Option<JournalEvent>> {
        update.validate()?;
        let mut tables = self.write()?;
        match tables
            .journals
            .iter_mut()
            .find(|e| e.id == id && &e.user_id == user)
        {
            Some(entry) => {
                update.apply(entry);
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_journal_entry(&self, user: &UserId, id: &str) -> Result<bool> {
        let mut tables = self.write()?;
        let before = tables.journals.len();
        tables
            .journals
            .retain(|e| !(e.id == id && &e.user_id == user));
        Ok(tables.journals.len() != before)
    }

    fn record_breathing_session(
        &self,
        user: &UserId,
        session: NewBreathingSession,
    ) -> Result<ActivityEvent> {
        let event = build_activity_event(user, session);
        self.insert_activity_event(event.clone())?;
        Ok(event)
    }

    fn create_hobby(&self, user: &UserId, hobby: NewHobby) -> Result<AdoptedHobby> {
        let hobby = build_hobby(user, hobby)?;
        self.insert_hobby(hobby.clone())?;
        Ok(hobby)
    }

    fn update_hobby(
        &self,
        user: &UserId,
        id: &str,
        update: HobbyUpdate,
    ) -> Result<Option<AdoptedHobby>> {
        update.validate()?;
        let mut tables = self.write()?;
        match tables
            .hobbies
            .iter_mut()
            .find(|h| h.id == id && &h.user_id == user)
        {
            Some(hobby) => {
                update.apply(hobby);
                Ok(Some(hobby.clone()))
            }
            None => Ok(None),
        }
    }

    fn delete_hobby(&self, user: &UserId, id: &str) -> Result<bool> {
        let mut tables = self.write()?;
        let before = tables.hobbies.len();
        tables
            .hobbies
            .retain(|h| !(h.id == id && &h.user_id == user));
        Ok(tables.hobbies.len() != before)
    }
}
