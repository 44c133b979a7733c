//! Database repository layer
//!
//! Provides query and insert operations for all entity types.

use crate::error::{Error, Result};
use crate::store::{
    build_activity_event, build_hobby, build_journal_event, build_mood_event, build_user,
    EventLog, EventStore,
};
use crate::types::*;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Fixed-width RFC 3339 so that string order matches time order.
fn ts_to_sql(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn ts_from_sql(value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

fn tags_from_sql(value: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Database handle with connection pooling (single connection for now)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL so report runs don't block the server
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        super::schema::run_migrations(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::CollaboratorUnavailable("database lock poisoned".to_string()))
    }

    // ============================================
    // User operations
    // ============================================

    /// Insert a user unless one with the same id exists. Returns whether a row was written.
    pub fn insert_user_if_missing(&self, user: &User) -> Result<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "INSERT INTO users (id, username, name) VALUES (?1, ?2, ?3) ON CONFLICT(id) DO NOTHING",
            params![user.id.as_str(), user.username, user.name],
        )?;
        Ok(changed > 0)
    }

    fn row_to_user(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: UserId::new(row.get::<_, String>("id")?),
            username: row.get("username")?,
            name: row.get("name")?,
        })
    }

    // ============================================
    // Mood operations
    // ============================================

    /// Insert a mood event as-is (id and timestamp included)
    pub fn insert_mood_event(&self, event: &MoodEvent) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO mood_entries (id, user_id, mood, notes, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.user_id.as_str(),
                event.mood_score,
                event.notes,
                ts_to_sql(&event.timestamp),
            ],
        )?;
        Ok(())
    }

    fn row_to_mood(row: &Row) -> rusqlite::Result<MoodEvent> {
        let date: String = row.get("date")?;
        Ok(MoodEvent {
            id: row.get("id")?,
            user_id: UserId::new(row.get::<_, String>("user_id")?),
            mood_score: row.get("mood")?,
            notes: row.get("notes")?,
            timestamp: ts_from_sql(&date)?,
        })
    }

    // ============================================
    // Journal operations
    // ============================================

    /// Insert a journal event as-is
    pub fn insert_journal_event(&self, event: &JournalEvent) -> Result<()> {
        let emotions = serde_json::to_string(&event.emotion_tags)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO journal_entries (id, user_id, content, emotions, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.user_id.as_str(),
                event.content,
                emotions,
                ts_to_sql(&event.timestamp),
            ],
        )?;
        Ok(())
    }

    fn row_to_journal(row: &Row) -> rusqlite::Result<JournalEvent> {
        let date: String = row.get("date")?;
        let emotions: String = row.get("emotions")?;
        Ok(JournalEvent {
            id: row.get("id")?,
            user_id: UserId::new(row.get::<_, String>("user_id")?),
            content: row.get("content")?,
            emotion_tags: tags_from_sql(&emotions)?,
            timestamp: ts_from_sql(&date)?,
        })
    }

    // ============================================
    // Breathing operations
    // ============================================

    /// Insert a breathing session as-is
    pub fn insert_activity_event(&self, event: &ActivityEvent) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO breathing_sessions (id, user_id, duration, completed, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                event.id,
                event.user_id.as_str(),
                event.duration_minutes,
                event.completed,
                ts_to_sql(&event.timestamp),
            ],
        )?;
        Ok(())
    }

    fn row_to_activity(row: &Row) -> rusqlite::Result<ActivityEvent> {
        let date: String = row.get("date")?;
        Ok(ActivityEvent {
            id: row.get("id")?,
            user_id: UserId::new(row.get::<_, String>("user_id")?),
            duration_minutes: row.get("duration")?,
            completed: row.get("completed")?,
            timestamp: ts_from_sql(&date)?,
        })
    }

    // ============================================
    // Hobby operations
    // ============================================

    /// Insert a hobby as-is
    pub fn insert_hobby(&self, hobby: &AdoptedHobby) -> Result<()> {
        let conn = self.conn()?;
        Self::write_hobby(&conn, hobby)
    }

    fn write_hobby(conn: &Connection, hobby: &AdoptedHobby) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO hobbies (id, user_id, name, category, frequency, enjoyment_level,
                                 last_practiced, is_active, date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category,
                frequency = excluded.frequency,
                enjoyment_level = excluded.enjoyment_level,
                last_practiced = excluded.last_practiced,
                is_active = excluded.is_active
            "#,
            params![
                hobby.id,
                hobby.user_id.as_str(),
                hobby.name,
                hobby.category,
                hobby.frequency,
                hobby.enjoyment_level,
                hobby.last_practiced.as_ref().map(ts_to_sql),
                hobby.is_active,
                ts_to_sql(&hobby.created_at),
            ],
        )?;
        Ok(())
    }

    fn row_to_hobby(row: &Row) -> rusqlite::Result<AdoptedHobby> {
        let date: String = row.get("date")?;
        let last_practiced: Option<String> = row.get("last_practiced")?;
        Ok(AdoptedHobby {
            id: row.get("id")?,
            user_id: UserId::new(row.get::<_, String>("user_id")?),
            name: row.get("name")?,
            category: row.get("category")?,
            frequency: row.get("frequency")?,
            enjoyment_level: row.get("enjoyment_level")?,
            last_practiced: last_practiced.as_deref().map(ts_from_sql).transpose()?,
            is_active: row.get("is_active")?,
            created_at: ts_from_sql(&date)?,
        })
    }

    fn find_hobby(conn: &Connection, user: &UserId, id: &str) -> Result<Option<AdoptedHobby>> {
        conn.query_row(
            "SELECT * FROM hobbies WHERE id = ?1 AND user_id = ?2",
            params![id, user.as_str()],
            Self::row_to_hobby,
        )
        .optional()
        .map_err(Error::from)
    }

    fn find_journal(conn: &Connection, user: &UserId, id: &str) -> Result<Option<JournalEvent>> {
        conn.query_row(
            "SELECT * FROM journal_entries WHERE id = ?1 AND user_id = ?2",
            params![id, user.as_str()],
            Self::row_to_journal,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Run a per-user listing query
    fn list_for_user<T>(
        &self,
        sql: &str,
        user: &UserId,
        map: fn(&Row) -> rusqlite::Result<T>,
    ) -> Result<Vec<T>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([user.as_str()], map)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }
}

impl EventLog for Database {
    fn list_mood_events(&self, user: &UserId) -> Result<Vec<MoodEvent>> {
        self.list_for_user(
            "SELECT * FROM mood_entries WHERE user_id = ? ORDER BY date DESC, id ASC",
            user,
            Self::row_to_mood,
        )
    }

    fn list_journal_events(&self, user: &UserId) -> Result<Vec<JournalEvent>> {
        self.list_for_user(
            "SELECT * FROM journal_entries WHERE user_id = ? ORDER BY date DESC, id ASC",
            user,
            Self::row_to_journal,
        )
    }

    fn list_activity_events(&self, user: &UserId) -> Result<Vec<ActivityEvent>> {
        self.list_for_user(
            "SELECT * FROM breathing_sessions WHERE user_id = ? ORDER BY date DESC, id ASC",
            user,
            Self::row_to_activity,
        )
    }

    fn list_adopted_hobbies(&self, user: &UserId) -> Result<Vec<AdoptedHobby>> {
        self.list_for_user(
            "SELECT * FROM hobbies WHERE user_id = ? ORDER BY date DESC, id ASC",
            user,
            Self::row_to_hobby,
        )
    }
}

impl EventStore for Database {
    fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT * FROM users WHERE id = ?",
            [id.as_str()],
            Self::row_to_user,
        )
        .optional()
        .map_err(Error::from)
    }

    fn create_user(&self, user: NewUser) -> Result<User> {
        let user = build_user(user)?;
        if !self.insert_user_if_missing(&user)? {
            return Err(Error::InvalidInput(format!("user {} already exists", user.id)));
        }
        Ok(user)
    }

    fn record_mood(&self, user: &UserId, entry: NewMoodEvent) -> Result<MoodEvent> {
        let event = build_mood_event(user, entry)?;
        self.insert_mood_event(&event)?;
        Ok(event)
    }

    fn list_mood_events_between(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MoodEvent>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date ASC, id ASC
            "#,
        )?;
        let rows = stmt
            .query_map(
                params![user.as_str(), ts_to_sql(&start), ts_to_sql(&end)],
                Self::row_to_mood,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn create_journal_entry(
        &self,
        user: &UserId,
        entry: NewJournalEntry,
    ) -> Result<JournalEvent> {
        let event = build_journal_event(user, entry)?;
        self.insert_journal_event(&event)?;
        Ok(event)
    }

    fn get_journal_entry(&self, user: &UserId, id: &str) -> Result<Option<JournalEvent>> {
        let conn = self.conn()?;
        Self::find_journal(&conn, user, id)
    }

    fn update_journal_entry(
        &self,
        user: &UserId,
        id: &str,
        update: JournalUpdate,
    ) -> Result<Option<JournalEvent>> {
        update.validate()?;
        let conn = self.conn()?;
        let Some(mut entry) = Self::find_journal(&conn, user, id)? else {
            return Ok(None);
        };
        update.apply(&mut entry);
        conn.execute(
            "UPDATE journal_entries SET content = ?1, emotions = ?2 WHERE id = ?3",
            params![
                entry.content,
                serde_json::to_string(&entry.emotion_tags)?,
                entry.id
            ],
        )?;
        Ok(Some(entry))
    }

    fn delete_journal_entry(&self, user: &UserId, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM journal_entries WHERE id = ?1 AND user_id = ?2",
            params![id, user.as_str()],
        )?;
        Ok(deleted > 0)
    }

    fn record_breathing_session(
        &self,
        user: &UserId,
        session: NewBreathingSession,
    ) -> Result<ActivityEvent> {
        let event = build_activity_event(user, session);
        self.insert_activity_event(&event)?;
        Ok(event)
    }

    fn create_hobby(&self, user: &UserId, hobby: NewHobby) -> Result<AdoptedHobby> {
        let hobby = build_hobby(user, hobby)?;
        self.insert_hobby(&hobby)?;
        Ok(hobby)
    }

    fn update_hobby(
        &self,
        user: &UserId,
        id: &str,
        update: HobbyUpdate,
    ) -> Result<Option<AdoptedHobby>> {
        update.validate()?;
        let conn = self.conn()?;
        let Some(mut hobby) = Self::find_hobby(&conn, user, id)? else {
            return Ok(None);
        };
        update.apply(&mut hobby);
        Self::write_hobby(&conn, &hobby)?;
        Ok(Some(hobby))
    }

    fn delete_hobby(&self, user: &UserId, id: &str) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM hobbies WHERE id = ?1 AND user_id = ?2",
            params![id, user.as_str()],
        )?;
        Ok(deleted > 0)
    }
}
