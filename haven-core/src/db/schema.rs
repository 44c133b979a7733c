//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 3;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Accounts and event logs
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id               TEXT PRIMARY KEY,
        username         TEXT NOT NULL UNIQUE,
        name             TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS mood_entries (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        mood             INTEGER NOT NULL CHECK (mood BETWEEN 1 AND 5),
        notes            TEXT,
        date             DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS journal_entries (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        content          TEXT NOT NULL,
        emotions         JSON NOT NULL DEFAULT '[]',
        date             DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS breathing_sessions (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        duration         INTEGER NOT NULL,
        completed        INTEGER NOT NULL DEFAULT 0,
        date             DATETIME NOT NULL
    );

    CREATE TABLE IF NOT EXISTS hobbies (
        id               TEXT PRIMARY KEY,
        user_id          TEXT NOT NULL,
        name             TEXT NOT NULL,
        category         TEXT NOT NULL,
        frequency        TEXT NOT NULL,
        enjoyment_level  INTEGER NOT NULL,
        last_practiced   DATETIME,
        is_active        INTEGER NOT NULL DEFAULT 1,
        date             DATETIME NOT NULL
    );
    "#,
    // Version 2: Per-user timeline indexes
    r#"
    CREATE INDEX IF NOT EXISTS idx_mood_user_date ON mood_entries(user_id, date);
    CREATE INDEX IF NOT EXISTS idx_journal_user_date ON journal_entries(user_id, date);
    CREATE INDEX IF NOT EXISTS idx_breathing_user_date ON breathing_sessions(user_id, date);
    CREATE INDEX IF NOT EXISTS idx_hobbies_user ON hobbies(user_id);
    "#,
    // Version 3: Usernames are display handles, only ids are unique
    r#"
    CREATE TABLE users_new (
        id               TEXT PRIMARY KEY,
        username         TEXT NOT NULL,
        name             TEXT NOT NULL
    );
    INSERT INTO users_new (id, username, name) SELECT id, username, name FROM users;
    DROP TABLE users;
    ALTER TABLE users_new RENAME TO users;
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version = get_schema_version(conn)?;

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute_batch(&format!("PRAGMA user_version = {}", version))?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
