//! # Mute Store
//!
//! SQLite-backed persistence for the set of users the bot is ignoring.
//! One table, one owned connection behind an async mutex. Mute and unmute
//! are single conditional statements, so overlapping requests for the same
//! user cannot interleave a check with a write; the connection change
//! counter reports whether a row actually changed.

use anyhow::{Context, Result};
use sqlite::{Connection, State};
use std::sync::Arc;
use tokio::sync::Mutex;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS muted_users (
        user_id INTEGER PRIMARY KEY
    )
";

/// Cloneable handle to the bot's SQLite store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// `:memory:` is accepted for tests.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = sqlite::open(path)
            .with_context(|| format!("failed to open database at '{path}'"))?;
        conn.execute(SCHEMA).context("failed to create muted_users table")?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Membership query. Storage failures are errors, never "not muted".
    pub async fn is_muted(&self, user_id: u64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let mut statement = conn
            .prepare("SELECT 1 FROM muted_users WHERE user_id = ?")
            .context("failed to prepare mute lookup")?;
        statement.bind((1, user_id as i64))?;
        Ok(matches!(statement.next()?, State::Row))
    }

    /// Record `user_id` as muted. Returns true if the user was newly muted,
    /// false if already muted (no write happens in that case).
    pub async fn mute(&self, user_id: u64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let mut statement = conn
            .prepare("INSERT OR IGNORE INTO muted_users (user_id) VALUES (?)")
            .context("failed to prepare mute insert")?;
        statement.bind((1, user_id as i64))?;
        statement.next()?;
        drop(statement);
        Ok(conn.change_count() > 0)
    }

    /// Remove `user_id` from the muted set. Returns true if the user was
    /// muted, false if there was nothing to remove.
    pub async fn unmute(&self, user_id: u64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let mut statement = conn
            .prepare("DELETE FROM muted_users WHERE user_id = ?")
            .context("failed to prepare unmute delete")?;
        statement.bind((1, user_id as i64))?;
        statement.next()?;
        drop(statement);
        Ok(conn.change_count() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn fresh() -> Database {
        Database::new(":memory:").await.expect("in-memory database")
    }

    #[tokio::test]
    async fn test_mute_then_query_then_unmute() {
        let db = fresh().await;

        assert!(!db.is_muted(42).await.unwrap());
        assert!(db.mute(42).await.unwrap());
        assert!(db.is_muted(42).await.unwrap());
        assert!(db.unmute(42).await.unwrap());
        assert!(!db.is_muted(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_mute_is_idempotent() {
        let db = fresh().await;

        assert!(db.mute(7).await.unwrap());
        assert!(!db.mute(7).await.unwrap());
        assert!(db.is_muted(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_unmute_without_mute_is_noop() {
        let db = fresh().await;

        assert!(!db.unmute(7).await.unwrap());
        assert!(!db.is_muted(7).await.unwrap());
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let db = fresh().await;

        assert!(db.mute(1).await.unwrap());
        assert!(!db.is_muted(2).await.unwrap());
        assert!(db.mute(2).await.unwrap());
        assert!(db.unmute(1).await.unwrap());
        assert!(db.is_muted(2).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_mutes_record_one_row() {
        let db = fresh().await;

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move { db.mute(99).await.unwrap() }));
        }
        let mut newly_muted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                newly_muted += 1;
            }
        }
        // Exactly one of the racers observed the insert.
        assert_eq!(newly_muted, 1);
        assert!(db.is_muted(99).await.unwrap());
    }
}
