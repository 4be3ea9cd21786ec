use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

/// Key holding the bearer token sent with backend calls
pub const AUTH_TOKEN_KEY: &str = "auth_token";

#[derive(Debug)]
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("open db {}", path.display()))?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory().context("open in-memory db")?,
        };
        store.init()?;
        Ok(store)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO session(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM session WHERE key = ?1", params![key])?;
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .get(AUTH_TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty()))
    }

    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_and_remove_clears() {
        let store = SessionStore::open_in_memory().unwrap();
        assert_eq!(store.token().unwrap(), None);

        store.set(AUTH_TOKEN_KEY, "first").unwrap();
        store.set(AUTH_TOKEN_KEY, "second").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("second"));

        store.remove(AUTH_TOKEN_KEY).unwrap();
        assert_eq!(store.get(AUTH_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.sqlite3");
        SessionStore::open(&path)
            .unwrap()
            .set(AUTH_TOKEN_KEY, "abc")
            .unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.token().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn blank_token_counts_as_absent() {
        let store = SessionStore::open_in_memory().unwrap();
        store.set(AUTH_TOKEN_KEY, "   ").unwrap();
        assert_eq!(store.token().unwrap(), None);
    }
}
