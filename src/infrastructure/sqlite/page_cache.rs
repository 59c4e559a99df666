use crate::domain::ports::page_cache::PageCache;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

/// Page cache persisted in SQLite so documents survive process restarts.
pub struct SqlitePageCache {
    conn: Mutex<Connection>,
    max_age: Option<Duration>,
}

impl SqlitePageCache {
    pub fn new(conn: Connection) -> Result<Self, String> {
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            max_age: None,
        })
    }

    pub fn open(path: &str) -> Result<Self, String> {
        let conn = Connection::open(path).map_err(|e| format!("DB error: {e}"))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| format!("WAL error: {e}"))?;
        Self::new(conn)
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    fn is_expired(&self, fetched_at: &str) -> bool {
        let Some(max_age) = self.max_age else {
            return false;
        };
        match DateTime::parse_from_rfc3339(fetched_at) {
            Ok(at) => Utc::now() - at.with_timezone(&Utc) >= max_age,
            Err(_) => true,
        }
    }

    /// Deletes entries older than the configured maximum age.
    fn purge_expired(&self, conn: &Connection) -> Result<usize, String> {
        let Some(max_age) = self.max_age else {
            return Ok(0);
        };
        let cutoff = timestamp(Utc::now() - max_age);
        conn.execute("DELETE FROM pages WHERE fetched_at <= ?1", params![cutoff])
            .map_err(|e| format!("Failed to purge pages: {e}"))
    }
}

impl PageCache for SqlitePageCache {
    fn lookup(&self, url: &str) -> Result<Option<String>, String> {
        let conn = self.conn.lock().map_err(|e| e.to_string())?;
        let row: Option<(String, String)> = conn
            .query_row(
                "SELECT body, fetched_at FROM pages WHERE url = ?1",
                params![url],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()
            .map_err(|e| format!("Failed to read page: {e}"))?;

        Ok(row.and_then(|(body, fetched_at)| (!self.is_expired(&fetched_at)).then_some(body)))
    }

    fn put(&self, url: &str, body: &str) -> Result<(), String> {
        let conn = self.conn.lock().map_err(|e| e.to_string())?;
        conn.execute(
            "INSERT OR REPLACE INTO pages (url, body, fetched_at) VALUES (?1, ?2, ?3)",
            params![url, body, timestamp(Utc::now())],
        )
        .map_err(|e| format!("Failed to store page: {e}"))?;

        // expired rows are dropped on every write
        let purged = self.purge_expired(&conn)?;
        if purged > 0 {
            tracing::debug!(purged, "expired pages removed");
        }
        Ok(())
    }
}

/// Fixed-width so stored timestamps order correctly as text.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
