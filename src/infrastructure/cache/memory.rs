use crate::domain::ports::page_cache::PageCache;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local page cache. Entries older than `max_age` are treated as misses.
#[derive(Default)]
pub struct InMemoryPageCache {
    pages: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
    max_age: Option<Duration>,
}

impl InMemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub fn len(&self) -> usize {
        self.pages.lock().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PageCache for InMemoryPageCache {
    fn lookup(&self, url: &str) -> Result<Option<String>, String> {
        let mut pages = self.pages.lock().map_err(|e| e.to_string())?;
        let expired = match (pages.get(url), self.max_age) {
            (None, _) => return Ok(None),
            (Some((_, stored_at)), Some(max_age)) => Utc::now() - *stored_at >= max_age,
            (Some(_), None) => false,
        };
        if expired {
            pages.remove(url);
            return Ok(None);
        }
        Ok(pages.get(url).map(|(body, _)| body.clone()))
    }

    fn put(&self, url: &str, body: &str) -> Result<(), String> {
        let mut pages = self.pages.lock().map_err(|e| e.to_string())?;
        pages.insert(url.to_string(), (body.to_string(), Utc::now()));
        Ok(())
    }
}
