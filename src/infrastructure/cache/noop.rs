use crate::domain::ports::page_cache::PageCache;

/// Cache that never stores anything; every lookup is a miss.
pub struct NoopPageCache;

impl PageCache for NoopPageCache {
    fn lookup(&self, _url: &str) -> Result<Option<String>, String> {
        Ok(None)
    }

    fn put(&self, _url: &str, _body: &str) -> Result<(), String> {
        Ok(())
    }
}
