/// URL → document text store consulted before every page fetch.
pub trait PageCache: Send + Sync {
    fn lookup(&self, url: &str) -> Result<Option<String>, String>;
    fn put(&self, url: &str, body: &str) -> Result<(), String>;
}
