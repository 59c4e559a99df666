/// An ordered, possibly unbounded, sequence of page URLs for one request.
pub trait UrlSource: Send + Sync {
    fn urls(&self) -> Box<dyn Iterator<Item = String> + Send + '_>;

    /// Consecutive pages without new dates tolerated before iteration stops.
    fn max_failed_attempts(&self) -> u64;
}
