pub mod page_cache;
pub mod page_fetcher;
pub mod url_source;
