pub mod cache;
pub mod feeds;
pub mod sqlite;
