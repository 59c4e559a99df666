pub mod feed_data;
pub mod quote_point;
pub mod result_set;
pub mod security;
