pub mod date_format;
pub mod feed_config;
pub mod price;
pub mod raw_field;
pub mod variable_url;
