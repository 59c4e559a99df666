pub mod historical;
pub mod latest;
pub mod pagination;
pub mod path_extractor;
pub mod price_codec;
pub mod quote_assembler;
pub mod timestamp;
