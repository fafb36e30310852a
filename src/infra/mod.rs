pub mod collation;
pub mod json_store;
