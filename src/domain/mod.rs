pub mod collation;
pub mod error;
pub mod model;
pub mod repository;
