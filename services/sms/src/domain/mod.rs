pub mod extractor;
pub mod keys;
pub mod repository;
pub mod types;
