pub mod extractor;
pub mod freshness;
pub mod run_service;
