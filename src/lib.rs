pub mod config;
pub mod ingest;
pub mod models;
pub mod search;
pub mod service;
pub mod store;
