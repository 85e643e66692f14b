pub mod backup;
pub mod bridge;
pub mod config;
pub mod devices;
pub mod discovery;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod models;
pub mod msgstore;
pub mod pipeline;
pub mod report;
