pub mod advisory;
pub mod config;
pub mod context;
pub mod error;
pub mod reference;
pub mod report;
pub mod scoring;
pub mod types;
