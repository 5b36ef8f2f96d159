pub mod config;
pub mod entity;
pub mod observation;
pub mod scoring;
