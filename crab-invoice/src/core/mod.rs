//! Core module - runtime configuration
//!
//! - [`Config`] - store/output paths and logging settings

pub mod config;

pub use config::Config;
