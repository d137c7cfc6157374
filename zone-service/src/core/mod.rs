//! Core module - configuration
//!
//! - [`Config`] - environment-driven settings for the pool and logging

pub mod config;

pub use config::Config;
