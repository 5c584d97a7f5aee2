//! Configuration for host applications

pub mod app_config;

pub use app_config::{LogFormat, LoggingConfig};
