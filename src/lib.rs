pub mod config;
pub mod db;
pub mod error;

// Core engine
pub mod matcher;
pub mod store;

// HTTP surface
pub mod api;

pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
