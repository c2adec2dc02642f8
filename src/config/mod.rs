/// Database configuration and connection management
pub mod database;

/// Expiry sweep configuration loading from config.toml
pub mod sweep;
