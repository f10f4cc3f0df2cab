//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default database file, created in the working directory
pub const DEFAULT_DATABASE_PATH: &str = "student-info.db";

/// Server configuration parameters.
///
/// All values can be configured via environment variables; the defaults
/// match the service's fixed behavior.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Path of the database file
    pub database_path: PathBuf,
    /// How long to wait for a competing lock on the database file, in milliseconds
    pub lock_timeout_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `DATABASE_PATH` - Database file path (default: student-info.db)
    /// - `DB_LOCK_TIMEOUT_MS` - Lock wait in milliseconds (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            database_path: env::var("DATABASE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            lock_timeout_ms: env::var("DB_LOCK_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.lock_timeout_ms),
        }
    }

    /// Lock wait as a Duration.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            lock_timeout_ms: 1000,
        }
    }
}
