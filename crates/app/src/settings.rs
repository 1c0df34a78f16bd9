//! Settings for the application, read from `settings.toml`.
//!
//! See `settings.sample.toml` at the workspace root for a commented example.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level applied to every crate of the workspace.
    pub level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "path")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
    /// Bills returned per page by the listing endpoint.
    pub page_size: u64,
}

#[derive(Debug, Deserialize)]
pub struct Refresh {
    /// Minimum seconds between refresh runs.
    pub interval_seconds: u64,
    /// Shell command line run as the refresh job.
    pub command: String,
    /// Marker path for the host-wide refresh lock.
    pub lock_file: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub refresh: Option<Refresh>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings"))
            .build()?;

        settings.try_deserialize()
    }
}
