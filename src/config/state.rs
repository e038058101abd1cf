// Application state module
// Shared, read-only state handed to every connection

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    access_log: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            access_log: config.logging.access_log,
        }
    }

    /// Whether an access log line is written per request
    pub const fn access_log_enabled(&self) -> bool {
        self.access_log
    }
}
