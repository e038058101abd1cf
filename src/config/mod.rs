// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, QrConfig, ServerConfig};

/// Default config file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Body returned by `GET /` unless overridden in `qr.description`
pub const DEFAULT_DESCRIPTION: &str = "QR code generator. \
Usage: GET /api?url=<text>&type=png|svg&width=<px>&qrcolor=<hex>&bgcolor=<hex>";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Environment variables override the file, e.g. `QRSERVE_SERVER__PORT=9000`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("QRSERVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "qrserve/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("qr.api_path", "/api")?
            .set_default("qr.description", DEFAULT_DESCRIPTION)?
            .set_default("qr.default_type", "png")?
            .set_default("qr.scale", 4)?
            .set_default("qr.quiet_zone", true)?
            .set_default("qr.error_correction", "medium")?
            .set_default("qr.max_width", 4096)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
