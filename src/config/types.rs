// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

use crate::qr::{ErrorCorrection, ImageType};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub qr: QrConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for in-flight connections after a shutdown signal
    pub shutdown_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
}

/// QR endpoint configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QrConfig {
    /// Path serving generated images ("/" reproduces the root-only layout)
    pub api_path: String,
    /// Plain-text body returned for `GET /`
    pub description: String,
    /// Image type used when the `type` parameter is absent
    pub default_type: ImageType,
    /// Pixels per module when no usable `width` is given
    pub scale: u32,
    pub quiet_zone: bool,
    pub error_correction: ErrorCorrection,
    /// Upper bound for the `width` parameter, in pixels
    pub max_width: u32,
}
