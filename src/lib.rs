//! HTTP service that renders URLs as QR codes (PNG or SVG).
//!
//! `GET /api?url=...&type=png|svg&width=...&qrcolor=...&bgcolor=...` returns the image;
//! errors come back as `{"status": ..., "message": ...}` JSON.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod qr;
pub mod server;
