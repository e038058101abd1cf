//! Request handler module
//!
//! Responsible for request routing dispatch and the QR endpoint itself.

pub mod encode;
pub mod params;
pub mod router;

// Re-export main entry point
pub use router::{handle_request, route};
