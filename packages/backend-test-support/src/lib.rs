//! Backend test support utilities
//!
//! Shared by the backend's integration test binaries: one-time logging
//! initialization and assertions on the uniform error body.

pub mod error_body;
pub mod test_logging;
