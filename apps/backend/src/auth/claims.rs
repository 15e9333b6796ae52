//! Identity claims carried by access tokens.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims decoded from a verified access token and stored in request
/// extensions by the authentication gate.
///
/// `email` identifies the caller. Everything else the client asked to have
/// signed rides along in `extra` untouched. Role information is never read
/// from here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// True when the token was issued for exactly `email` (case-sensitive).
    pub fn is_for(&self, email: &str) -> bool {
        self.email.as_deref() == Some(email)
    }
}
