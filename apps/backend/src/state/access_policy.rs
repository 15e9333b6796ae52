use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Which gates guard the user-administration and cart-deletion routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Admin-flag changes and user deletion require an admin; cart deletion
    /// requires the item's owner or an admin.
    #[default]
    Uniform,
    /// Those three routes accept anonymous callers.
    LegacyOpen,
}

impl AccessPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            AccessPolicy::Uniform => "uniform",
            AccessPolicy::LegacyOpen => "legacy-open",
        }
    }

    pub fn is_open(self) -> bool {
        self == AccessPolicy::LegacyOpen
    }
}

impl FromStr for AccessPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(AccessPolicy::Uniform),
            "legacy-open" | "legacy_open" => Ok(AccessPolicy::LegacyOpen),
            other => Err(AppError::config(format!(
                "ACCESS_POLICY must be 'uniform' or 'legacy-open', got '{other}'"
            ))),
        }
    }
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
