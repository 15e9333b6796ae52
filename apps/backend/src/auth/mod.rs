pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{issue_token, verify_token, TOKEN_TTL_SECS};
