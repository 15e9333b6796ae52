pub mod access_policy;
pub mod app_state;
pub mod security_config;
