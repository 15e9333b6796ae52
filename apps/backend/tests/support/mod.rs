pub mod app_builder;
pub mod logging;
pub mod test_state;

pub use app_builder::create_test_app;
pub use test_state::{test_context, TestContext};
