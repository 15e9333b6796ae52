//! Logging for integration test binaries.
//!
//! Honors `TEST_LOG`, then `RUST_LOG`, then defaults to `warn`:
//!
//! ```bash
//! TEST_LOG=info cargo test --test routes_tests
//! ```

#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    backend_test_support::test_logging::init();
}
