//! CLI integration tests.

mod build_tests;
mod common;
mod query_tests;
