//! Library integration tests: build files loaded from disk and built for real.

mod pipeline_tests;
mod tree_tests;
