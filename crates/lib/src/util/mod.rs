//! Shared utilities.
//!
//! Test helpers shared across the crate's unit tests.

#[cfg(test)]
pub mod testutil;
