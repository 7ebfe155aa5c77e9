//! A fake dependency crate for testing cross-crate error wrapping.
//!
//! Errors built here carry this crate's module paths and file names, so the
//! tests in the main crate can tell which side of the boundary each level
//! was wrapped on.

use std::fmt;
use wrapat::{ResultWrapExt, WrapError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeDepError {
    NotFound { key: String },
    ConnectionFailed,
    Timeout,
}

impl fmt::Display for FakeDepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FakeDepError::NotFound { key } => write!(f, "key not found: {key}"),
            FakeDepError::ConnectionFailed => f.write_str("connection failed"),
            FakeDepError::Timeout => f.write_str("timed out"),
        }
    }
}

impl std::error::Error for FakeDepError {}

/// Returns an error wrapped inside this crate.
pub fn fetch_data(key: &str) -> Result<String, WrapError> {
    Err(wrapat::wrap!(FakeDepError::NotFound {
        key: key.to_string()
    }))
}

/// Returns an error wrapped twice, the outer level with a message.
pub fn fetch_with_context(key: &str) -> Result<String, WrapError> {
    let value = fetch_data(key).wrap_msg("fetching from remote")?;
    Ok(value)
}

/// Three levels deep, every level wrapped inside this crate.
pub fn deep_operation() -> Result<(), WrapError> {
    level_one()?;
    Ok(())
}

fn level_one() -> Result<(), WrapError> {
    level_two().wrap_fn(|| {})
}

fn level_two() -> Result<(), WrapError> {
    Err(wrapat::wrapf!(FakeDepError::ConnectionFailed, "after {} attempts", 3))
}
