//! Convenient re-exports for common usage.
//!
//! ## Usage
//!
//! ```rust
//! use wrapat::prelude::*;
//!
//! fn load() -> Result<String, WrapError> {
//!     std::fs::read_to_string("/no/such/file").wrap_msg("loading settings")
//! }
//!
//! fn run() -> Result<(), WrapError> {
//!     let _settings = load().wrap()?;
//!     Ok(())
//! }
//!
//! assert!(run().is_err());
//! ```

pub use crate::{ErrorWrapExt, OptionWrapExt, ResultWrapExt};
pub use crate::{WrapError, wrap, wrap_args, wrapf, wrapt};
