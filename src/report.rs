//! Structured `tracing` events for wrapped errors (requires the `tracing` feature).
//!
//! Nothing here runs on its own: the crate never logs. Callers that want an
//! event at the point they handle an error invoke [`WrapError::report`] or
//! [`ResultReportExt::report_err`] explicitly.

use crate::WrapError;

/// Target used for every event emitted by this module.
pub const REPORT_TARGET: &str = "wrapat";

impl WrapError {
    /// Emit one `ERROR` event describing this error.
    ///
    /// Fields: `file`, `line`, `function`, `msg` (empty when none) and `cause`
    /// (the first non-`WrapError` in the chain). The event message is the
    /// fully rendered chain.
    pub fn report(&self) {
        tracing::error!(
            target: REPORT_TARGET,
            file = self.file(),
            line = self.line(),
            function = self.function(),
            msg = self.message(),
            cause = %self.cause(),
            "{}",
            self
        );
    }
}

/// Report the error of a `Result` while passing it along.
///
/// ```rust
/// use wrapat::{ResultReportExt, ResultWrapExt};
///
/// let res: Result<(), _> = Err(std::io::Error::other("boom")).wrap().report_err();
/// assert!(res.is_err());
/// ```
pub trait ResultReportExt {
    /// Call [`WrapError::report`] on `Err`, then return `self` unchanged.
    fn report_err(self) -> Self;
}

impl<T> ResultReportExt for Result<T, WrapError> {
    fn report_err(self) -> Self {
        if let Err(err) = &self {
            err.report();
        }
        self
    }
}
