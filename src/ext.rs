//! Extension traits for wrapping errors in method position.
//!
//! - [`ErrorWrapExt`]: call `.wrap()` on any error value
//! - [`ResultWrapExt`]: call `.wrap()` on `Result<T, E>`; `Ok` passes through
//! - [`OptionWrapExt`]: call `.wrap()` on `Option<E>`; `None` passes through
//!
//! Every method captures its caller's location. The `Ok`/`None` pass-through
//! is what lets call sites wrap unconditionally without checking first.
//!
//! Only [`ResultWrapExt::wrap_fn`] records the enclosing function path on its
//! own; the other methods need the `backtrace` feature for it.

use std::borrow::Cow;

use crate::caller::function_name_of;
use crate::error::{BoxError, WrapError};

// ============================================================================
// ErrorWrapExt Trait - for calling .wrap() directly on error values
// ============================================================================

/// Extension trait that allows calling `.wrap()` on error types.
///
/// ```rust
/// use wrapat::ErrorWrapExt;
/// use std::io;
///
/// let err = io::Error::other("disk full").wrap_msg("saving");
/// assert_eq!(err.message(), "saving");
/// ```
pub trait ErrorWrapExt: Sized {
    /// Wrap this error, capturing the caller's location.
    #[track_caller]
    fn wrap(self) -> WrapError;

    /// Wrap this error with a message.
    #[track_caller]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> WrapError;
}

impl<E: std::error::Error + Send + Sync + 'static> ErrorWrapExt for E {
    #[track_caller]
    #[inline]
    fn wrap(self) -> WrapError {
        WrapError::capture(Box::new(self), None, Cow::Borrowed(""))
    }

    #[track_caller]
    #[inline]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> WrapError {
        WrapError::capture(Box::new(self), None, msg.into())
    }
}

// ============================================================================
// ResultWrapExt Trait - for calling .wrap() on Results
// ============================================================================

/// Extension trait for wrapping the error of a `Result`.
///
/// `Ok` values pass through untouched.
///
/// ## Example
///
/// ```rust
/// use wrapat::{ResultWrapExt, WrapError};
/// use std::fs;
///
/// fn load(path: &str) -> Result<String, WrapError> {
///     fs::read_to_string(path).wrap_with(|| format!("reading {path}"))
/// }
///
/// let err = load("/definitely/not/here").unwrap_err();
/// assert_eq!(err.message(), "reading /definitely/not/here");
/// ```
pub trait ResultWrapExt<T> {
    /// Wrap the error, if any, capturing the caller's location.
    #[track_caller]
    fn wrap(self) -> Result<T, WrapError>;

    /// Wrap the error, if any, with a message.
    #[track_caller]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> Result<T, WrapError>;

    /// Wrap the error, if any, with a lazily-built message.
    ///
    /// The closure only runs on `Err`.
    #[track_caller]
    fn wrap_with<M: Into<Cow<'static, str>>>(self, f: impl FnOnce() -> M) -> Result<T, WrapError>;

    /// Wrap the error, if any, recording the enclosing function's path.
    ///
    /// Pass an empty closure `|| {}`: its type names the function it sits in.
    #[track_caller]
    fn wrap_fn<F: Fn()>(self, marker: F) -> Result<T, WrapError>;
}

impl<T, E: Into<BoxError>> ResultWrapExt<T> for Result<T, E> {
    #[track_caller]
    #[inline]
    fn wrap(self) -> Result<T, WrapError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(WrapError::capture(e.into(), None, Cow::Borrowed(""))),
        }
    }

    #[track_caller]
    #[inline]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> Result<T, WrapError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(WrapError::capture(e.into(), None, msg.into())),
        }
    }

    #[track_caller]
    #[inline]
    fn wrap_with<M: Into<Cow<'static, str>>>(self, f: impl FnOnce() -> M) -> Result<T, WrapError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(WrapError::capture(e.into(), None, f().into())),
        }
    }

    #[track_caller]
    #[inline]
    fn wrap_fn<F: Fn()>(self, marker: F) -> Result<T, WrapError> {
        match self {
            Ok(v) => Ok(v),
            Err(e) => Err(WrapError::capture(
                e.into(),
                Some(function_name_of(marker)),
                Cow::Borrowed(""),
            )),
        }
    }
}

// ============================================================================
// OptionWrapExt Trait - for optional errors
// ============================================================================

/// Extension trait for an error that may be absent.
///
/// ```rust
/// use wrapat::OptionWrapExt;
/// use std::io;
///
/// let none: Option<io::Error> = None;
/// assert!(none.wrap().is_none());
/// assert!(Some(io::Error::other("boom")).wrap().is_some());
/// ```
pub trait OptionWrapExt {
    /// Wrap the error if present; `None` stays `None`.
    #[track_caller]
    fn wrap(self) -> Option<WrapError>;

    /// Wrap the error with a message if present; `None` stays `None`.
    #[track_caller]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> Option<WrapError>;
}

impl<E: Into<BoxError>> OptionWrapExt for Option<E> {
    #[track_caller]
    #[inline]
    fn wrap(self) -> Option<WrapError> {
        match self {
            Some(e) => Some(WrapError::capture(e.into(), None, Cow::Borrowed(""))),
            None => None,
        }
    }

    #[track_caller]
    #[inline]
    fn wrap_msg(self, msg: impl Into<Cow<'static, str>>) -> Option<WrapError> {
        match self {
            Some(e) => Some(WrapError::capture(e.into(), None, msg.into())),
            None => None,
        }
    }
}
