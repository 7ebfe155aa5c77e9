//! # wrapat - wrap errors where they pass through
//!
//! Annotate an error with the call site that saw it (function, file, line) and
//! an optional message, without losing the original error underneath.
//!
//! ```text
//! app::storage/storage.rs:42	save()	retry 3
//! app/main.rs:7	main()
//! disk full
//! ```
//!
//! One line per wrap level, outermost first, ending with the original error.
//!
//! ## Try It Now
//!
//! ```rust
//! use wrapat::{wrap, wrapf, ResultWrapExt, WrapError};
//! use std::io;
//!
//! fn save() -> Result<(), WrapError> {
//!     Err(wrapf!(io::Error::other("disk full"), "retry {}", 3))
//! }
//!
//! fn run() -> Result<(), WrapError> {
//!     save().wrap_fn(|| {})?;
//!     Ok(())
//! }
//!
//! let err = run().unwrap_err();
//! assert_eq!(err.to_string().lines().count(), 3);
//! assert!(err.function().ends_with("::run"));
//! assert_eq!(wrapat::cause(&err).to_string(), "disk full");
//! ```
//!
//! ## Wrapping
//!
//! Reach for the macros and `.wrap_fn(|| {})` first: they record the enclosing
//! function path, so every line renders as `namespace/file.rs:N\tname()`.
//! The plain functions and `.wrap()` methods only know file and line unless the
//! `backtrace` feature is on, and render as `/file.rs:N\t()` otherwise.
//!
//! | Entry point | Function path | Absent error |
//! |-------------|---------------|--------------|
//! | [`wrap!(err)`](wrap!) / [`wrapf!(err, ..)`](wrapf!) | ✅ captured | n/a |
//! | [`wrapt!(value, opt_err)`](wrapt!) | ✅ captured | `None` passes through |
//! | [`wrap_args!(err, a, b)`](wrap_args!) | ✅ captured | n/a |
//! | [`wrap(err)`](wrap()) / [`wrapf(err, format_args!(..))`](wrapf()) / [`wrap_msg`] | with `backtrace` feature | n/a |
//! | [`wrapt(value, opt_err)`](wrapt()) | with `backtrace` feature | `None` passes through |
//! | [`.wrap()`](ResultWrapExt::wrap) on `Result` / `Option` | with `backtrace` feature | `Ok` / `None` passes through |
//! | [`.wrap_fn(\|\| {})`](ResultWrapExt::wrap_fn) | ✅ captured | `Ok` passes through |
//!
//! File and line are always the line you wrote the call on: every layer is
//! `#[track_caller]`.
//!
//! ## Walking the chain
//!
//! | Function | Returns |
//! |----------|---------|
//! | [`unwrap(err)`](unwrap()) | `err.source()`, one step |
//! | [`unwrap_all(err)`](unwrap_all()) | the root: last error reachable through `source()` |
//! | [`cause(err)`](cause()) | first error that is not a [`WrapError`] |
//! | [`is_wrap(err)`](is_wrap()) | whether `err` is a [`WrapError`] |
//! | [`chain(err)`](chain()) / [`find::<T>(err)`](find()) | iterate / downcast-search the chain |
//!
//! ## Formatting
//!
//! Rendering goes through one process-wide formatter, [`default_formatter`]
//! unless replaced with [`set_formatter`]. A swap affects every existing error.
//!
//! ## Panics
//!
//! [`panic_to_error`] turns a recovered panic value into a [`WrapError`] with
//! the message `"panic recovered"`; [`catch`] runs a closure and does it for you.
//!
//! ## Features
//!
//! - `backtrace`: fill in function paths for the function and method forms by
//!   symbolizing the stack, and enable [`resolve_caller`]
//! - `tracing`: `WrapError::report()` emits a structured `ERROR` event

#![deny(unsafe_code)]

mod caller;
mod chain;
mod error;
mod ext;
mod format;
mod panic;
pub mod prelude;
#[cfg(feature = "tracing")]
mod report;

#[cfg(feature = "backtrace")]
pub use caller::resolve_caller;
pub use caller::CallSite;
pub use chain::{Chain, cause, chain, find, into_cause, is_wrap, unwrap, unwrap_all};
pub use error::{BoxError, WrapError};
pub use ext::{ErrorWrapExt, OptionWrapExt, ResultWrapExt};
pub use format::{FormatFn, default_formatter, render, reset_formatter, set_formatter};
pub use panic::{PANIC_MESSAGE, Recovered, catch, panic_to_error};
#[cfg(feature = "tracing")]
pub use report::{REPORT_TARGET, ResultReportExt};

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// Construction functions
// ============================================================================

/// Wrap `err` with the caller's location and no message.
///
/// ```rust
/// use wrapat::wrap;
///
/// let err = wrap(std::io::Error::other("disk full"));
/// assert_eq!(err.line(), line!() - 1);
/// ```
#[track_caller]
#[inline]
pub fn wrap(err: impl Into<BoxError>) -> WrapError {
    WrapError::capture(err.into(), None, Cow::Borrowed(""))
}

/// Wrap `err` with a formatted message.
///
/// ```rust
/// use wrapat::wrapf;
///
/// let err = wrapf(std::io::Error::other("disk full"), format_args!("retry {}", 3));
/// assert_eq!(err.message(), "retry 3");
/// ```
#[track_caller]
#[inline]
pub fn wrapf(err: impl Into<BoxError>, args: fmt::Arguments<'_>) -> WrapError {
    WrapError::capture(err.into(), None, __private::message(args))
}

/// Wrap `err` with a message.
#[track_caller]
#[inline]
pub fn wrap_msg(err: impl Into<BoxError>, msg: impl Into<Cow<'static, str>>) -> WrapError {
    WrapError::capture(err.into(), None, msg.into())
}

/// Forward `value` and wrap `err` if there is one.
///
/// For call shapes that produce a value alongside an optional error.
///
/// ```rust
/// use wrapat::wrapt;
///
/// let (v, err) = wrapt(100, None::<std::io::Error>);
/// assert_eq!(v, 100);
/// assert!(err.is_none());
///
/// let (v, err) = wrapt(100, Some(std::io::Error::other("partial write")));
/// assert_eq!(v, 100);
/// assert!(err.is_some());
/// ```
#[track_caller]
#[inline]
pub fn wrapt<T, E: Into<BoxError>>(value: T, err: Option<E>) -> (T, Option<WrapError>) {
    match err {
        Some(err) => (value, Some(WrapError::capture(err.into(), None, Cow::Borrowed("")))),
        None => (value, None),
    }
}

// ============================================================================
// Macros (capture the enclosing function path)
// ============================================================================

#[doc(hidden)]
pub mod __private {
    use super::*;

    pub use crate::caller::function_name_of;

    #[track_caller]
    #[inline]
    pub fn wrap_in(
        function: &'static str,
        err: impl Into<BoxError>,
        msg: Cow<'static, str>,
    ) -> WrapError {
        WrapError::capture(err.into(), Some(function), msg)
    }

    #[track_caller]
    #[inline]
    pub fn wrapt_in<T, E: Into<BoxError>>(
        function: &'static str,
        value: T,
        err: Option<E>,
    ) -> (T, Option<WrapError>) {
        match err {
            Some(err) => (
                value,
                Some(WrapError::capture(err.into(), Some(function), Cow::Borrowed(""))),
            ),
            None => (value, None),
        }
    }

    /// Static format strings are kept borrowed.
    pub fn message(args: fmt::Arguments<'_>) -> Cow<'static, str> {
        match args.as_str() {
            Some(s) => Cow::Borrowed(s),
            None => Cow::Owned(fmt::format(args)),
        }
    }

    pub fn args_message(args: &[&dyn fmt::Debug]) -> Cow<'static, str> {
        Cow::Owned(format!("args={args:?}"))
    }
}

/// Path of the function this macro is expanded in, e.g. `"my_crate::db::save"`.
#[doc(hidden)]
#[macro_export]
macro_rules! __function {
    () => {
        $crate::__private::function_name_of(|| {})
    };
}

/// Wrap an error, capturing the enclosing function path, file and line.
///
/// ```rust
/// use wrapat::wrap;
///
/// fn save() -> wrapat::WrapError {
///     wrap!(std::io::Error::other("disk full"))
/// }
///
/// assert!(save().function().ends_with("::save"));
/// ```
#[macro_export]
macro_rules! wrap {
    ($err:expr $(,)?) => {
        $crate::__private::wrap_in(
            $crate::__function!(),
            $err,
            ::std::borrow::Cow::Borrowed(""),
        )
    };
}

/// Wrap an error with a `format!`-style message, capturing the enclosing function.
///
/// ```rust
/// use wrapat::wrapf;
///
/// let err = wrapf!(std::io::Error::other("disk full"), "retry {}", 3);
/// assert_eq!(err.message(), "retry 3");
/// ```
#[macro_export]
macro_rules! wrapf {
    ($err:expr, $($arg:tt)+) => {
        $crate::__private::wrap_in(
            $crate::__function!(),
            $err,
            $crate::__private::message(::core::format_args!($($arg)+)),
        )
    };
}

/// Forward a value and wrap an optional error, capturing the enclosing function.
///
/// ```rust
/// use wrapat::wrapt;
///
/// fn read() -> (usize, Option<wrapat::WrapError>) {
///     wrapt!(3, Some(std::io::Error::other("short read")))
/// }
///
/// let (n, err) = read();
/// assert_eq!(n, 3);
/// assert!(err.unwrap().function().ends_with("::read"));
/// ```
#[macro_export]
macro_rules! wrapt {
    ($value:expr, $err:expr $(,)?) => {
        $crate::__private::wrapt_in($crate::__function!(), $value, $err)
    };
}

/// Wrap an error with a message listing argument values: `args=[a, b, ..]`.
///
/// Each argument is rendered with `Debug`.
///
/// ```rust
/// use wrapat::wrap_args;
///
/// let err = wrap_args!(std::io::Error::other("not found"), "user", 42, false);
/// assert_eq!(err.message(), r#"args=["user", 42, false]"#);
/// ```
#[macro_export]
macro_rules! wrap_args {
    ($err:expr $(, $arg:expr)* $(,)?) => {
        $crate::__private::wrap_in(
            $crate::__function!(),
            $err,
            $crate::__private::args_message(&[$(&$arg as &dyn ::core::fmt::Debug),*]),
        )
    };
}
