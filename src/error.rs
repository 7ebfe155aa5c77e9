//! The [`WrapError`] type: an error annotated with the call site that wrapped it.
//!
//! This is the primary value produced by every construction path in the crate.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::panic::Location;

use crate::CallSite;
use crate::format;

/// An owned, type-erased error. Anything wrapped is stored as one of these.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

// ============================================================================
// WrapError - Core wrapper type
// ============================================================================

/// An error wrapped with one call-site frame and an optional message.
///
/// A `WrapError` is immutable once built. It exclusively owns the error it
/// wraps, which may itself be a `WrapError`, so a chain of wraps is always
/// finite and acyclic.
///
/// ## Rendering
///
/// `Display` delegates to the active formatter (see
/// [`set_formatter`](crate::set_formatter)). The default one prints one line per
/// wrap level, outermost first, followed by the innermost error's message:
///
/// ```text
/// app::storage/storage.rs:42\tsave()\tretry 3
/// app/main.rs:7\tmain()
/// disk full
/// ```
///
/// `Debug` renders the same way; `{:#?}` dumps the fields instead.
///
/// ## Chain access
///
/// `source()` returns the wrapped error unchanged, so std-style chain walking,
/// `anyhow`'s `chain()`, and [`find`](crate::find) all see through it.
/// [`cause()`](Self::cause) skips every nested `WrapError` and stops at the
/// first foreign error.
///
/// ## Example
///
/// ```rust
/// use wrapat::{wrap, WrapError};
/// use std::io;
///
/// fn read_config() -> Result<String, WrapError> {
///     Err(wrap(io::Error::new(io::ErrorKind::NotFound, "config.toml")))
/// }
///
/// let err = read_config().unwrap_err();
/// assert!(err.file().ends_with(".rs"));
/// assert_eq!(err.message(), "");
/// assert!(err.cause().downcast_ref::<io::Error>().is_some());
/// ```
pub struct WrapError {
    site: CallSite,
    inner: BoxError,
    msg: Cow<'static, str>,
}

impl WrapError {
    /// Build a `WrapError` from explicit parts, without capturing anything.
    ///
    /// Useful for tests and for re-hydrating errors whose call site was
    /// recorded elsewhere. An empty `msg` means "no message".
    pub fn from_parts(
        site: CallSite,
        inner: impl Into<BoxError>,
        msg: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            site,
            inner: inner.into(),
            msg: msg.into(),
        }
    }

    /// Capture the caller's location and wrap `inner`.
    ///
    /// Every public construction path funnels through here with
    /// `#[track_caller]` on each hop.
    #[track_caller]
    #[inline]
    pub(crate) fn capture(
        inner: BoxError,
        function: Option<&'static str>,
        msg: Cow<'static, str>,
    ) -> Self {
        Self::capture_at(Location::caller(), inner, function, msg)
    }

    /// Like [`capture`](Self::capture) with a location taken earlier.
    pub(crate) fn capture_at(
        loc: &'static Location<'static>,
        inner: BoxError,
        function: Option<&'static str>,
        msg: Cow<'static, str>,
    ) -> Self {
        Self {
            site: CallSite::at_location(loc, function),
            inner,
            msg,
        }
    }

    /// The captured call site.
    #[inline]
    pub fn call_site(&self) -> &CallSite {
        &self.site
    }

    /// Source file of the call site, `""` if unknown.
    #[inline]
    pub fn file(&self) -> &str {
        self.site.file()
    }

    /// Line of the call site, `0` if unknown.
    #[inline]
    pub fn line(&self) -> u32 {
        self.site.line()
    }

    /// Fully-qualified function path of the call site, `""` if unknown.
    #[inline]
    pub fn function(&self) -> &str {
        self.site.function()
    }

    /// The message attached when wrapping, `""` when there is none.
    #[inline]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// The wrapped error, one step down the chain.
    #[inline]
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Consume self and return the wrapped error.
    #[inline]
    pub fn into_inner(self) -> BoxError {
        self.inner
    }

    /// The first error below this one that is not a `WrapError`.
    ///
    /// Only `WrapError` layers are skipped. A foreign error that has its own
    /// `source()` is returned as-is.
    ///
    /// ```rust
    /// use wrapat::{wrap, ErrorWrapExt};
    /// use std::io;
    ///
    /// let err = wrap(io::Error::other("disk full")).wrap();
    /// let cause = err.cause().downcast_ref::<io::Error>().unwrap();
    /// assert_eq!(cause.to_string(), "disk full");
    /// ```
    pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
        let mut inner: &(dyn Error + Send + Sync + 'static) = &*self.inner;
        while let Some(wrapped) = inner.downcast_ref::<WrapError>() {
            inner = &*wrapped.inner;
        }
        inner
    }

    /// Owned version of [`cause`](Self::cause): peel off every `WrapError` layer.
    pub fn into_cause(self) -> BoxError {
        let mut inner = self.inner;
        loop {
            match inner.downcast::<WrapError>() {
                Ok(wrapped) => inner = wrapped.inner,
                Err(other) => return other,
            }
        }
    }

    /// Render with an explicit formatter instead of the active one.
    ///
    /// ```rust
    /// use wrapat::{default_formatter, CallSite, WrapError};
    ///
    /// let err = WrapError::from_parts(CallSite::new("app::run", "src/app.rs", 9), "boom", "");
    /// assert_eq!(err.format_with(default_formatter), "app/app.rs:9\trun()\nboom");
    /// ```
    pub fn format_with<F>(&self, formatter: F) -> String
    where
        F: Fn(&str, u32, &str, &(dyn Error + 'static), &str) -> String,
    {
        formatter(self.file(), self.line(), self.function(), &*self.inner, &self.msg)
    }
}

// ============================================================================
// Display / Debug
// ============================================================================

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::render(
            self.file(),
            self.line(),
            self.function(),
            &*self.inner,
            &self.msg,
        ))
    }
}

impl fmt::Debug for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return f
                .debug_struct("WrapError")
                .field("function", &self.function())
                .field("file", &self.file())
                .field("line", &self.line())
                .field("msg", &self.message())
                .field("inner", &self.inner)
                .finish();
        }
        fmt::Display::fmt(self, f)
    }
}

// ============================================================================
// Error impl
// ============================================================================

impl Error for WrapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.inner)
    }
}
