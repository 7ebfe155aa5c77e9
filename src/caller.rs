//! Call-site capture for wrapped errors.
//!
//! A [`CallSite`] records one frame: the function that wrapped an error, the
//! source file and the line. File and line come from [`Location::caller()`],
//! which every construction path forwards with `#[track_caller]`, so the
//! reported line is the public call expression no matter how many internal
//! layers sit in between. The function path comes from the construction
//! macros, or from stack symbolization when the `backtrace` feature is on.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

// ============================================================================
// CallSite
// ============================================================================

/// The source location that wrapped an error.
///
/// Every field soft-fails: when a part cannot be captured it is left empty
/// (or `0` for the line). Call-site data is diagnostic, never load-bearing.
///
/// ## Example
///
/// ```rust
/// use wrapat::CallSite;
///
/// let site = CallSite::here();
/// assert!(site.file().ends_with(".rs"));
/// assert!(site.line() > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CallSite {
    function: Cow<'static, str>,
    file: Cow<'static, str>,
    line: u32,
}

impl CallSite {
    /// A call site with nothing captured.
    pub const fn empty() -> Self {
        Self {
            function: Cow::Borrowed(""),
            file: Cow::Borrowed(""),
            line: 0,
        }
    }

    /// Build a call site from static parts.
    pub const fn new(function: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            function: Cow::Borrowed(function),
            file: Cow::Borrowed(file),
            line,
        }
    }

    /// Capture the caller's file and line. The function path is left empty.
    #[track_caller]
    #[inline]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    /// Build a call site from a `track_caller` location.
    pub fn from_location(loc: &'static Location<'static>) -> Self {
        Self {
            function: Cow::Borrowed(""),
            file: Cow::Borrowed(loc.file()),
            line: loc.line(),
        }
    }

    /// Attach a fully-qualified function path such as `"my_crate::db::save"`.
    pub fn with_function(mut self, function: impl Into<Cow<'static, str>>) -> Self {
        self.function = function.into();
        self
    }

    /// Fully-qualified function path, `""` if unknown.
    #[inline]
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Source file path as reported by the compiler, `""` if unknown.
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Source line, `0` if unknown.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// True when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.function.is_empty() && self.file.is_empty() && self.line == 0
    }

    /// Call site used by every construction path.
    ///
    /// `function` is the path produced by the construction macros. Without it
    /// the name is looked up from the live stack when the `backtrace` feature
    /// is enabled, and left empty otherwise.
    pub(crate) fn at_location(
        loc: &'static Location<'static>,
        function: Option<&'static str>,
    ) -> Self {
        let site = Self::from_location(loc);
        match function {
            Some(name) => site.with_function(name),
            None => site.complete(),
        }
    }

    #[cfg(feature = "backtrace")]
    fn complete(self) -> Self {
        match symbolize::function_at(&self.file, self.line) {
            Some(name) => self.with_function(name),
            None => self,
        }
    }

    #[cfg(not(feature = "backtrace"))]
    #[inline]
    fn complete(self) -> Self {
        self
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)?;
        if !self.function.is_empty() {
            write!(f, " in {}", self.function)?;
        }
        Ok(())
    }
}

// ============================================================================
// Function names
// ============================================================================

/// Path of the function that defines `F`.
///
/// Pass an empty closure: its type name is `"<fn path>::{{closure}}"`.
/// Used by the construction macros.
#[doc(hidden)]
pub fn function_name_of<F: Fn()>(_marker: F) -> &'static str {
    trim_closures(core::any::type_name::<F>())
}

/// Strip every trailing `::{{closure}}` so closures report their enclosing fn.
fn trim_closures(mut name: &str) -> &str {
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

// ============================================================================
// Stack symbolization (feature = "backtrace")
// ============================================================================

/// Resolve the frame `skip` levels above this function's own frame.
///
/// `skip` is clamped to at least 1; `resolve_caller(1)` reports whoever called
/// `resolve_caller`. Inlined functions count as their own frames. Returns
/// [`CallSite::empty()`] when the stack is too short or carries no debug info.
///
/// ## Example
///
/// ```rust
/// # #[cfg(feature = "backtrace")] {
/// let site = wrapat::resolve_caller(1);
/// // Soft failure is allowed, e.g. in stripped release builds.
/// assert!(site.line() > 0 || site.is_empty());
/// # }
/// ```
#[cfg(feature = "backtrace")]
#[inline(never)]
pub fn resolve_caller(skip: usize) -> CallSite {
    let skip = skip.max(1);
    let mut frames: Vec<CallSite> = Vec::new();
    let mut own = None;

    backtrace::trace(|frame| {
        backtrace::resolve_frame(frame, |symbol| {
            let function = symbol
                .name()
                .map(|name| symbolize::clean(&format!("{name:#}")))
                .unwrap_or_default();
            if own.is_none() && function.ends_with("resolve_caller") {
                own = Some(frames.len());
            }
            let file = symbol
                .filename()
                .map(|path| path.to_string_lossy().into_owned())
                .unwrap_or_default();
            frames.push(CallSite {
                function: Cow::Owned(function),
                file: Cow::Owned(file),
                line: symbol.lineno().unwrap_or(0),
            });
        });
        own.is_none_or(|idx| frames.len() <= idx + skip)
    });

    own.and_then(|idx| frames.into_iter().nth(idx + skip))
        .unwrap_or_else(CallSite::empty)
}

#[cfg(feature = "backtrace")]
mod symbolize {
    use std::path::Path;

    /// Function whose debug info maps to `file:line`, searched from the innermost frame.
    pub(super) fn function_at(file: &str, line: u32) -> Option<String> {
        if file.is_empty() || line == 0 {
            return None;
        }
        let target = Path::new(file);
        let mut found = None;
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_some() {
                    return;
                }
                let (Some(path), Some(lineno), Some(name)) =
                    (symbol.filename(), symbol.lineno(), symbol.name())
                else {
                    return;
                };
                if lineno == line && path.ends_with(target) {
                    found = Some(clean(&format!("{name:#}")));
                }
            });
            found.is_none()
        });
        found
    }

    /// Demangled symbol without closure suffixes.
    pub(super) fn clean(name: &str) -> String {
        super::trim_closures(name).to_owned()
    }
}
