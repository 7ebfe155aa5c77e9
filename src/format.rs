//! The process-wide formatter used to render wrapped errors.
//!
//! [`WrapError`](crate::WrapError)'s `Display` never formats inline: it hands
//! its fields to the active formatter on every render. Swapping the formatter
//! with [`set_formatter`] therefore changes the output of every existing
//! instance, not only the ones created afterwards.
//!
//! The registry is a single global slot. Last write wins, there is no scoping
//! or stacking. Installing a formatter is atomic, but a render running on
//! another thread while it is swapped may use either the old or the new one.
//! Set it once during startup if output must be consistent.

use std::error::Error;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

// ============================================================================
// Formatter type
// ============================================================================

/// Signature of a formatter: `(file, line, function, inner, msg) -> String`.
///
/// `inner` is the wrapped error. Rendering it with `Display` recurses into the
/// rest of the chain when it is itself a [`WrapError`](crate::WrapError).
pub type FormatFn = dyn Fn(&str, u32, &str, &(dyn Error + 'static), &str) -> String + Send + Sync;

struct Formatter(Box<FormatFn>);

/// `None` means the default formatter.
static ACTIVE: ArcSwapOption<Formatter> = ArcSwapOption::const_empty();

// ============================================================================
// Registry
// ============================================================================

/// Replace the active formatter for the rest of the process.
///
/// ## Example
///
/// ```rust,no_run
/// use wrapat::{set_formatter, reset_formatter, wrap_msg};
///
/// set_formatter(|_file, line, function, inner, msg| {
///     format!("{function}#{line} - {msg}: {inner}")
/// });
/// let err = wrap_msg(std::io::Error::other("disk full"), "saving");
/// assert!(err.to_string().ends_with(" - saving: disk full"));
/// reset_formatter();
/// ```
pub fn set_formatter<F>(formatter: F)
where
    F: Fn(&str, u32, &str, &(dyn Error + 'static), &str) -> String + Send + Sync + 'static,
{
    ACTIVE.store(Some(Arc::new(Formatter(Box::new(formatter)))));
}

/// Restore [`default_formatter`] as the active formatter.
pub fn reset_formatter() {
    ACTIVE.store(None);
}

/// Render through the active formatter.
pub fn render(
    file: &str,
    line: u32,
    function: &str,
    inner: &(dyn Error + 'static),
    msg: &str,
) -> String {
    // `load_full` so no guard is held while the formatter recurses into `inner`.
    match ACTIVE.load_full() {
        Some(formatter) => (formatter.0)(file, line, function, inner, msg),
        None => default_formatter(file, line, function, inner, msg),
    }
}

// ============================================================================
// Default formatter
// ============================================================================

/// The stock rendering, one line per wrap level:
///
/// ```text
/// <namespace>/<basename>:<line>\t<name>()[\t<msg>]
/// <inner>
/// ```
///
/// `function` is split at its last `::`. A path without `::` renders as the
/// namespace with an empty name, so an unknown function yields `"/file.rs:7\t()"`.
///
/// ```rust
/// use wrapat::default_formatter;
///
/// let inner = std::io::Error::other("disk full");
/// let out = default_formatter("src/storage.rs", 42, "pkg::save", &inner, "");
/// assert_eq!(out, "pkg/storage.rs:42\tsave()\ndisk full");
/// ```
pub fn default_formatter(
    file: &str,
    line: u32,
    function: &str,
    inner: &(dyn Error + 'static),
    msg: &str,
) -> String {
    let (namespace, name) = split_function(function);

    let mut out = format!("{namespace}/{}:{line}\t{name}()", basename(file));
    if !msg.is_empty() {
        out.push('\t');
        out.push_str(msg);
    }
    out.push('\n');
    out.push_str(&inner.to_string());
    out
}

/// `"a::b::c"` -> `("a::b", "c")`; no separator -> `(function, "")`.
///
/// Separators inside generic arguments (`load<alloc::string::String>`) or a
/// qualified self type (`<T as Trait>::run`) are skipped.
fn split_function(function: &str) -> (&str, &str) {
    let bytes = function.as_bytes();
    let mut depth = 0usize;
    let mut split = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` in a fn pointer type is not a closing bracket
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                split = Some(i);
                i += 2;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    match split {
        Some(idx) => (&function[..idx], &function[idx + 2..]),
        None => (function, ""),
    }
}

/// Last path component, accepting both `/` and `\` separators.
fn basename(file: &str) -> &str {
    file.rsplit(['/', '\\']).next().unwrap_or(file)
}
