//! Integration tests for the default rendering of wrapped errors.
//!
//! This binary never installs a custom formatter.

use std::io;
use wrapat::{CallSite, WrapError, default_formatter, wrap};

mod pkg {
    use wrapat::{ResultWrapExt, WrapError};

    pub fn save() -> (WrapError, u32) {
        (wrapat::wrap!(std::io::Error::other("disk full")), line!())
    }

    pub fn save_with_retry(attempt: u32) -> (WrapError, u32) {
        (wrapat::wrapf!(std::io::Error::other("disk full"), "retry {}", attempt), line!())
    }

    pub fn load<T>() -> (WrapError, u32) {
        (wrapat::wrap!(std::io::Error::other("disk full")), line!())
    }

    pub fn run() -> (Result<(), WrapError>, u32, u32) {
        let (err, inner_line) = save();
        (Err(err).wrap_fn(|| {}), line!(), inner_line)
    }
}

// ============================================================================
// Line shape
// ============================================================================

#[test]
fn macro_wrap_renders_namespace_file_line_name() {
    let (err, line) = pkg::save();
    assert_eq!(
        err.to_string(),
        format!("output_format::pkg/output_format.rs:{line}\tsave()\ndisk full")
    );
}

#[test]
fn message_follows_function_after_tab() {
    let (err, line) = pkg::save_with_retry(3);
    assert_eq!(
        err.to_string(),
        format!("output_format::pkg/output_format.rs:{line}\tsave_with_retry()\tretry 3\ndisk full")
    );
}

#[test]
fn generic_function_keeps_namespace_intact() {
    let (err, line) = pkg::load::<String>();
    assert!(err.function().starts_with("output_format::pkg::load<"), "got {}", err.function());

    let rendered = err.to_string();
    let prefix = format!("output_format::pkg/output_format.rs:{line}\tload<");
    assert!(rendered.starts_with(&prefix), "got:\n{rendered}");
    assert!(rendered.ends_with("String>()\ndisk full"), "got:\n{rendered}");
}

#[test]
fn nested_wraps_render_outermost_first() {
    let (res, outer, inner) = pkg::run();
    let rendered = res.unwrap_err().to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(
        lines,
        [
            format!("output_format::pkg/output_format.rs:{outer}\trun()").as_str(),
            format!("output_format::pkg/output_format.rs:{inner}\tsave()").as_str(),
            "disk full",
        ]
    );
}

#[test]
fn one_line_per_level_plus_root() {
    let err = wrap(wrap(wrap(io::Error::other("disk full"))));
    let rendered = err.to_string();
    assert_eq!(rendered.lines().count(), 4);
    assert!(rendered.ends_with("\ndisk full"));
}

#[test]
fn file_is_basename_only() {
    let err = WrapError::from_parts(
        CallSite::new("app::db::save", "/home/me/app/src/db/mod.rs", 12),
        io::Error::other("x"),
        "",
    );
    assert_eq!(err.to_string(), "app::db/mod.rs:12\tsave()\nx");
}

#[test]
fn windows_paths_are_split_too() {
    let err = WrapError::from_parts(
        CallSite::new("app::run", r"C:\src\app\main.rs", 5),
        io::Error::other("x"),
        "",
    );
    assert_eq!(err.to_string(), "app/main.rs:5\trun()\nx");
}

// ============================================================================
// Unknown parts
// ============================================================================

#[test]
fn function_without_separator_renders_empty_name() {
    let err = WrapError::from_parts(CallSite::new("main", "main.rs", 1), io::Error::other("x"), "");
    assert_eq!(err.to_string(), "main/main.rs:1\t()\nx");
}

#[cfg(not(feature = "backtrace"))]
#[test]
fn method_form_without_function_path() {
    use wrapat::ResultWrapExt;

    let res: Result<(), io::Error> = Err(io::Error::other("disk full"));
    let (res, line) = (res.wrap_msg("saving"), line!());
    assert_eq!(
        res.unwrap_err().to_string(),
        format!("/output_format.rs:{line}\t()\tsaving\ndisk full")
    );
}

// ============================================================================
// Direct formatter calls
// ============================================================================

#[test]
fn default_formatter_recurses_through_inner_display() {
    let inner = WrapError::from_parts(CallSite::new("a::b", "b.rs", 2), io::Error::other("root"), "");
    let out = default_formatter("a.rs", 1, "a::a", &inner, "top");
    assert_eq!(out, "a/a.rs:1\ta()\ttop\na/b.rs:2\tb()\nroot");
}

#[test]
fn multiline_root_message_is_kept_verbatim() {
    let err = WrapError::from_parts(
        CallSite::new("a::b", "b.rs", 2),
        io::Error::other("first\nsecond"),
        "",
    );
    assert_eq!(err.to_string(), "a/b.rs:2\tb()\nfirst\nsecond");
}
