//! Converting recovered panics into wrapped errors.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{self, Location, UnwindSafe};

use crate::{BoxError, WrapError};

/// Message attached to every error built from a recovered panic.
pub const PANIC_MESSAGE: &str = "panic recovered";

/// A recovered panic value, sorted by shape.
///
/// Build one from a `catch_unwind` payload with `From`, or directly:
///
/// ```rust
/// use wrapat::Recovered;
///
/// let r = Recovered::from(Box::new("boom") as Box<dyn std::any::Any + Send>);
/// assert!(matches!(r, Recovered::Message(ref m) if m == "boom"));
/// ```
#[derive(Debug)]
pub enum Recovered {
    /// Nothing panicked.
    Absent,
    /// The panic carried an error value.
    Error(BoxError),
    /// The panic carried a string, as `panic!("...")` does.
    Message(Cow<'static, str>),
    /// Any other value, already rendered with `{:?}`.
    Other(String),
}

impl Recovered {
    /// A recovered error value.
    pub fn error(err: impl Into<BoxError>) -> Self {
        Self::Error(err.into())
    }

    /// A recovered string.
    pub fn message(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Message(msg.into())
    }

    /// A recovered value of any other type, kept as its `Debug` rendering.
    pub fn other<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Other(format!("{value:?}"))
    }

    /// The error to wrap, or `None` when nothing panicked.
    fn into_error(self) -> Option<BoxError> {
        match self {
            Self::Absent => None,
            Self::Error(err) => Some(err),
            Self::Message(msg) => Some(BoxError::from(msg)),
            Self::Other(repr) => Some(BoxError::from(repr)),
        }
    }
}

impl From<Box<dyn Any + Send>> for Recovered {
    fn from(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<&'static str>() {
            Ok(msg) => return Self::Message(Cow::Borrowed(*msg)),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<String>() {
            Ok(msg) => return Self::Message(Cow::Owned(*msg)),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<WrapError>() {
            Ok(err) => return Self::Error(err),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<BoxError>() {
            Ok(err) => return Self::Error(*err),
            Err(payload) => payload,
        };
        match primitive_repr(&*payload) {
            Some(repr) => Self::Other(repr),
            None => Self::Other(String::from("Box<dyn Any>")),
        }
    }
}

/// `Debug` rendering of a primitive payload, as `panic_any(42)` produces.
fn primitive_repr(payload: &(dyn Any + Send)) -> Option<String> {
    macro_rules! try_types {
        ($($ty:ty),* $(,)?) => {
            $(
                if let Some(value) = payload.downcast_ref::<$ty>() {
                    return Some(format!("{value:?}"));
                }
            )*
        };
    }

    try_types!(
        i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
    );
    None
}

impl From<Option<Box<dyn Any + Send>>> for Recovered {
    fn from(payload: Option<Box<dyn Any + Send>>) -> Self {
        payload.map_or(Self::Absent, Self::from)
    }
}

/// Turn a recovered panic value into a [`WrapError`] with [`PANIC_MESSAGE`].
///
/// The call site is the caller of `panic_to_error` (the recovery site), not
/// the place that panicked. Returns `None` for [`Recovered::Absent`].
///
/// ```rust
/// use wrapat::{panic_to_error, Recovered};
///
/// assert!(panic_to_error(Recovered::Absent).is_none());
///
/// let err = panic_to_error(Recovered::message("oops")).unwrap();
/// assert_eq!(err.message(), "panic recovered");
/// assert_eq!(err.inner().to_string(), "oops");
/// ```
#[track_caller]
pub fn panic_to_error(recovered: impl Into<Recovered>) -> Option<WrapError> {
    let inner = recovered.into().into_error()?;
    Some(WrapError::capture(inner, None, Cow::Borrowed(PANIC_MESSAGE)))
}

/// Run `f`, converting a panic into a [`WrapError`] located at this call.
///
/// The panic hook still runs as usual before the error is returned.
///
/// ```rust
/// let err = wrapat::catch(|| -> u32 { panic!("index out of range") }).unwrap_err();
/// assert_eq!(err.inner().to_string(), "index out of range");
/// ```
#[track_caller]
pub fn catch<T>(f: impl FnOnce() -> T + UnwindSafe) -> Result<T, WrapError> {
    let loc = Location::caller();
    match panic::catch_unwind(f) {
        Ok(value) => Ok(value),
        Err(payload) => {
            let inner = Recovered::from(payload)
                .into_error()
                .unwrap_or_else(|| BoxError::from(PANIC_MESSAGE));
            Err(WrapError::capture_at(loc, inner, None, Cow::Borrowed(PANIC_MESSAGE)))
        }
    }
}
