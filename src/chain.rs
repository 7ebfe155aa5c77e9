//! Traversal over arbitrary error chains.
//!
//! These are free functions rather than [`WrapError`] methods because they
//! accept any error, including ones this crate never saw. The one-step unwrap
//! capability is `Error::source()`; an error whose `source()` is `None` ends
//! the chain. Errors that aggregate several others (a fan-in join) but expose
//! no single `source()` are therefore treated as opaque end points.

use std::error::Error;
use std::iter::FusedIterator;

use crate::{BoxError, WrapError};

/// One step down the chain: `err.source()`.
///
/// `None` means `err` wraps nothing, whether or not it is a [`WrapError`].
///
/// ```rust
/// use wrapat::{unwrap, wrap};
/// use std::io;
///
/// let err = wrap(io::Error::other("disk full"));
/// let inner = unwrap(&err).unwrap();
/// assert_eq!(inner.to_string(), "disk full");
/// assert!(unwrap(inner).is_none());
/// ```
#[inline]
pub fn unwrap<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// Follow `source()` until it runs out and return that last error (the root).
///
/// Foreign wrappers are followed as well, so this may walk past the
/// [`cause`] of a chain. An error that reports itself as its own source stops
/// the walk.
///
/// ```rust
/// use wrapat::{unwrap_all, wrap, ErrorWrapExt};
/// use std::io;
///
/// let err = wrap(io::Error::other("disk full")).wrap_msg("saving");
/// assert_eq!(unwrap_all(&err).to_string(), "disk full");
/// ```
pub fn unwrap_all<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(next) = current.source() {
        if is_self_source(current, next) {
            break;
        }
        current = next;
    }
    current
}

/// Skip every [`WrapError`] layer and return the first error that is not one.
///
/// A foreign error is its own cause: nothing past it is inspected, even if it
/// has a `source()` of its own.
///
/// ```rust
/// use wrapat::{cause, wrap};
/// use std::io;
///
/// let root = io::Error::other("disk full");
/// let err = wrap(wrap(root));
/// assert!(cause(&err).is::<io::Error>());
/// ```
pub fn cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    match err.downcast_ref::<WrapError>() {
        Some(wrapped) => wrapped.cause(),
        None => err,
    }
}

/// Owned version of [`cause`] for boxed errors.
pub fn into_cause(err: BoxError) -> BoxError {
    match err.downcast::<WrapError>() {
        Ok(wrapped) => wrapped.into_cause(),
        Err(other) => other,
    }
}

/// True only for a [`WrapError`], not for any other error with a `source()`.
#[inline]
pub fn is_wrap(err: &(dyn Error + 'static)) -> bool {
    err.is::<WrapError>()
}

/// Iterate over `err` and everything reachable through `source()`, outermost first.
///
/// ```rust
/// use wrapat::{chain, wrap, ErrorWrapExt};
/// use std::io;
///
/// let err = wrap(io::Error::other("disk full")).wrap();
/// assert_eq!(chain(&err).count(), 3);
/// ```
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// First error in the chain whose concrete type is `T`.
///
/// ```rust
/// use wrapat::{find, wrap};
/// use std::io;
///
/// let err = wrap(io::Error::new(io::ErrorKind::NotFound, "config.toml"));
/// let io_err = find::<io::Error>(&err).unwrap();
/// assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
/// ```
pub fn find<'a, T: Error + 'static>(err: &'a (dyn Error + 'static)) -> Option<&'a T> {
    chain(err).find_map(|e| e.downcast_ref::<T>())
}

/// `next` is `current` itself, not a field stored at offset 0 of it.
///
/// A wrapper and its first field share an address, so the address alone
/// proves nothing. Equal trait-object pointers settle it; vtables can be
/// duplicated across codegen units, so equal-address pointers with distinct
/// vtables fall back to comparing size and `Debug` output.
fn is_self_source(current: &(dyn Error + 'static), next: &(dyn Error + 'static)) -> bool {
    if !std::ptr::addr_eq(current, next) {
        return false;
    }
    std::ptr::eq(current, next)
        || (std::mem::size_of_val(current) == std::mem::size_of_val(next)
            && format!("{current:?}") == format!("{next:?}"))
}

/// Iterator returned by [`chain`].
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .source()
            .filter(|next| !is_self_source(current, *next));
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}
