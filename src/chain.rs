//! Walking the wrap chain and extracting capabilities.
//!
//! An error's chain is the error itself followed by every
//! [`source`](std::error::Error::source) below it. Each link is classified by
//! an explicit type switch over this crate's node types; capability lookups
//! return the answer of the first link that has one.
//!
//! ```
//! use http::StatusCode;
//! use status_rail::{public_error, public_message, status_code, wrap};
//!
//! let err = wrap(public_error(StatusCode::CONFLICT, "name taken"), StatusCode::BAD_REQUEST);
//!
//! // The outermost status wins, but the public message is still found below it.
//! assert_eq!(status_code(Some(&*err)), StatusCode::BAD_REQUEST);
//! assert_eq!(public_message(Some(&*err)), "name taken");
//!
//! assert_eq!(status_code(None), StatusCode::OK);
//! assert_eq!(status_code(Some(&std::fmt::Error)), StatusCode::INTERNAL_SERVER_ERROR);
//! ```

use core::any::Any;
use core::iter::FusedIterator;
use std::error::Error;

use http::StatusCode;

use crate::status::Status;
use crate::types::{Exposed, PanicError, PublicError, WrappedError};

/// Iterator over an error and its sources, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Chain<'a> {
    /// Starts a chain at `err`.
    #[inline]
    pub fn new(err: &'a (dyn Error + 'static)) -> Self {
        Self { next: Some(err) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Returns an iterator over `err` and its sources.
#[inline]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain::new(err)
}

/// One link of a chain, classified by concrete type.
enum Node<'a> {
    Status(&'a Status),
    Wrapped(&'a WrappedError),
    Public(&'a PublicError),
    Panic,
    Exposed(&'a Exposed),
    Foreign,
}

impl<'a> Node<'a> {
    fn classify(err: &'a (dyn Error + 'static)) -> Self {
        if let Some(status) = err.downcast_ref::<Status>() {
            Node::Status(status)
        } else if let Some(wrapped) = err.downcast_ref::<WrappedError>() {
            Node::Wrapped(wrapped)
        } else if let Some(public) = err.downcast_ref::<PublicError>() {
            Node::Public(public)
        } else if err.is::<PanicError>() {
            Node::Panic
        } else if let Some(exposed) = err.downcast_ref::<Exposed>() {
            Node::Exposed(exposed)
        } else {
            Node::Foreign
        }
    }

    fn status(&self) -> Option<Status> {
        match self {
            Node::Status(status) => Some(**status),
            Node::Wrapped(wrapped) => Some(wrapped.status()),
            Node::Public(public) => Some(public.status()),
            Node::Panic | Node::Exposed(_) | Node::Foreign => None,
        }
    }

    fn public_message(&self) -> Option<&'a str> {
        match self {
            Node::Public(public) => Some(public.message()),
            Node::Exposed(exposed) => Some(exposed.message()),
            _ => None,
        }
    }
}

/// Extracts the status code from `err`'s chain.
///
/// Returns `200 OK` for `None`, so a handler's result can be passed in
/// unconditionally, and `500 Internal Server Error` when no link in the chain
/// carries a status.
pub fn status_code(err: Option<&(dyn Error + 'static)>) -> StatusCode {
    let Some(err) = err else {
        return StatusCode::OK;
    };
    chain(err)
        .find_map(|link| Node::classify(link).status())
        .map_or(StatusCode::INTERNAL_SERVER_ERROR, |status| status.code())
}

/// Extracts the public message from `err`'s chain.
///
/// Only [`PublicError`] and [`Exposed`] links carry one; everything else,
/// including the text of wrapped causes, stays private. Returns `""` when
/// nothing public is found.
pub fn public_message<'a>(err: Option<&'a (dyn Error + 'static)>) -> &'a str {
    err.and_then(|err| chain(err).find_map(|link| Node::classify(link).public_message()))
        .unwrap_or("")
}

/// Reports whether any link in `err`'s chain is equivalent to `target`.
///
/// - A [`Status`] target matches any link carrying the same status code, so a
///   [`WrappedError`] or [`PublicError`] matches its predefined constant.
/// - [`PanicError::SENTINEL`] matches any recovered panic.
/// - Otherwise a link matches when it is a `T` equal to `target`.
///
/// The relation is not symmetric: a bare status is never equivalent to a
/// wrapped error, because the status has no link of the wrapped type.
pub fn is_equivalent<T>(err: &(dyn Error + 'static), target: &T) -> bool
where
    T: Error + PartialEq + 'static,
{
    let target_any: &dyn Any = target;

    if let Some(status) = target_any.downcast_ref::<Status>() {
        return chain(err).any(|link| Node::classify(link).status() == Some(*status));
    }

    if target_any.downcast_ref::<PanicError>().is_some_and(PanicError::is_sentinel)
        && chain(err).any(|link| matches!(Node::classify(link), Node::Panic))
    {
        return true;
    }

    chain(err).any(|link| link.downcast_ref::<T>() == Some(target))
}
