//! Constructors that turn a status, a message or an existing error into a
//! [`BoxError`] ready to be returned from a handler.
//!
//! # Examples
//!
//! ```
//! use http::StatusCode;
//! use status_rail::convert::*;
//! use status_rail::{is_equivalent, public_message, status_code, Status};
//!
//! let bare = status_error(StatusCode::BAD_REQUEST, "");
//! assert_eq!(bare.downcast_ref::<Status>(), Some(&Status::BAD_REQUEST));
//!
//! let described = status_error(StatusCode::BAD_REQUEST, "bad page token");
//! assert!(described.downcast_ref::<Status>().is_none());
//! assert!(is_equivalent(&*described, &Status::BAD_REQUEST));
//!
//! let public = public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter");
//! assert_eq!(status_code(Some(&*public)), StatusCode::BAD_REQUEST);
//! assert_eq!(public_message(Some(&*public)), "missing 'name' parameter");
//! ```

use http::StatusCode;

use crate::status::Status;
use crate::types::{BoxError, PublicError, WrappedError};

/// Builds an error carrying `status` and a private diagnostic message.
///
/// # Arguments
///
/// * `status` - The status to embed
/// * `message` - Private diagnostic text; may be empty
///
/// # Returns
///
/// * A bare [`Status`] when `message` is empty, so the result stays strictly
///   equal to the predefined constant
/// * A [`WrappedError`] around `message` otherwise
///
/// See [`status_error!`](crate::status_error!) for the formatting variant.
pub fn status_error<S: Into<String>>(status: StatusCode, message: S) -> BoxError {
    let message = message.into();
    if message.is_empty() {
        return Box::new(Status::new(status));
    }
    Box::new(WrappedError::new(message, status))
}

/// Wraps `cause` with `status`.
///
/// The text of the result is `"<code> <reason>: <cause>"`. The cause stays
/// reachable through [`source`](std::error::Error::source), and never reaches
/// a response body.
///
/// # Examples
///
/// ```
/// use http::StatusCode;
/// use status_rail::{is_equivalent, wrap, Status};
///
/// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
/// let err = wrap(io, StatusCode::NOT_FOUND);
///
/// assert_eq!(err.to_string(), "404 Not Found: no such file");
/// assert!(is_equivalent(&*err, &Status::NOT_FOUND));
/// ```
pub fn wrap<E: Into<BoxError>>(cause: E, status: StatusCode) -> BoxError {
    Box::new(WrappedError::new(cause, status))
}

/// Builds an error carrying `status` and a message that is safe to display.
///
/// See [`public_error!`](crate::public_error!) for the formatting variant.
pub fn public_error<S: Into<String>>(status: StatusCode, message: S) -> BoxError {
    Box::new(PublicError::new(status, message))
}

/// Panics with `err` as the payload.
///
/// A panic raised this way is recovered as a [`PanicError`](crate::PanicError)
/// whose cause is `err`, instead of a bare message.
pub fn panic_with<E: Into<BoxError>>(err: E) -> ! {
    std::panic::panic_any::<BoxError>(err.into())
}
