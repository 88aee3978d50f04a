use core::fmt;

use http::StatusCode;

use crate::status::Status;
use crate::types::BoxError;

/// An arbitrary error tagged with a [`Status`].
///
/// The cause stays private: it shows up in `Display` and through
/// [`source`](std::error::Error::source), but never in a response body.
///
/// ```
/// use http::StatusCode;
/// use status_rail::{status_code, WrappedError};
///
/// let err = WrappedError::new("missing parameter 'foo'", StatusCode::BAD_REQUEST);
///
/// assert_eq!(err.to_string(), "400 Bad Request: missing parameter 'foo'");
/// assert_eq!(status_code(Some(&err)), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug)]
pub struct WrappedError {
    cause: BoxError,
    status: Status,
}

impl WrappedError {
    /// Wraps `cause` with `status`.
    #[inline]
    pub fn new<E>(cause: E, status: StatusCode) -> Self
    where
        E: Into<BoxError>,
    {
        Self { cause: cause.into(), status: Status::new(status) }
    }

    /// Returns the embedded status.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the wrapped cause.
    #[inline]
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.cause
    }

    /// Consumes the wrapper, returning the cause.
    #[inline]
    pub fn into_cause(self) -> BoxError {
        self.cause
    }
}

impl fmt::Display for WrappedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.cause)
    }
}

impl std::error::Error for WrappedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.cause)
    }
}

/// Equal when both carry the same status and the very same cause (compared by
/// address), so a wrapped error is equal to itself but not to a re-wrap of an
/// equal-looking cause.
impl PartialEq for WrappedError {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && core::ptr::addr_eq(&*self.cause, &*other.cause)
    }
}
