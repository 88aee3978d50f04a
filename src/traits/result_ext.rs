//! Extension trait for tagging `Result` errors with a status.
//!
//! ```
//! use http::StatusCode;
//! use status_rail::{status_code, ResultExt};
//!
//! fn parse_id(raw: &str) -> Result<u64, status_rail::BoxError> {
//!     raw.parse::<u64>().with_status(StatusCode::BAD_REQUEST)
//! }
//!
//! let err = parse_id("forty-two").unwrap_err();
//! assert_eq!(status_code(Some(&*err)), StatusCode::BAD_REQUEST);
//! ```

use http::StatusCode;

use crate::types::{BoxError, PublicError, WrappedError};

/// Adds status information to the error of a `Result`.
pub trait ResultExt<T> {
    /// Wraps the error with `status`, keeping it as the private cause.
    fn with_status(self, status: StatusCode) -> Result<T, BoxError>;

    /// Replaces the error with a public error. The original error is dropped,
    /// so nothing from it can leak into the response.
    fn with_public<S: Into<String>>(self, status: StatusCode, message: S) -> Result<T, BoxError>;

    /// Like [`with_public`](Self::with_public), but builds the message only on
    /// the error path.
    fn with_public_fn<F, S>(self, status: StatusCode, f: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[inline]
    fn with_status(self, status: StatusCode) -> Result<T, BoxError> {
        self.map_err(|err| Box::new(WrappedError::new(err, status)) as BoxError)
    }

    #[inline]
    fn with_public<S: Into<String>>(self, status: StatusCode, message: S) -> Result<T, BoxError> {
        self.map_err(|_| Box::new(PublicError::new(status, message)) as BoxError)
    }

    #[inline]
    fn with_public_fn<F, S>(self, status: StatusCode, f: F) -> Result<T, BoxError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|_| Box::new(PublicError::new(status, f())) as BoxError)
    }
}
