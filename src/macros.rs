//! Formatting shortcuts for the constructors in [`crate::convert`].
//!
//! - [`macro@crate::status_error`] - like `format!`, but returns a private error
//!   carrying a status
//! - [`macro@crate::public_error`] - like `format!`, but returns a public error
//!
//! # Examples
//!
//! ```
//! use http::StatusCode;
//! use status_rail::{public_error, public_message, status_error};
//!
//! let key = "name";
//! let private = status_error!(StatusCode::BAD_REQUEST, "missing parameter '{}'", key);
//! let public = public_error!(StatusCode::BAD_REQUEST, "missing parameter '{key}'");
//!
//! assert_eq!(private.to_string(), "400 Bad Request: missing parameter 'name'");
//! assert_eq!(public_message(Some(&*private)), "");
//! assert_eq!(public_message(Some(&*public)), "missing parameter 'name'");
//! ```

/// Builds a private status error from a format string.
///
/// Expands to [`status_error`](crate::convert::status_error) with the
/// formatted message, so an empty result yields a bare status.
#[macro_export]
macro_rules! status_error {
    ($status:expr, $($arg:tt)+) => {
        $crate::convert::status_error($status, ::std::format!($($arg)+))
    };
}

/// Builds a public error from a format string.
///
/// Expands to [`public_error`](crate::convert::public_error) with the
/// formatted message.
#[macro_export]
macro_rules! public_error {
    ($status:expr, $($arg:tt)+) => {
        $crate::convert::public_error($status, ::std::format!($($arg)+))
    };
}
