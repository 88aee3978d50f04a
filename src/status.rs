//! Status values: the classification carried by every error this crate builds.
//!
//! A [`Status`] is a plain, copyable wrapper around an [`http::StatusCode`].
//! Two statuses are equal when their codes are equal, which is what lets a
//! wrapped error compare equivalent to a predefined constant:
//!
//! ```
//! use http::StatusCode;
//! use status_rail::{is_equivalent, wrap, Status};
//!
//! let err = wrap("user 42 not in table", StatusCode::NOT_FOUND);
//!
//! assert!(is_equivalent(&*err, &Status::NOT_FOUND));
//! assert!(!is_equivalent(&*err, &Status::GONE));
//! assert_eq!(Status::TOO_MANY_REQUESTS.to_string(), "429 Too Many Requests");
//! ```

use core::fmt;

use http::StatusCode;

/// An HTTP status used as an error classification.
///
/// `Status` implements [`std::error::Error`], so a bare status is a complete
/// error value on its own. Its text is `"<code> <reason>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    code: StatusCode,
}

impl Status {
    /// Creates a status from an [`http::StatusCode`].
    #[inline]
    pub const fn new(code: StatusCode) -> Self {
        Self { code }
    }

    /// Returns the embedded status code.
    #[inline]
    pub const fn code(&self) -> StatusCode {
        self.code
    }

    /// Returns the status code as an integer.
    #[inline]
    pub fn as_u16(&self) -> u16 {
        self.code.as_u16()
    }

    /// Returns the canonical reason phrase, or `""` for unregistered codes.
    #[inline]
    pub fn text(&self) -> &'static str {
        self.code.canonical_reason().unwrap_or("")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code.as_u16(), self.text())
    }
}

impl std::error::Error for Status {}

impl From<StatusCode> for Status {
    #[inline]
    fn from(code: StatusCode) -> Self {
        Self::new(code)
    }
}

impl From<Status> for StatusCode {
    #[inline]
    fn from(status: Status) -> Self {
        status.code
    }
}

impl TryFrom<u16> for Status {
    type Error = InvalidStatus;

    /// Accepts codes in `100..=599`.
    fn try_from(code: u16) -> Result<Self, Self::Error> {
        if !(100..=599).contains(&code) {
            return Err(InvalidStatus(code));
        }
        StatusCode::from_u16(code).map(Self::new).map_err(|_| InvalidStatus(code))
    }
}

/// Returned by [`Status::try_from`] for integers outside `100..=599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStatus(pub u16);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid HTTP status code {}", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// Returns the reason phrase for `code`, or `""` if it has none.
///
/// ```
/// assert_eq!(status_rail::status_text(418), "I'm a teapot");
/// assert_eq!(status_rail::status_text(299), "");
/// ```
pub fn status_text(code: u16) -> &'static str {
    StatusCode::from_u16(code).ok().and_then(|c| c.canonical_reason()).unwrap_or("")
}

macro_rules! status_constants {
    ($($name:ident),* $(,)?) => {
        impl Status {
            $(
                #[doc = concat!("Predefined status for `StatusCode::", stringify!($name), "`.")]
                pub const $name: Status = Status::new(StatusCode::$name);
            )*
        }
    };
}

status_constants! {
    BAD_REQUEST,
    UNAUTHORIZED,
    PAYMENT_REQUIRED,
    FORBIDDEN,
    NOT_FOUND,
    METHOD_NOT_ALLOWED,
    NOT_ACCEPTABLE,
    PROXY_AUTHENTICATION_REQUIRED,
    REQUEST_TIMEOUT,
    CONFLICT,
    GONE,
    LENGTH_REQUIRED,
    PRECONDITION_FAILED,
    PAYLOAD_TOO_LARGE,
    URI_TOO_LONG,
    UNSUPPORTED_MEDIA_TYPE,
    RANGE_NOT_SATISFIABLE,
    EXPECTATION_FAILED,
    IM_A_TEAPOT,
    MISDIRECTED_REQUEST,
    UNPROCESSABLE_ENTITY,
    LOCKED,
    FAILED_DEPENDENCY,
    TOO_EARLY,
    UPGRADE_REQUIRED,
    PRECONDITION_REQUIRED,
    TOO_MANY_REQUESTS,
    REQUEST_HEADER_FIELDS_TOO_LARGE,
    UNAVAILABLE_FOR_LEGAL_REASONS,
    INTERNAL_SERVER_ERROR,
    NOT_IMPLEMENTED,
    BAD_GATEWAY,
    SERVICE_UNAVAILABLE,
    GATEWAY_TIMEOUT,
    HTTP_VERSION_NOT_SUPPORTED,
    VARIANT_ALSO_NEGOTIATES,
    INSUFFICIENT_STORAGE,
    LOOP_DETECTED,
    NOT_EXTENDED,
    NETWORK_AUTHENTICATION_REQUIRED,
}
