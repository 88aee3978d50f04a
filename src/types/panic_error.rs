use core::any::Any;
use core::fmt;

use crate::status::Status;
use crate::types::{BoxError, Exposed, PublicError, WrappedError};

/// A panic recovered by [`catch_panic`](crate::catch_panic) or one of the panic
/// middlewares.
///
/// When the panic payload was an error value it is kept as the
/// [`source`](std::error::Error::source), so the recovered error is equivalent
/// both to [`PanicError::SENTINEL`] and to the original error:
///
/// ```
/// use status_rail::{catch_panic, is_equivalent, panic_with, PanicError, Status};
///
/// let err = catch_panic(|| panic_with(Status::NOT_FOUND)).unwrap_err();
///
/// assert!(is_equivalent(&*err, &PanicError::SENTINEL));
/// assert!(is_equivalent(&*err, &Status::NOT_FOUND));
/// assert_eq!(err.to_string(), "panic: 404 Not Found");
/// ```
#[derive(Debug)]
pub struct PanicError {
    inner: Option<BoxError>,
    message: String,
}

impl PanicError {
    /// The zero value. Every `PanicError` is equivalent to it under
    /// [`is_equivalent`](crate::is_equivalent).
    pub const SENTINEL: PanicError = PanicError { inner: None, message: String::new() };

    /// Builds a panic error from a payload returned by
    /// [`std::panic::catch_unwind`].
    ///
    /// Error payloads (a [`BoxError`] or one of this crate's node types) are
    /// kept as the inner cause. String payloads become the raw message.
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        downcast_error::<BoxError>(payload)
            .or_else(downcast_error::<Status>)
            .or_else(downcast_error::<PublicError>)
            .or_else(downcast_error::<WrappedError>)
            .or_else(downcast_error::<PanicError>)
            .or_else(downcast_error::<Exposed>)
            .unwrap_or_else(|payload| {
                if let Some(message) = payload.downcast_ref::<&'static str>() {
                    return Self::from_message(*message);
                }
                match payload.downcast::<String>() {
                    Ok(message) => Self::from_message(*message),
                    Err(_) => Self::from_message("Box<dyn Any>"),
                }
            })
    }

    /// Builds a panic error around an error value.
    #[inline]
    pub fn from_error<E: Into<BoxError>>(err: E) -> Self {
        Self { inner: Some(err.into()), message: String::new() }
    }

    /// Builds a panic error from a non-error payload.
    #[inline]
    pub fn from_message<S: Into<String>>(message: S) -> Self {
        Self { inner: None, message: message.into() }
    }

    /// Returns the recovered error, if the payload was one.
    #[inline]
    pub fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.inner.as_deref()
    }

    /// Returns the stringified payload. Empty when [`inner`](Self::inner) is set.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` for the zero value.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.inner.is_none() && self.message.is_empty()
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => write!(f, "panic: {inner}"),
            None => write!(f, "panic: {}", self.message),
        }
    }
}

impl std::error::Error for PanicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.inner {
            Some(inner) => Some(&**inner),
            None => None,
        }
    }
}

fn downcast_error<T>(
    payload: Box<dyn Any + Send + 'static>,
) -> Result<PanicError, Box<dyn Any + Send + 'static>>
where
    T: Into<BoxError> + 'static,
{
    payload.downcast::<T>().map(|err| PanicError::from_error(*err))
}

/// Two panic errors are equal when they hold the same inner error (by
/// address) and the same raw message.
impl PartialEq for PanicError {
    fn eq(&self, other: &Self) -> bool {
        let same_inner = match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => core::ptr::addr_eq(&**a, &**b),
            _ => false,
        };
        same_inner && self.message == other.message
    }
}
