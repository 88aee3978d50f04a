use core::fmt;

use crate::traits::Public;
use crate::types::BoxError;

/// Carries a caller-defined error that opts into the public-message capability.
///
/// The status capability is closed to this crate's own node types, but any
/// type can expose a public message by implementing [`Public`] and passing
/// through [`expose`]. The message is captured once, when the node is built.
/// The original error stays reachable as the [`source`](std::error::Error::source).
///
/// ```
/// use status_rail::{expose, public_message, Public};
///
/// #[derive(Debug)]
/// struct QuotaExceeded { limit: u32, detail: String }
///
/// impl std::fmt::Display for QuotaExceeded {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "quota {} exceeded: {}", self.limit, self.detail)
///     }
/// }
///
/// impl std::error::Error for QuotaExceeded {}
///
/// impl Public for QuotaExceeded {
///     fn public_message(&self) -> &str {
///         "quota exceeded"
///     }
/// }
///
/// let err = expose(QuotaExceeded { limit: 10, detail: "tenant 7, shard 3".into() });
/// assert_eq!(public_message(Some(&err)), "quota exceeded");
/// ```
#[derive(Debug)]
pub struct Exposed {
    message: String,
    inner: BoxError,
}

impl Exposed {
    /// Returns the captured public message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the exposed error.
    #[inline]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.inner
    }
}

/// Wraps `err` so that [`public_message`](crate::public_message) can find it.
pub fn expose<E>(err: E) -> Exposed
where
    E: Public + std::error::Error + Send + Sync + 'static,
{
    Exposed { message: err.public_message().to_owned(), inner: Box::new(err) }
}

impl fmt::Display for Exposed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl std::error::Error for Exposed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}
