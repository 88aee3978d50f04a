use core::fmt;

use http::StatusCode;

use crate::status::Status;
use crate::traits::Public;

/// A [`Status`] plus a message that is safe to show to the client.
///
/// This is the node the default error handler reads when it builds a response
/// body, so only put text here that you would print on a web page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicError {
    message: String,
    status: Status,
}

impl PublicError {
    /// Creates a public error.
    #[inline]
    pub fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self { message: message.into(), status: Status::new(status) }
    }

    /// Returns the embedded status.
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the public message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PublicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.status, f)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for PublicError {}

impl Public for PublicError {
    #[inline]
    fn public_message(&self) -> &str {
        &self.message
    }
}
