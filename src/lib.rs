//! Return errors from HTTP handlers instead of rendering them inline.
//!
//! A handler signals failure with an ordinary `Err` carrying a status, a
//! private diagnostic and, optionally, a message that is safe to show to the
//! client. The response is written afterwards, in one place, by an error
//! handler that only ever reveals the status and the public message.
//!
//! Everything public is re-exported at the crate root. The
//! [`prelude`] covers the common handler-writing case in one import.
//!
//! # Examples
//!
//! ## Classifying errors
//!
//! ```
//! use http::StatusCode;
//! use status_rail::{is_equivalent, public_message, status_code, wrap, Status};
//!
//! let err = wrap("row 7 violates users_email_key", StatusCode::CONFLICT);
//!
//! assert_eq!(status_code(Some(&*err)), StatusCode::CONFLICT);
//! assert!(is_equivalent(&*err, &Status::CONFLICT));
//! // The cause is for logs only.
//! assert_eq!(public_message(Some(&*err)), "");
//! ```
//!
//! ## Rendering a handler's error
//!
//! ```
//! use http::{Request, Response, StatusCode};
//! use status_rail::{handler_fn, public_error, Handler, HandlerResult, ResponseSink};
//!
//! let handler = handler_fn(|_: &mut dyn ResponseSink, _: &Request<()>| -> HandlerResult {
//!     Err(public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter"))
//! });
//!
//! let mut response = Response::new(Vec::new());
//! handler.serve_http(&mut response, &Request::new(()));
//!
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! let body = String::from_utf8(response.into_body()).unwrap();
//! assert!(body.contains("<title>Error 400</title>"));
//! assert!(body.contains("<body>Bad Request: missing 'name' parameter</body>"));
//! ```
//!
//! ## Recovering panics
//!
//! ```
//! use status_rail::{catch_panic, is_equivalent, PanicError};
//!
//! let err = catch_panic(|| panic!("boom")).unwrap_err();
//!
//! assert_eq!(err.to_string(), "panic: boom");
//! assert!(is_equivalent(&*err, &PanicError::SENTINEL));
//! ```

/// Wrap-chain traversal and capability extraction
pub mod chain;
/// Constructors producing boxed errors
pub mod convert;
/// Error handler contract and the request handler adapters
pub mod handler;
/// Formatting macros for the constructors
pub mod macros;
/// Panic recovery
pub mod panic;
/// Convenience re-exports for quick starts
pub mod prelude;
/// The default error response renderer
pub mod response;
/// Status values and predefined constants
pub mod status;
/// Capability and extension traits
pub mod traits;
/// Error node types
pub mod types;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use chain::{chain, is_equivalent, public_message, status_code, Chain};
pub use convert::{panic_with, public_error, status_error, wrap};
pub use handler::{
    handler_fn, x_handler_fn, Handler, HandlerFn, WithErrorHandler, XHandler, XHandlerFn,
};
pub use panic::{catch_panic, CatchPanic, PanicHook};
pub use response::{default_error_handler, write_response, ErrorHandlerFn, ResponseSink};
pub use status::{status_text, InvalidStatus, Status};
pub use traits::{Public, ResultExt};
pub use types::{
    expose, BoxError, Exposed, HandlerResult, PanicError, PublicError, WrappedError,
};
