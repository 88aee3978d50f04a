//! Handlers that return errors.
//!
//! A [`Handler`] writes its successful response into a [`ResponseSink`] and
//! reports failure by returning an error. [`Handler::serve_http`] adapts it to
//! the ordinary "write the response and return nothing" contract by passing
//! any error to [`default_error_handler`]; [`WithErrorHandler`] routes errors
//! somewhere else.
//!
//! [`XHandler`] is the same contract with a third, caller-defined parameter
//! (route parameters, an authenticated user, …). It is threaded through as-is.
//!
//! # Examples
//!
//! ```
//! use http::header::CONTENT_TYPE;
//! use http::{HeaderValue, Request, Response, StatusCode};
//! use status_rail::{handler_fn, public_error, Handler, HandlerResult, ResponseSink};
//!
//! fn hello(sink: &mut dyn ResponseSink, request: &Request<()>) -> HandlerResult {
//!     sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
//!     let Some(name) = request.uri().query().and_then(|q| q.strip_prefix("name=")) else {
//!         return Err(public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter"));
//!     };
//!     sink.write_body(format!("Hello, {name}\n").as_bytes())?;
//!     Ok(())
//! }
//!
//! let handler = handler_fn(hello);
//! let mut response = Response::new(Vec::new());
//! handler.serve_http(&mut response, &Request::new(()));
//!
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! assert_eq!(response.body().as_slice(), b"400 Bad Request: missing 'name' parameter\n");
//! ```

use std::error::Error;

use http::Request;

use crate::response::{default_error_handler, ResponseSink};
use crate::types::HandlerResult;

/// A request handler that returns its error instead of rendering it.
pub trait Handler<B> {
    /// Handles `request`, returning any failure to the caller.
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>) -> HandlerResult;

    /// Handles `request`, rendering any failure with [`default_error_handler`].
    fn serve_http(&self, sink: &mut dyn ResponseSink, request: &Request<B>) {
        if let Err(err) = self.serve(sink, request) {
            default_error_handler(sink, &*err);
        }
    }
}

/// A request handler with an extra, caller-supplied parameter.
pub trait XHandler<B, P> {
    /// Handles `request` with `params`, returning any failure to the caller.
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>, params: P) -> HandlerResult;

    /// Handles `request` with `P::default()`, rendering any failure with
    /// [`default_error_handler`].
    fn serve_http(&self, sink: &mut dyn ResponseSink, request: &Request<B>)
    where
        P: Default,
    {
        if let Err(err) = self.serve(sink, request, P::default()) {
            default_error_handler(sink, &*err);
        }
    }
}

/// A [`Handler`] backed by a function. Created by [`handler_fn`].
#[derive(Clone, Copy, Debug)]
pub struct HandlerFn<F> {
    f: F,
}

/// Turns a function or closure into a [`Handler`].
#[inline]
pub fn handler_fn<B, F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut dyn ResponseSink, &Request<B>) -> HandlerResult,
{
    HandlerFn { f }
}

impl<B, F> Handler<B> for HandlerFn<F>
where
    F: Fn(&mut dyn ResponseSink, &Request<B>) -> HandlerResult,
{
    #[inline]
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>) -> HandlerResult {
        (self.f)(sink, request)
    }
}

/// An [`XHandler`] backed by a function. Created by [`x_handler_fn`].
#[derive(Clone, Copy, Debug)]
pub struct XHandlerFn<F> {
    f: F,
}

/// Turns a function or closure taking an extra parameter into an [`XHandler`].
#[inline]
pub fn x_handler_fn<B, P, F>(f: F) -> XHandlerFn<F>
where
    F: Fn(&mut dyn ResponseSink, &Request<B>, P) -> HandlerResult,
{
    XHandlerFn { f }
}

impl<B, P, F> XHandler<B, P> for XHandlerFn<F>
where
    F: Fn(&mut dyn ResponseSink, &Request<B>, P) -> HandlerResult,
{
    #[inline]
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>, params: P) -> HandlerResult {
        (self.f)(sink, request, params)
    }
}

/// A handler whose failures go to a custom error handler.
///
/// `serve` still returns the error, so outer middleware can observe it;
/// `serve_http` hands it to `on_error` instead of [`default_error_handler`].
///
/// ```
/// use http::{Request, Response, StatusCode};
/// use status_rail::{
///     handler_fn, is_equivalent, public_message, status_code, write_response, Handler,
///     HandlerResult, ResponseSink, Status, WithErrorHandler,
/// };
///
/// fn apologize(sink: &mut dyn ResponseSink, err: &(dyn std::error::Error + 'static)) {
///     let status = status_code(Some(err));
///     sink.set_status(status);
///     let message = if is_equivalent(err, &Status::BAD_REQUEST) {
///         format!("Sorry, we couldn't parse your request: {}", public_message(Some(err)))
///     } else {
///         status.canonical_reason().unwrap_or_default().to_owned()
///     };
///     let _ = write_response(sink, status.as_u16(), message.as_bytes());
/// }
///
/// let handler = WithErrorHandler::new(
///     handler_fn(|_: &mut dyn ResponseSink, _: &Request<()>| -> HandlerResult {
///         Err(status_rail::public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter"))
///     }),
///     apologize,
/// );
///
/// let mut response = Response::new(Vec::new());
/// handler.serve_http(&mut response, &Request::new(()));
/// assert!(String::from_utf8_lossy(response.body()).contains("Sorry, we couldn't parse"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct WithErrorHandler<H, E> {
    inner: H,
    on_error: E,
}

impl<H, E> WithErrorHandler<H, E>
where
    E: Fn(&mut dyn ResponseSink, &(dyn Error + 'static)),
{
    /// Pairs `inner` with the error handler `on_error`.
    #[inline]
    pub fn new(inner: H, on_error: E) -> Self {
        Self { inner, on_error }
    }

    /// Returns a reference to the wrapped handler.
    #[inline]
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Handles `request` with the extra parameter `params`, sending any
    /// failure to the error handler.
    pub fn serve_http_with<B, P>(&self, sink: &mut dyn ResponseSink, request: &Request<B>, params: P)
    where
        H: XHandler<B, P>,
    {
        if let Err(err) = self.inner.serve(sink, request, params) {
            (self.on_error)(sink, &*err);
        }
    }
}

impl<B, H, E> Handler<B> for WithErrorHandler<H, E>
where
    H: Handler<B>,
    E: Fn(&mut dyn ResponseSink, &(dyn Error + 'static)),
{
    #[inline]
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>) -> HandlerResult {
        self.inner.serve(sink, request)
    }

    fn serve_http(&self, sink: &mut dyn ResponseSink, request: &Request<B>) {
        if let Err(err) = self.inner.serve(sink, request) {
            (self.on_error)(sink, &*err);
        }
    }
}
