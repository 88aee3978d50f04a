//! Tower integration for status-rail.
//!
//! This module adapts the handler contract to Tower's [`Service`]:
//!
//! - [`HandlerService`] runs a [`Handler`] as a service. A failure comes back
//!   as a [`HandlerFailure`] holding the handler's error and the headers it had
//!   already declared.
//! - [`ErrorResponseLayer`] renders service errors into a
//!   `Response<Vec<u8>>` with [`default_error_handler`] (or a custom handler).
//! - [`CatchPanicLayer`] recovers panics raised by `call` or while polling the
//!   response future, returning them as [`PanicError`](crate::PanicError).
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! status-rail = { version = "0.3", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use status_rail::tower::{CatchPanicLayer, ErrorResponseLayer, HandlerService};
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(ErrorResponseLayer::new())
//!     .layer(CatchPanicLayer::new())
//!     .service(HandlerService::new(handler_fn(hello)));
//! ```

use core::fmt;
use core::future::{ready, Future, Ready};
use core::pin::Pin;
use std::error::Error;
use core::task::{Context, Poll};
use std::panic::{self, AssertUnwindSafe};

use futures_core::future::FusedFuture;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::handler::Handler;
use crate::panic::{recover, PanicHook};
use crate::response::{default_error_handler, ErrorHandlerFn};
use crate::types::BoxError;

/// A Tower [`Service`] that runs a [`Handler`].
///
/// The handler writes into a fresh `Response<Vec<u8>>`. Its error is returned
/// unrendered, boxed in a [`HandlerFailure`], so an [`ErrorResponseLayer`] (or
/// any other layer) decides how to present it in the format the handler chose.
#[derive(Clone, Debug)]
pub struct HandlerService<H> {
    handler: H,
}

impl<H> HandlerService<H> {
    /// Wraps `handler` as a service.
    #[inline]
    pub const fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Returns a reference to the handler.
    #[inline]
    pub const fn handler(&self) -> &H {
        &self.handler
    }
}

impl<H, B> Service<Request<B>> for HandlerService<H>
where
    H: Handler<B>,
{
    type Response = Response<Vec<u8>>;
    type Error = BoxError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    #[inline]
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let mut response = Response::new(Vec::new());
        let result = match self.handler.serve(&mut response, &request) {
            Ok(()) => Ok(response),
            Err(error) => {
                let (parts, _) = response.into_parts();
                Err(Box::new(HandlerFailure { headers: parts.headers, error }) as BoxError)
            },
        };
        ready(result)
    }
}

/// A handler error plus the response headers declared before it failed.
///
/// [`ErrorResponseLayer`] renders from these headers, so a handler that set
/// `Content-Type: application/json` gets a JSON error body. The error itself is
/// the [`source`](Error::source), so [`status_code`](crate::status_code) and
/// [`public_message`](crate::public_message) see through the failure.
#[derive(Debug)]
pub struct HandlerFailure {
    headers: HeaderMap,
    error: BoxError,
}

impl HandlerFailure {
    /// Returns the headers the handler had declared.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the handler's error.
    #[inline]
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Splits the failure into its headers and error.
    #[inline]
    pub fn into_parts(self) -> (HeaderMap, BoxError) {
        (self.headers, self.error)
    }
}

impl fmt::Display for HandlerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler failed: {}", self.error)
    }
}

impl Error for HandlerFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.error)
    }
}

/// A Tower [`Layer`] that renders service errors into responses.
///
/// By default errors are rendered with [`default_error_handler`]. A
/// [`HandlerFailure`] is rendered on top of the headers its handler declared.
/// When no `Content-Type` was declared, the one set with
/// [`with_content_type`](Self::with_content_type) is used, and without either
/// the body is HTML.
///
/// # Example
///
/// ```rust,ignore
/// use http::HeaderValue;
/// use status_rail::tower::ErrorResponseLayer;
///
/// let layer = ErrorResponseLayer::new()
///     .with_content_type(HeaderValue::from_static("application/json"));
/// ```
#[derive(Clone, Debug)]
pub struct ErrorResponseLayer {
    config: RenderConfig,
}

#[derive(Clone, Debug)]
struct RenderConfig {
    content_type: Option<HeaderValue>,
    handler: ErrorHandlerFn,
}

impl RenderConfig {
    fn render(&self, err: BoxError) -> Response<Vec<u8>> {
        let (headers, err) = match err.downcast::<HandlerFailure>() {
            Ok(failure) => failure.into_parts(),
            Err(err) => (HeaderMap::new(), err),
        };

        let mut response = Response::new(Vec::new());
        *response.headers_mut() = headers;
        if let Some(content_type) = &self.content_type {
            response.headers_mut().entry(CONTENT_TYPE).or_insert_with(|| content_type.clone());
        }
        (self.handler)(&mut response, &*err);
        response
    }
}

impl ErrorResponseLayer {
    /// Creates a layer that renders with [`default_error_handler`].
    #[inline]
    pub fn new() -> Self {
        Self { config: RenderConfig { content_type: None, handler: default_error_handler } }
    }

    /// Declares `content_type` on error responses whose handler did not
    /// declare one.
    #[must_use]
    pub fn with_content_type(mut self, content_type: HeaderValue) -> Self {
        self.config.content_type = Some(content_type);
        self
    }

    /// Renders errors with `handler` instead of [`default_error_handler`].
    #[must_use]
    pub fn with_handler(mut self, handler: ErrorHandlerFn) -> Self {
        self.config.handler = handler;
        self
    }
}

impl Default for ErrorResponseLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for ErrorResponseLayer {
    type Service = ErrorResponseService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        ErrorResponseService { inner, config: self.config.clone() }
    }
}

/// A Tower [`Service`] that turns errors into rendered responses.
///
/// Created by [`ErrorResponseLayer`]. Errors from `poll_ready` cannot be
/// rendered and are passed through as [`BoxError`].
#[derive(Clone, Debug)]
pub struct ErrorResponseService<S> {
    inner: S,
    config: RenderConfig,
}

impl<S> ErrorResponseService<S> {
    /// Returns a reference to the inner service.
    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the inner service.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, B> Service<Request<B>> for ErrorResponseService<S>
where
    S: Service<Request<B>, Response = Response<Vec<u8>>>,
    S::Error: Into<BoxError>,
{
    type Response = Response<Vec<u8>>;
    type Error = BoxError;
    type Future = ErrorResponseFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    #[inline]
    fn call(&mut self, request: Request<B>) -> Self::Future {
        ErrorResponseFuture { inner: self.inner.call(request), config: Some(self.config.clone()) }
    }
}

pin_project! {
    /// Future returned by [`ErrorResponseService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct ErrorResponseFuture<F> {
        #[pin]
        inner: F,
        config: Option<RenderConfig>,
    }
}

impl<F, E> Future for ErrorResponseFuture<F>
where
    F: Future<Output = Result<Response<Vec<u8>>, E>>,
    E: Into<BoxError>,
{
    type Output = Result<Response<Vec<u8>>, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match this.inner.poll(cx) {
            Poll::Ready(Ok(response)) => {
                this.config.take();
                Poll::Ready(Ok(response))
            },
            Poll::Ready(Err(error)) => {
                let config = this.config.take().expect("polled after completion");
                Poll::Ready(Ok(config.render(error.into())))
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<F, E> FusedFuture for ErrorResponseFuture<F>
where
    F: FusedFuture<Output = Result<Response<Vec<u8>>, E>>,
    E: Into<BoxError>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.config.is_none() || self.inner.is_terminated()
    }
}

/// A Tower [`Layer`] that recovers panics as [`PanicError`](crate::PanicError) values.
#[derive(Clone, Debug, Default)]
pub struct CatchPanicLayer {
    on_panic: Option<PanicHook>,
}

impl CatchPanicLayer {
    /// Creates a layer without a panic hook.
    #[inline]
    pub fn new() -> Self {
        Self { on_panic: None }
    }

    /// Sets the callback fired (on its own thread) after each recovered panic.
    #[must_use]
    pub fn on_panic<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_panic = Some(PanicHook::new(callback));
        self
    }
}

impl<S> Layer<S> for CatchPanicLayer {
    type Service = CatchPanicService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        CatchPanicService { inner, on_panic: self.on_panic.clone() }
    }
}

/// A Tower [`Service`] that recovers panics. Created by [`CatchPanicLayer`].
#[derive(Clone, Debug)]
pub struct CatchPanicService<S> {
    inner: S,
    on_panic: Option<PanicHook>,
}

impl<S> CatchPanicService<S> {
    /// Returns a reference to the inner service.
    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, Req> Service<Req> for CatchPanicService<S>
where
    S: Service<Req>,
    S::Error: Into<BoxError>,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = CatchPanicFuture<S::Future>;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, request: Req) -> Self::Future {
        let on_panic = self.on_panic.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| self.inner.call(request))) {
            Ok(future) => CatchPanicFuture { inner: Some(future), panicked: None, on_panic },
            Err(payload) => CatchPanicFuture {
                inner: None,
                panicked: Some(recover(payload, on_panic.as_ref())),
                on_panic,
            },
        }
    }
}

pin_project! {
    /// Future returned by [`CatchPanicService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct CatchPanicFuture<F> {
        #[pin]
        inner: Option<F>,
        panicked: Option<BoxError>,
        on_panic: Option<PanicHook>,
    }
}

impl<F, T, E> Future for CatchPanicFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        if let Some(err) = this.panicked.take() {
            return Poll::Ready(Err(err));
        }

        let Some(inner) = this.inner.as_mut().as_pin_mut() else {
            panic!("CatchPanicFuture polled after completion");
        };

        match panic::catch_unwind(AssertUnwindSafe(|| inner.poll(cx))) {
            Ok(Poll::Ready(result)) => {
                this.inner.set(None);
                Poll::Ready(result.map_err(Into::into))
            },
            Ok(Poll::Pending) => Poll::Pending,
            Err(payload) => {
                this.inner.set(None);
                Poll::Ready(Err(recover(payload, this.on_panic.as_ref())))
            },
        }
    }
}

impl<F, T, E> FusedFuture for CatchPanicFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.inner.is_none() && self.panicked.is_none()
    }
}
