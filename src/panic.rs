//! Recovering panics as errors.
//!
//! [`catch_panic`] runs a closure and turns a panic into a
//! [`PanicError`] returned through the normal error path. [`CatchPanic`] does
//! the same around a [`Handler`] or [`XHandler`].
//!
//! A recovered panic can also trigger a [`PanicHook`], typically to start an
//! orderly shutdown. The hook runs on its own thread and is never joined, so a
//! shutdown routine that waits for in-flight requests cannot deadlock against
//! the request that panicked.
//!
//! # Examples
//!
//! ```
//! use http::header::CONTENT_TYPE;
//! use http::{HeaderValue, Request, Response, StatusCode};
//! use status_rail::{handler_fn, CatchPanic, Handler, HandlerResult, ResponseSink};
//!
//! let handler = CatchPanic::new(handler_fn(
//!     |sink: &mut dyn ResponseSink, _: &Request<()>| -> HandlerResult {
//!         sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
//!         panic!("Get me outta here!")
//!     },
//! ));
//!
//! let mut response = Response::new(Vec::new());
//! handler.serve_http(&mut response, &Request::new(()));
//!
//! assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
//! assert_eq!(response.body().as_slice(), b"500 Internal Server Error\n");
//! ```

use core::any::Any;
use core::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use http::Request;

use crate::handler::{Handler, XHandler};
use crate::response::ResponseSink;
use crate::types::{BoxError, HandlerResult, PanicError};

/// Runs `f`, converting a panic into an `Err` holding a [`PanicError`].
///
/// The default panic hook still runs, so the panic message is printed as
/// usual before it is recovered.
pub fn catch_panic<F>(f: F) -> HandlerResult
where
    F: FnOnce() -> HandlerResult,
{
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| Err(recover(payload, None)))
}

/// Converts a caught panic payload into a boxed [`PanicError`], firing `hook`
/// if one is given.
pub(crate) fn recover(payload: Box<dyn Any + Send + 'static>, hook: Option<&PanicHook>) -> BoxError {
    let err = PanicError::from_payload(payload);
    tracing::error!(error = %err, "recovered from panic in handler");
    if let Some(hook) = hook {
        hook.fire();
    }
    Box::new(err)
}

/// Side effect fired after a panic has been recovered.
///
/// Cloning is cheap; every clone fires the same callback.
#[derive(Clone)]
pub struct PanicHook {
    callback: Arc<dyn Fn() + Send + Sync + 'static>,
}

impl PanicHook {
    /// Creates a hook from `callback`.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self { callback: Arc::new(callback) }
    }

    /// Fires the callback on a new thread and returns immediately.
    pub fn fire(&self) {
        let callback = Arc::clone(&self.callback);
        let spawned = thread::Builder::new()
            .name("status-rail-panic-hook".into())
            .spawn(move || callback());
        if let Err(err) = spawned {
            tracing::warn!(error = %err, "failed to spawn panic hook thread");
        }
    }
}

impl fmt::Debug for PanicHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanicHook").finish_non_exhaustive()
    }
}

/// Decorates a handler so that panics come back as [`PanicError`] values.
///
/// Works for both [`Handler`] and [`XHandler`]. Recovered errors are
/// equivalent to [`PanicError::SENTINEL`] under
/// [`is_equivalent`](crate::is_equivalent).
#[derive(Clone, Debug)]
pub struct CatchPanic<H> {
    inner: H,
    on_panic: Option<PanicHook>,
}

impl<H> CatchPanic<H> {
    /// Wraps `inner` without a hook.
    #[inline]
    pub fn new(inner: H) -> Self {
        Self { inner, on_panic: None }
    }

    /// Sets the callback fired (asynchronously) after each recovered panic.
    #[must_use]
    pub fn on_panic<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_panic = Some(PanicHook::new(callback));
        self
    }

    /// Returns a reference to the wrapped handler.
    #[inline]
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Consumes the decorator, returning the wrapped handler.
    #[inline]
    pub fn into_inner(self) -> H {
        self.inner
    }

    fn guard<F>(&self, f: F) -> HandlerResult
    where
        F: FnOnce() -> HandlerResult,
    {
        panic::catch_unwind(AssertUnwindSafe(f))
            .unwrap_or_else(|payload| Err(recover(payload, self.on_panic.as_ref())))
    }
}

impl<B, H> Handler<B> for CatchPanic<H>
where
    H: Handler<B>,
{
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>) -> HandlerResult {
        self.guard(|| self.inner.serve(sink, request))
    }
}

impl<B, P, H> XHandler<B, P> for CatchPanic<H>
where
    H: XHandler<B, P>,
{
    fn serve(&self, sink: &mut dyn ResponseSink, request: &Request<B>, params: P) -> HandlerResult {
        self.guard(|| self.inner.serve(sink, request, params))
    }
}
