use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};
use status_rail::{
    catch_panic, default_error_handler, handler_fn, is_equivalent, panic_with, status_code,
    x_handler_fn, CatchPanic, Handler, HandlerResult, PanicError, PanicHook, ResponseSink, Status,
    WithErrorHandler, XHandler,
};

#[derive(Debug, PartialEq)]
struct SomeError;

impl fmt::Display for SomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SOME_ERROR")
    }
}

impl Error for SomeError {}

fn get_me_outta_here(sink: &mut dyn ResponseSink, _: &Request<()>) -> HandlerResult {
    sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    panic!("Get me outta here!")
}

fn fail(sink: &mut dyn ResponseSink, _: &Request<()>) -> HandlerResult {
    sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    panic_with(SomeError)
}

/// Renders with the default handler and keeps the error's text for inspection.
fn record_into(
    seen: Arc<Mutex<Option<String>>>,
    matched: Arc<Mutex<Vec<bool>>>,
) -> impl Fn(&mut dyn ResponseSink, &(dyn Error + 'static)) {
    move |sink: &mut dyn ResponseSink, err: &(dyn Error + 'static)| {
        *seen.lock().unwrap() = Some(err.to_string());
        matched.lock().unwrap().push(is_equivalent(err, &PanicError::SENTINEL));
        matched.lock().unwrap().push(is_equivalent(err, &SomeError));
        default_error_handler(sink, err);
    }
}

#[test]
fn catch_panic_passes_results_through() {
    assert!(catch_panic(|| Ok(())).is_ok());

    let err = catch_panic(|| Err(Box::new(Status::GONE))).unwrap_err();
    assert!(!is_equivalent(&*err, &PanicError::SENTINEL));
    assert!(is_equivalent(&*err, &Status::GONE));
}

#[test]
fn catch_panic_recovers_string_panics() {
    let err = catch_panic(|| panic!("boom")).unwrap_err();

    assert_eq!(err.to_string(), "panic: boom");
    assert!(is_equivalent(&*err, &PanicError::SENTINEL));
    assert_eq!(status_code(Some(&*err)), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn catch_panic_keeps_error_payloads() {
    let err = catch_panic(|| panic_with(SomeError)).unwrap_err();

    assert_eq!(err.to_string(), "panic: SOME_ERROR");
    assert!(is_equivalent(&*err, &PanicError::SENTINEL));
    assert!(is_equivalent(&*err, &SomeError));
}

#[test]
fn panicking_handler_renders_a_500() {
    let seen = Arc::new(Mutex::new(None));
    let matched = Arc::new(Mutex::new(Vec::new()));
    let handler = WithErrorHandler::new(
        CatchPanic::new(handler_fn(get_me_outta_here)),
        record_into(Arc::clone(&seen), Arc::clone(&matched)),
    );

    let mut response = Response::new(Vec::new());
    Handler::serve_http(&handler, &mut response, &Request::new(()));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body().as_slice(), b"500 Internal Server Error\n");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("panic: Get me outta here!"));
    assert_eq!(*matched.lock().unwrap(), vec![true, false]);
}

#[test]
fn panicking_handler_keeps_the_panicked_error() {
    let seen = Arc::new(Mutex::new(None));
    let matched = Arc::new(Mutex::new(Vec::new()));
    let handler = WithErrorHandler::new(
        CatchPanic::new(handler_fn(fail)),
        record_into(Arc::clone(&seen), Arc::clone(&matched)),
    );

    let mut response = Response::new(Vec::new());
    Handler::serve_http(&handler, &mut response, &Request::new(()));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body().as_slice(), b"500 Internal Server Error\n");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("panic: SOME_ERROR"));
    assert_eq!(*matched.lock().unwrap(), vec![true, true]);
}

#[test]
fn panic_with_status_keeps_the_status() {
    let handler = CatchPanic::new(handler_fn(|_: &mut dyn ResponseSink, _: &Request<()>| -> HandlerResult {
        panic_with(Status::SERVICE_UNAVAILABLE)
    }));

    let mut response = Response::new(Vec::new());
    Handler::serve_http(&handler, &mut response, &Request::new(()));
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn catch_panic_wraps_x_handlers() {
    let handler = CatchPanic::new(x_handler_fn(
        |_: &mut dyn ResponseSink, _: &Request<()>, attempt: u32| -> HandlerResult {
            if attempt > 2 {
                panic!("attempt {attempt}");
            }
            Ok(())
        },
    ));
    let mut response = Response::new(Vec::new());

    assert!(XHandler::serve(&handler, &mut response, &Request::new(()), 1).is_ok());

    let err = XHandler::serve(&handler, &mut response, &Request::new(()), 3).unwrap_err();
    assert_eq!(err.to_string(), "panic: attempt 3");
}

#[test]
fn panic_hook_fires_once_per_recovered_panic() {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let handler = CatchPanic::new(handler_fn(get_me_outta_here)).on_panic(move || {
        let _ = tx.lock().unwrap().send(());
    });

    let mut response = Response::new(Vec::new());
    assert!(Handler::serve(&handler, &mut response, &Request::new(())).is_err());

    rx.recv_timeout(Duration::from_secs(5)).expect("hook fired");
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
}

#[test]
fn panic_hook_is_not_fired_for_ordinary_errors() {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let handler = CatchPanic::new(handler_fn(|_: &mut dyn ResponseSink, _: &Request<()>| -> HandlerResult {
        Err(Box::new(Status::BAD_REQUEST))
    }))
    .on_panic(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut response = Response::new(Vec::new());
    assert!(Handler::serve(&handler, &mut response, &Request::new(())).is_err());

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn panic_hook_can_be_fired_directly() {
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let hook = PanicHook::new(move || {
        let _ = tx.lock().unwrap().send("shutdown");
    });

    hook.clone().fire();
    assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok("shutdown"));
    assert_eq!(format!("{hook:?}"), "PanicHook { .. }");
}
