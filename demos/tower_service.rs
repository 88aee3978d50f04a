//! Example: serving handlers through Tower
//!
//! A `HandlerService` runs the handler, `CatchPanicLayer` recovers panics and
//! `ErrorResponseLayer` renders whatever error comes out as a JSON body.
//!
//! # Requirements
//!
//! Run with: `cargo run --example tower_service --features tower`

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, StatusCode};
use status_rail::tower::{CatchPanicLayer, ErrorResponseLayer, HandlerService};
use status_rail::{handler_fn, public_error, wrap, HandlerResult, ResponseSink};
use tower::{Layer, ServiceExt};

// =============================================================================
// Handlers
// =============================================================================

fn users(sink: &mut dyn ResponseSink, request: &Request<()>) -> HandlerResult {
    sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    match request.uri().path() {
        "/users/1" => {
            sink.write_body(b"{\"id\":1,\"name\":\"Alice\"}\n")?;
            Ok(())
        },
        "/users/2" => Err(wrap("replica lag exceeded 30s", StatusCode::SERVICE_UNAVAILABLE)),
        "/users/boom" => panic!("index out of bounds: the len is 0 but the index is 0"),
        path => Err(public_error(StatusCode::NOT_FOUND, format!("no user at {path}"))),
    }
}

// =============================================================================
// Service stack
// =============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let shutting_down = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutting_down);

    let catch_panic = CatchPanicLayer::new().on_panic(move || {
        flag.store(true, Ordering::SeqCst);
    });
    let render = ErrorResponseLayer::new()
        .with_content_type(HeaderValue::from_static("application/json"));
    let service = render.layer(catch_panic.layer(HandlerService::new(handler_fn(users))));

    for path in ["/users/1", "/users/2", "/users/3", "/users/boom"] {
        let request = match Request::builder().uri(path).body(()) {
            Ok(request) => request,
            Err(err) => {
                eprintln!("bad request URI {path}: {err}");
                continue;
            },
        };

        match service.clone().oneshot(request).await {
            Ok(response) => {
                print!("GET {path} -> {}\n{}", response.status(), String::from_utf8_lossy(response.body()));
            },
            Err(err) => eprintln!("GET {path} failed before rendering: {err}"),
        }
    }

    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    println!("\nshutdown requested: {}", shutting_down.load(Ordering::SeqCst));
}
