//! Example: routing handler errors to a custom error handler
//!
//! The handler reports a missing parameter as a public `400`. A custom error
//! handler turns bad requests into a friendlier message and defers everything
//! else to the default renderer.
//!
//! Run with: `cargo run --example custom_error_handler`

use std::error::Error;

use http::header::CONTENT_TYPE;
use http::{HeaderValue, Request, Response, StatusCode};
use status_rail::{
    catch_panic, default_error_handler, handler_fn, is_equivalent, public_error, public_message,
    status_code, write_response, Handler, HandlerResult, ResponseSink, Status, WithErrorHandler,
};

// =============================================================================
// Handlers
// =============================================================================

fn hello(sink: &mut dyn ResponseSink, request: &Request<()>) -> HandlerResult {
    sink.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

    let Some(name) = request.uri().query().and_then(|q| q.strip_prefix("name=")) else {
        return Err(public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter"));
    };

    sink.write_body(format!("Hello, {name}\n").as_bytes())?;
    Ok(())
}

fn custom_error_handler(sink: &mut dyn ResponseSink, err: &(dyn Error + 'static)) {
    if !is_equivalent(err, &Status::BAD_REQUEST) {
        default_error_handler(sink, err);
        return;
    }

    let status = status_code(Some(err));
    sink.set_status(status);
    let message = format!("Sorry, we couldn't parse your request: {}", public_message(Some(err)));
    if let Err(write_err) = write_response(sink, status.as_u16(), message.as_bytes()) {
        eprintln!("failed to write error response: {write_err}");
    }
}

// =============================================================================
// Driver
// =============================================================================

fn serve<H: Handler<()>>(handler: &H, uri: &str) {
    let request = match Request::builder().uri(uri).body(()) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("bad request URI {uri}: {err}");
            return;
        },
    };

    let mut response = Response::new(Vec::new());
    handler.serve_http(&mut response, &request);
    print!("GET {uri} -> {}\n{}", response.status(), String::from_utf8_lossy(response.body()));
}

fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("=== Default error handler ===\n");
    let plain = handler_fn(hello);
    serve(&plain, "/?name=Sunshine");
    serve(&plain, "/");

    println!("\n=== Custom error handler ===\n");
    let friendly = WithErrorHandler::new(handler_fn(hello), custom_error_handler);
    serve(&friendly, "/?name=Sunshine");
    serve(&friendly, "/");

    println!("\n=== Recovering panics ===\n");
    if let Err(err) = catch_panic(|| panic!("Get me outta here!")) {
        println!("recovered: {err} (status {})", status_code(Some(&*err)));
    }
}
