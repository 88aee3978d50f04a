use std::io;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Response, StatusCode};
use status_rail::{
    default_error_handler, public_error, wrap, write_response, BoxError, ResponseSink, Status,
};

const HTML_404: &str = "<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">\
<title>Error 404</title></head><body>Not Found</body></html>\n";

fn response_with(content_type: &'static str) -> Response<Vec<u8>> {
    let mut response = Response::new(Vec::new());
    response.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn body(response: &Response<Vec<u8>>) -> &str {
    std::str::from_utf8(response.body()).expect("utf-8 body")
}

#[test]
fn json_body_carries_message_and_code() {
    let mut response = response_with("application/json");
    write_response(&mut response, 400, b"missing 'name' parameter").unwrap();

    assert_eq!(
        body(&response),
        "{\"status\":\"error\",\"message\":\"missing 'name' parameter\",\"code\":400}\n"
    );
}

#[test]
fn json_body_omits_empty_message() {
    let mut response = response_with("application/json");
    write_response(&mut response, 500, b"").unwrap();

    assert_eq!(body(&response), "{\"status\":\"error\",\"code\":500}\n");
}

#[test]
fn media_type_parameters_and_case_are_ignored() {
    let mut response = response_with("Application/JSON; charset=utf-8");
    write_response(&mut response, 409, b"taken").unwrap();

    assert_eq!(body(&response), "{\"status\":\"error\",\"message\":\"taken\",\"code\":409}\n");
}

#[test]
fn json_message_is_escaped() {
    let mut response = response_with("application/json");
    write_response(&mut response, 400, b"bad \"quote\"").unwrap();

    let parsed: serde_json::Value = serde_json::from_str(body(&response)).unwrap();
    assert_eq!(parsed["message"], "bad \"quote\"");
    assert_eq!(parsed["code"], 400);
}

#[test]
fn plain_text_body_is_status_and_message() {
    for content_type in ["text/plain", "text", "text/plain; charset=utf-8"] {
        let mut response = response_with(content_type);
        write_response(&mut response, 429, b"Too Many Requests").unwrap();
        assert_eq!(body(&response), "429 Too Many Requests\n", "content type {content_type}");
    }
}

#[test]
fn html_is_the_fallback() {
    let mut bare = Response::new(Vec::new());
    write_response(&mut bare, 404, b"Not Found").unwrap();
    assert_eq!(body(&bare), HTML_404);

    let mut xml = response_with("application/xml");
    write_response(&mut xml, 404, b"Not Found").unwrap();
    assert_eq!(body(&xml), HTML_404);
}

#[test]
fn default_handler_sets_status_and_appends_public_message() {
    let mut response = response_with("text/plain");
    let err = public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter");
    default_error_handler(&mut response, &*err);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(&response), "400 Bad Request: missing 'name' parameter\n");
}

#[test]
fn default_handler_never_leaks_private_causes() {
    let mut response = response_with("text/plain");
    let err = wrap("select * from users failed: disk full", StatusCode::SERVICE_UNAVAILABLE);
    default_error_handler(&mut response, &*err);

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body(&response), "503 Service Unavailable\n");
}

#[test]
fn default_handler_treats_unclassified_errors_as_500() {
    let mut response = response_with("application/json");
    let err: BoxError = "connection reset".into();
    default_error_handler(&mut response, &*err);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body(&response),
        "{\"status\":\"error\",\"message\":\"Internal Server Error\",\"code\":500}\n"
    );
}

#[test]
fn default_handler_renders_bare_status_as_html() {
    let mut response = Response::new(Vec::new());
    default_error_handler(&mut response, &Status::NOT_FOUND);

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body(&response), HTML_404);
}

/// A sink whose connection has already gone away.
#[derive(Default)]
struct ClosedSink {
    headers: HeaderMap,
    status: Option<StatusCode>,
}

impl ResponseSink for ClosedSink {
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    fn write_body(&mut self, _bytes: &[u8]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away"))
    }
}

#[test]
fn write_failures_are_logged_not_propagated() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut sink = ClosedSink::default();
    let err = write_response(&mut sink, 500, b"").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

    default_error_handler(&mut sink, &Status::GATEWAY_TIMEOUT);
    assert_eq!(sink.status, Some(StatusCode::GATEWAY_TIMEOUT));
}

#[test]
fn default_handler_without_content_type_renders_html() {
    let mut response = Response::new(Vec::new());
    let err = public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter");
    default_error_handler(&mut response, &*err);

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body(&response),
        "<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">\
<title>Error 400</title></head><body>Bad Request: missing 'name' parameter</body></html>\n"
    );
}
