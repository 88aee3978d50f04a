//! The default error response.
//!
//! The body format is negotiated from the `Content-Type` the handler already
//! put on the response, not from the request's `Accept` header: by the time an
//! error is rendered the handler may have committed to a format.
//!
//! | Declared media type | Body |
//! |---------------------|------|
//! | `application/json` | `{"status":"error","message":"…","code":400}` |
//! | `text/plain`, `text` | `400 …` |
//! | anything else, or unset | a minimal HTML page |
//!
//! Every body ends with a newline.
//!
//! # Examples
//!
//! ```
//! use http::header::CONTENT_TYPE;
//! use http::{HeaderValue, Response, StatusCode};
//! use status_rail::{default_error_handler, public_error};
//!
//! let mut response = Response::new(Vec::new());
//! response
//!     .headers_mut()
//!     .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
//!
//! let err = public_error(StatusCode::BAD_REQUEST, "missing 'name' parameter");
//! default_error_handler(&mut response, &*err);
//!
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! assert_eq!(
//!     response.body().as_slice(),
//!     b"{\"status\":\"error\",\"message\":\"Bad Request: missing 'name' parameter\",\"code\":400}\n"
//! );
//! ```

use std::error::Error;
use std::io;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, Response, StatusCode};
use serde::Serialize;

use crate::chain::{public_message, status_code};
use crate::status::status_text;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_TEXT_PLAIN: &str = "text/plain";
const CONTENT_TYPE_TEXT: &str = "text";

/// The response being written by a handler.
///
/// Object safe, so handlers take `&mut dyn ResponseSink` and work with any
/// server that can provide one. Implemented for `http::Response<Vec<u8>>`.
pub trait ResponseSink {
    /// Headers set so far.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status.
    fn set_status(&mut self, status: StatusCode);

    /// Appends `bytes` to the body.
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl ResponseSink for Response<Vec<u8>> {
    #[inline]
    fn headers(&self) -> &HeaderMap {
        Response::headers(self)
    }

    #[inline]
    fn headers_mut(&mut self) -> &mut HeaderMap {
        Response::headers_mut(self)
    }

    #[inline]
    fn set_status(&mut self, status: StatusCode) {
        *self.status_mut() = status;
    }

    #[inline]
    fn write_body(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.body_mut().extend_from_slice(bytes);
        Ok(())
    }
}

/// Signature of a function that writes the response for a failed request.
pub type ErrorHandlerFn = fn(&mut dyn ResponseSink, &(dyn Error + 'static));

/// Writes a response for `err`.
///
/// The status comes from [`status_code`] (500 for unclassified errors). The
/// body is the status text, followed by `": <public message>"` when the chain
/// holds a public message. Diagnostic text from wrapped causes is never
/// written.
pub fn default_error_handler(sink: &mut dyn ResponseSink, err: &(dyn Error + 'static)) {
    let status = status_code(Some(err));

    if status.is_server_error() {
        tracing::error!(status = %status.as_u16(), error = %err, "request failed");
    } else {
        tracing::debug!(status = %status.as_u16(), error = %err, "request rejected");
    }

    sink.set_status(status);

    let mut message = String::from(status_text(status.as_u16()));
    let public = public_message(Some(err));
    if !public.is_empty() {
        message.push_str(": ");
        message.push_str(public);
    }

    if let Err(write_err) = write_response(sink, status.as_u16(), message.as_bytes()) {
        tracing::warn!(status = %status.as_u16(), error = %write_err, "failed to write error response");
    }
}

/// Writes an error body for `status` and `message` in the format selected by
/// the sink's `Content-Type`.
///
/// Only the body is written; the caller sets the status.
pub fn write_response(sink: &mut dyn ResponseSink, status: u16, message: &[u8]) -> io::Result<()> {
    match response_media_type(sink.headers()).as_deref() {
        Some(CONTENT_TYPE_JSON) => write_json_body(sink, status, message),
        Some(CONTENT_TYPE_TEXT_PLAIN) | Some(CONTENT_TYPE_TEXT) => {
            write_plain_text_body(sink, status, message)
        },
        _ => write_html_body(sink, status, message),
    }
}

fn write_html_body(sink: &mut dyn ResponseSink, status: u16, message: &[u8]) -> io::Result<()> {
    sink.write_body(
        b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\"><title>",
    )?;
    sink.write_body(format!("Error {status}").as_bytes())?;
    sink.write_body(b"</title></head><body>")?;
    sink.write_body(message)?;
    sink.write_body(b"</body></html>\n")
}

fn write_plain_text_body(
    sink: &mut dyn ResponseSink,
    status: u16,
    message: &[u8],
) -> io::Result<()> {
    sink.write_body(format!("{status} ").as_bytes())?;
    sink.write_body(message)?;
    sink.write_body(b"\n")
}

/// Error envelope following the JSend conventions. Empty fields are left out.
#[derive(Debug, Serialize)]
struct JsonErrorBody<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "is_empty")]
    message: &'a str,
    #[serde(skip_serializing_if = "is_zero")]
    code: u16,
}

fn is_empty(message: &&str) -> bool {
    message.is_empty()
}

fn is_zero(code: &u16) -> bool {
    *code == 0
}

fn write_json_body(sink: &mut dyn ResponseSink, status: u16, message: &[u8]) -> io::Result<()> {
    let message = String::from_utf8_lossy(message);
    let body = JsonErrorBody { status: "error", message: &message, code: status };
    let mut json = serde_json::to_vec(&body).map_err(io::Error::from)?;
    json.push(b'\n');
    sink.write_body(&json)
}

/// Returns the media type of the declared `Content-Type`, lowercased and
/// without parameters (`"text/html; charset=UTF-8"` gives `"text/html"`).
fn response_media_type(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let media_type = value.split(';').next().unwrap_or_default().trim();
    if media_type.is_empty() {
        return None;
    }
    Some(media_type.to_ascii_lowercase())
}
