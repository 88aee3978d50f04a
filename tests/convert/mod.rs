use http::StatusCode;
use status_rail::convert::{public_error, status_error, wrap};
use status_rail::{is_equivalent, public_message, status_code, BoxError, ResultExt, Status};

#[test]
fn status_error_without_message_is_the_bare_status() {
    let err = status_error(StatusCode::NOT_FOUND, "");

    assert_eq!(err.downcast_ref::<Status>(), Some(&Status::NOT_FOUND));
    assert_eq!(err.to_string(), "404 Not Found");
}

#[test]
fn status_error_with_message_keeps_it_private() {
    let err = status_error(StatusCode::BAD_REQUEST, "missing parameter 'foo'");

    assert_eq!(err.to_string(), "400 Bad Request: missing parameter 'foo'");
    assert_eq!(status_code(Some(&*err)), StatusCode::BAD_REQUEST);
    assert_eq!(public_message(Some(&*err)), "");
    assert!(is_equivalent(&*err, &Status::BAD_REQUEST));
}

#[test]
fn status_error_macro_formats_its_message() {
    let key = "foo";
    let err = status_rail::status_error!(StatusCode::BAD_REQUEST, "missing parameter '{key}'");
    assert_eq!(err.to_string(), "400 Bad Request: missing parameter 'foo'");

    let empty = status_rail::status_error!(StatusCode::GONE, "{}", "");
    assert_eq!(empty.downcast_ref::<Status>(), Some(&Status::GONE));
}

#[test]
fn public_error_exposes_its_message() {
    let err = public_error(StatusCode::TOO_MANY_REQUESTS, "try again in 30s");

    assert_eq!(err.to_string(), "429 Too Many Requests: try again in 30s");
    assert_eq!(status_code(Some(&*err)), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(public_message(Some(&*err)), "try again in 30s");
    assert!(is_equivalent(&*err, &Status::TOO_MANY_REQUESTS));
}

#[test]
fn public_error_macro_formats_its_message() {
    let limit = 30;
    let err = status_rail::public_error!(StatusCode::TOO_MANY_REQUESTS, "limit is {} per minute", limit);
    assert_eq!(public_message(Some(&*err)), "limit is 30 per minute");
}

#[test]
fn wrap_keeps_the_cause_as_source() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "open /etc/shadow");
    let err = wrap(io, StatusCode::FORBIDDEN);

    assert_eq!(err.to_string(), "403 Forbidden: open /etc/shadow");
    let source = err.source().expect("wrapped errors have a source");
    assert_eq!(
        source.downcast_ref::<std::io::Error>().map(std::io::Error::kind),
        Some(std::io::ErrorKind::PermissionDenied)
    );
}

#[test]
fn with_status_wraps_the_error() {
    let result: Result<u64, BoxError> = "x".parse::<u64>().with_status(StatusCode::BAD_REQUEST);
    let err = result.unwrap_err();

    assert_eq!(status_code(Some(&*err)), StatusCode::BAD_REQUEST);
    assert!(err.source().is_some_and(|source| source.is::<std::num::ParseIntError>()));
}

#[test]
fn with_public_replaces_the_error() {
    let err = "x"
        .parse::<u64>()
        .with_public(StatusCode::BAD_REQUEST, "page must be a number")
        .unwrap_err();

    assert_eq!(public_message(Some(&*err)), "page must be a number");
    assert!(err.source().is_none());
}

#[test]
fn with_public_fn_is_lazy() {
    let ok: Result<u8, std::fmt::Error> = Ok(1);
    let value = ok
        .with_public_fn(StatusCode::BAD_REQUEST, || -> String { panic!("built on success") })
        .unwrap();
    assert_eq!(value, 1);

    let err: Result<u8, std::fmt::Error> = Err(std::fmt::Error);
    let err = err.with_public_fn(StatusCode::UNPROCESSABLE_ENTITY, || "bad shape").unwrap_err();
    assert_eq!(status_code(Some(&*err)), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(public_message(Some(&*err)), "bad shape");
}

#[test]
fn described_status_error_is_only_equivalent_to_the_constant() {
    let err = status_error(StatusCode::BAD_REQUEST, "x");

    assert_ne!(err.downcast_ref::<Status>(), Some(&Status::BAD_REQUEST));
    assert!(is_equivalent(&*err, &Status::BAD_REQUEST));

    let bare = status_error(StatusCode::BAD_REQUEST, "");
    assert!(is_equivalent(&*bare, &Status::BAD_REQUEST));
}
