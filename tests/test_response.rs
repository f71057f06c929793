use simple_server::error::RequestError;
use simple_server::http::framer::{SERVER_NAME, frame_error};
use simple_server::http::request::Method;
use simple_server::http::response::{ResponseBuilder, StatusCode};
use simple_server::http::writer::serialize_head;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
    assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    assert_eq!(StatusCode::ServiceUnavailable.as_u16(), 503);
    assert_eq!(StatusCode::HttpVersionNotSupported.as_u16(), 505);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    assert_eq!(
        StatusCode::HttpVersionNotSupported.reason_phrase(),
        "HTTP Version Not Supported"
    );
}

#[test]
fn test_request_errors_map_to_one_status_each() {
    let cases = vec![
        (RequestError::UnsupportedMethod, 501),
        (RequestError::MalformedRequest("x"), 400),
        (RequestError::UnsupportedVersion("HTTP/1.0".into()), 505),
        (RequestError::ResourceMissing, 404),
        (RequestError::ResourceForbidden, 403),
        (RequestError::ResourceServerError, 500),
        (RequestError::CapacityExceeded, 503),
    ];

    for (err, code) in cases {
        assert_eq!(err.status().as_u16(), code, "{err}");
    }
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    assert_eq!(response.header("Content-Length").unwrap(), body.len().to_string());
}

#[test]
fn test_response_builder_preserves_explicit_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .build();

    assert_eq!(response.header("content-length").unwrap(), "999");
    assert_eq!(response.entity_length(), 0);
}

#[test]
fn test_response_builder_replaces_header_in_place() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", "first")
        .header("Content-Type", "text/plain")
        .header("server", "second")
        .build();

    assert_eq!(response.headers[0], ("Server".to_string(), "second".to_string()));
    assert_eq!(response.headers.len(), 3); // 2 explicit + Content-Length
}

#[test]
fn test_serialize_head_layout() {
    let response = ResponseBuilder::new(StatusCode::NotFound)
        .header("Server", SERVER_NAME)
        .header("Connection", "close")
        .build();

    let head = String::from_utf8(serialize_head(&response)).unwrap();

    assert_eq!(
        head,
        "HTTP/1.0 404 Not Found\r\nServer: Simple/1.0\r\nConnection: close\r\nContent-Length: 0\r\n\r\n"
    );
}

#[test]
fn test_frame_error_get_has_body() {
    let response = frame_error(&RequestError::ResourceMissing, Method::GET);

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, b"404 Not Found\n".to_vec());
    assert_eq!(response.header("Server"), Some(SERVER_NAME));
    assert_eq!(response.header("Connection"), Some("close"));
    assert_eq!(response.header("Content-Type"), None);
}

#[test]
fn test_frame_error_head_has_no_entity() {
    let response = frame_error(&RequestError::ResourceForbidden, Method::HEAD);

    assert_eq!(response.status, StatusCode::Forbidden);
    assert_eq!(response.entity_length(), 0);
    // Length of the body a GET would have received.
    assert_eq!(response.header("Content-Length"), Some("14"));
}

#[test]
fn test_frame_error_unsupported_method_has_body() {
    let response = frame_error(&RequestError::UnsupportedMethod, Method::UNSUPPORTED);

    assert_eq!(response.status, StatusCode::NotImplemented);
    assert_eq!(response.body, b"501 Not Implemented\n".to_vec());
}

#[test]
fn test_frame_error_capacity_body_only_for_get() {
    let get = frame_error(&RequestError::CapacityExceeded, Method::GET);
    assert_eq!(get.status, StatusCode::ServiceUnavailable);
    assert_eq!(get.body, b"503 Service Unavailable\n".to_vec());

    let head = frame_error(&RequestError::CapacityExceeded, Method::HEAD);
    assert_eq!(head.entity_length(), 0);

    let other = frame_error(&RequestError::CapacityExceeded, Method::UNSUPPORTED);
    assert_eq!(other.entity_length(), 0);
    assert_eq!(other.header("Content-Length"), Some("0"));
}
