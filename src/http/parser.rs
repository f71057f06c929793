use crate::error::RequestError;
use crate::http::request::{Method, RequestLine};

/// Upper bound on the bytes of one request that are ever buffered or parsed.
///
/// Anything past this bound is never looked at; a request whose header
/// terminator does not fit is rejected as malformed.
pub const MAX_REQUEST_SIZE: usize = 4096;

/// The only request version accepted.
pub const HTTP_VERSION: &str = "HTTP/1.1";

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Tokenizes the request line of a raw request.
///
/// The method token runs up to the first space, the URI up to the next
/// space and the version up to a carriage return. Running into the size
/// bound before a delimiter is a `MalformedRequest`, never a truncated
/// token. Header lines are not interpreted; the only requirement is that
/// the blank line ending them lies within the bound.
pub fn parse_request_line(buf: &[u8]) -> Result<RequestLine, RequestError> {
    let buf = &buf[..buf.len().min(MAX_REQUEST_SIZE)];

    let (method_token, method_end) = take_until(buf, 0, b' ')
        .ok_or(RequestError::MalformedRequest("method token not terminated"))?;

    let method = Method::from_token(method_token);
    if method == Method::UNSUPPORTED {
        return Ok(RequestLine::unsupported());
    }

    let (uri_token, uri_end) = take_until(buf, method_end + 1, b' ')
        .ok_or(RequestError::MalformedRequest("uri token not terminated"))?;

    let (version_token, version_end) = take_until(buf, uri_end + 1, b'\r')
        .ok_or(RequestError::MalformedRequest("version token not terminated"))?;

    if version_token != HTTP_VERSION.as_bytes() {
        return Err(RequestError::UnsupportedVersion(
            String::from_utf8_lossy(version_token).into_owned(),
        ));
    }

    if buf.get(version_end + 1) != Some(&b'\n') {
        return Err(RequestError::MalformedRequest("request line not terminated by CRLF"));
    }

    // The request line's own CRLF is the first half of the terminator when
    // no header lines follow.
    if find_header_end(&buf[version_end..]).is_none() {
        return Err(RequestError::MalformedRequest("header terminator missing"));
    }

    let uri = std::str::from_utf8(uri_token)
        .map_err(|_| RequestError::MalformedRequest("uri is not valid UTF-8"))?;

    Ok(RequestLine {
        method,
        uri: uri.to_string(),
        version: HTTP_VERSION.to_string(),
    })
}

/// Position of the first `\r\n\r\n` in `buf`, if any.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Returns the bytes from `start` up to (not including) `delim`, together
/// with the index of `delim`. `None` when `delim` does not occur.
fn take_until(buf: &[u8], start: usize, delim: u8) -> Option<(&[u8], usize)> {
    let rest = buf.get(start..)?;
    let len = rest.iter().position(|&b| b == delim)?;
    Some((&rest[..len], start + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_until_finds_delimiter() {
        let (token, end) = take_until(b"GET /a HTTP/1.1", 0, b' ').unwrap();
        assert_eq!(token, b"GET");
        assert_eq!(end, 3);

        let (token, end) = take_until(b"GET /a HTTP/1.1", 4, b' ').unwrap();
        assert_eq!(token, b"/a");
        assert_eq!(end, 6);
    }

    #[test]
    fn take_until_past_end_is_none() {
        assert!(take_until(b"GET", 0, b' ').is_none());
        assert!(take_until(b"GET ", 10, b' ').is_none());
    }

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request_line(req).unwrap();

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.uri, "/");
        assert_eq!(parsed.version, "HTTP/1.1");
    }
}
