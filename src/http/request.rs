/// HTTP request methods.
///
/// Only GET and HEAD are served. Every other token parses to
/// `UNSUPPORTED` and is answered with 501 Not Implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// Any other method token
    UNSUPPORTED,
}

impl Method {
    /// Maps a method token to a `Method`.
    ///
    /// Matching is case-sensitive: `get` is not `GET`.
    ///
    /// # Example
    ///
    /// ```
    /// # use simple_server::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Method::GET);
    /// assert_eq!(Method::from_token(b"get"), Method::UNSUPPORTED);
    /// ```
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" => Method::GET,
            b"HEAD" => Method::HEAD,
            _ => Method::UNSUPPORTED,
        }
    }

    /// Reads the method token from the start of a raw request without
    /// validating anything else.
    ///
    /// Used when the request as a whole is rejected but the response still
    /// depends on whether the client asked for GET or HEAD.
    pub fn sniff(raw: &[u8]) -> Self {
        match raw.iter().position(|&b| b == b' ') {
            Some(end) => Method::from_token(&raw[..end]),
            None => Method::UNSUPPORTED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::UNSUPPORTED => "UNSUPPORTED",
        }
    }
}

/// The tokens of a request line.
///
/// For an `UNSUPPORTED` method the parser stops after the method token, so
/// `uri` and `version` are left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// The request target exactly as sent (e.g., "/index.html")
    pub uri: String,
    /// HTTP version token (only "HTTP/1.1" is accepted)
    pub version: String,
}

impl RequestLine {
    pub fn unsupported() -> Self {
        Self {
            method: Method::UNSUPPORTED,
            uri: String::new(),
            version: String::new(),
        }
    }
}
