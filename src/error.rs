//! Request-level error taxonomy.
//!
//! Every failure a single request can run into is one of these variants and
//! maps to exactly one status code. None of them ever terminate the server;
//! the connection worker turns them into a framed response.

use crate::http::response::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("method not implemented")]
    UnsupportedMethod,

    #[error("malformed request: {0}")]
    MalformedRequest(&'static str),

    #[error("unsupported HTTP version: {0:?}")]
    UnsupportedVersion(String),

    #[error("resource not found")]
    ResourceMissing,

    #[error("access to resource forbidden")]
    ResourceForbidden,

    #[error("server error while accessing resource")]
    ResourceServerError,

    #[error("connection limit reached")]
    CapacityExceeded,
}

impl RequestError {
    /// The status code this error is answered with.
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::UnsupportedMethod => StatusCode::NotImplemented,
            RequestError::MalformedRequest(_) => StatusCode::BadRequest,
            RequestError::UnsupportedVersion(_) => StatusCode::HttpVersionNotSupported,
            RequestError::ResourceMissing => StatusCode::NotFound,
            RequestError::ResourceForbidden => StatusCode::Forbidden,
            RequestError::ResourceServerError => StatusCode::InternalServerError,
            RequestError::CapacityExceeded => StatusCode::ServiceUnavailable,
        }
    }
}
