use crate::config::StaticFilesConfig;
use crate::error::RequestError;
use crate::files::{ResolvedResource, classify, resolve};
use crate::http::request::{Method, RequestLine};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Value of the `Server` header on every response.
pub const SERVER_NAME: &str = "Simple/1.0";

/// Produces the response for a parsed request line.
///
/// Unsupported methods are answered without touching the filesystem.
pub async fn respond(line: &RequestLine, static_files: &StaticFilesConfig) -> Response {
    if line.method == Method::UNSUPPORTED {
        return frame_error(&RequestError::UnsupportedMethod, line.method);
    }

    let path = match resolve(&line.uri, &static_files.root, &static_files.index_file) {
        Ok(path) => path,
        Err(e) => return frame_error(&e, line.method),
    };

    frame(line.method, classify(path).await).await
}

/// Frames a classified resource.
///
/// GET reads the whole file into the entity. HEAD only measures it, so the
/// response carries the same headers with no entity bytes.
pub async fn frame(method: Method, mut resource: ResolvedResource) -> Response {
    if let Some(err) = resource.error() {
        return frame_error(&err, method);
    }

    let content_type = resource
        .mime_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let builder = ResponseBuilder::new(StatusCode::Ok)
        .header("Server", SERVER_NAME)
        .header("Content-Type", content_type)
        .header("Connection", "close");

    let framed = match method {
        Method::HEAD => resource
            .entity_size()
            .await
            .map(|size| builder.header("Content-Length", size.to_string()).build()),
        _ => resource
            .read_entity()
            .await
            .map(|entity| builder.body(entity).build()),
    };

    framed.unwrap_or_else(|e| {
        tracing::warn!(path = %resource.path.display(), error = %e, "Failed to read resource");
        frame_error(&RequestError::ResourceServerError, method)
    })
}

/// Frames an error response.
///
/// HEAD never gets an entity but keeps the Content-Length the GET body would
/// have had. A rejected connection only carries a body when the client
/// asked with GET; every other error carries one for any method but HEAD.
pub fn frame_error(err: &RequestError, method: Method) -> Response {
    let status = err.status();
    let builder = ResponseBuilder::new(status)
        .header("Server", SERVER_NAME)
        .header("Connection", "close");

    let carries_body = match err {
        RequestError::CapacityExceeded => method == Method::GET,
        _ => method != Method::HEAD,
    };

    if method == Method::HEAD {
        builder.body(error_body(status)).build().without_body()
    } else if carries_body {
        builder.body(error_body(status)).build()
    } else {
        builder.build()
    }
}

fn error_body(status: StatusCode) -> Vec<u8> {
    format!("{} {}\n", status.as_u16(), status.reason_phrase()).into_bytes()
}
