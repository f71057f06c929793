use std::path::{Path, PathBuf};

use crate::error::RequestError;

/// Maps a request URI to a filesystem path under `root`.
///
/// `/` is served by `root/<index_file>`. Every other URI is joined onto the
/// root segment by segment: empty and `.` segments are dropped, `..` folds
/// the previous segment away, and a `..` that would climb above the root is
/// `ResourceForbidden`. The query string and fragment are ignored. No
/// percent-decoding takes place, so `%2e%2e` is an ordinary file name.
pub fn resolve(uri: &str, root: &Path, index_file: &str) -> Result<PathBuf, RequestError> {
    let path = uri.split(['?', '#']).next().unwrap_or_default();

    if !path.starts_with('/') {
        return Err(RequestError::MalformedRequest("uri must begin with '/'"));
    }
    if path.contains('\0') {
        return Err(RequestError::MalformedRequest("uri contains a NUL byte"));
    }

    if path == "/" {
        return Ok(root.join(index_file));
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    tracing::warn!(uri = %uri, "Rejected uri escaping the document root");
                    return Err(RequestError::ResourceForbidden);
                }
            }
            s => segments.push(s),
        }
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(segments);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_uri_maps_to_index() {
        let path = resolve("/", Path::new("/srv/www"), "index.html").unwrap();
        assert_eq!(path, PathBuf::from("/srv/www/index.html"));
    }

    #[test]
    fn dot_segments_fold_inside_root() {
        let path = resolve("/a/./b/../c.txt", Path::new("/srv/www"), "index.html").unwrap();
        assert_eq!(path, PathBuf::from("/srv/www/a/c.txt"));
    }
}
