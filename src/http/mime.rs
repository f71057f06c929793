use std::path::Path;

/// Content type for a file, derived from its extension.
///
/// Unknown or missing extensions fall back to `application/octet-stream`.
pub fn mime_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_extensions() {
        assert_eq!(mime_type(Path::new("/srv/www/index.html")), "text/html");
        assert_eq!(mime_type(Path::new("style.css")), "text/css");
        assert_eq!(mime_type(Path::new("logo.png")), "image/png");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(mime_type(Path::new("blob.zzzq")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("README")), "application/octet-stream");
    }
}
