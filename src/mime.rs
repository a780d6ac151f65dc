//! Content type inference for static assets.

use hyper::header::HeaderValue;
use std::path::Path;

/// Infer a content type from a file extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub fn from_path(path: &Path) -> HeaderValue {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let value = match ext.as_deref() {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("js") | Some("mjs") => "application/javascript",
        Some("css") => "text/css; charset=utf-8",
        Some("json") | Some("map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    };

    HeaderValue::from_static(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(
            from_path(Path::new("dist/app.bundle.js")),
            "application/javascript"
        );
        assert_eq!(from_path(Path::new("dist/app.html")), "text/html; charset=utf-8");
        assert_eq!(from_path(Path::new("site.css")), "text/css; charset=utf-8");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(from_path(Path::new("LOGO.PNG")), "image/png");
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        assert_eq!(from_path(Path::new("data.bin")), "application/octet-stream");
        assert_eq!(from_path(Path::new("no-extension")), "application/octet-stream");
    }
}
