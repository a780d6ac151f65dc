//! HTTP response.

use bytes::Bytes;
use futures_util::TryStreamExt;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::Frame;
use hyper::{Response, StatusCode, header};
use std::path::Path;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::{Error, mime};

/// Boxed body type for responses.
pub type BoxBody = http_body_util::combinators::BoxBody<Bytes, Error>;

static CONTENT_TYPE_TEXT: header::HeaderValue =
    header::HeaderValue::from_static("text/plain; charset=utf-8");
static CONTENT_TYPE_HTML: header::HeaderValue =
    header::HeaderValue::from_static("text/html; charset=utf-8");

/// HTTP response.
pub struct Res {
    inner: Response<BoxBody>,
}

impl Res {
    /// Unwrap to hyper response.
    #[inline]
    pub fn into_hyper(self) -> Response<BoxBody> {
        self.inner
    }

    /// Stream a file from disk with a content type inferred from its
    /// extension. Returns 404 if the file cannot be opened.
    pub async fn file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let file = match File::open(path).await {
            Ok(f) => f,
            Err(_) => {
                return Self::builder().status(404).text("File not found");
            }
        };

        let reader_stream = ReaderStream::new(file);
        let stream_body = StreamBody::new(reader_stream.map_ok(Frame::data).map_err(Error::from));
        let boxed_body = stream_body.boxed();

        let mut res = Response::new(boxed_body);
        res.headers_mut()
            .insert(header::CONTENT_TYPE, mime::from_path(path));

        Self { inner: res }
    }

    /// Text response.
    pub fn text(body: impl Into<String>) -> Self {
        let body_str = body.into();
        let mut res = Response::new(
            Full::new(Bytes::from(body_str))
                .map_err(|e| match e {})
                .boxed(),
        );
        res.headers_mut()
            .insert(header::CONTENT_TYPE, CONTENT_TYPE_TEXT.clone());
        Self { inner: res }
    }

    /// HTML response.
    pub fn html(body: impl Into<String>) -> Self {
        let body_str = body.into();
        let mut res = Response::new(
            Full::new(Bytes::from(body_str))
                .map_err(|e| match e {})
                .boxed(),
        );
        res.headers_mut()
            .insert(header::CONTENT_TYPE, CONTENT_TYPE_HTML.clone());
        Self { inner: res }
    }

    /// Status-only response.
    pub fn status(code: u16) -> Self {
        let mut res = Response::new(Full::new(Bytes::new()).map_err(|e| match e {}).boxed());
        *res.status_mut() = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { inner: res }
    }

    /// Create builder.
    pub fn builder() -> ResBuilder {
        ResBuilder::new()
    }
}

/// Response builder with pre-allocated headers.
pub struct ResBuilder {
    status: StatusCode,
    headers: header::HeaderMap,
}

impl ResBuilder {
    /// Create builder.
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            headers: header::HeaderMap::with_capacity(4),
        }
    }

    /// Set status code.
    pub fn status(mut self, code: u16) -> Self {
        self.status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self
    }

    /// Add header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            header::HeaderName::from_bytes(name.as_ref().as_bytes()),
            header::HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Build text response.
    pub fn text(mut self, body: impl Into<String>) -> Res {
        let body_str = body.into();
        let mut res = Response::new(
            Full::new(Bytes::from(body_str))
                .map_err(|e| match e {})
                .boxed(),
        );
        *res.status_mut() = self.status;

        if !self.headers.contains_key(header::CONTENT_TYPE) {
            self.headers
                .insert(header::CONTENT_TYPE, CONTENT_TYPE_TEXT.clone());
        }

        *res.headers_mut() = self.headers;
        Res { inner: res }
    }
}

impl Default for ResBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        let res = Res::text("plain").into_hyper();
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");

        let res = Res::html("<p>hi</p>").into_hyper();
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Res::status(204).into_hyper().status(), 204);
        // Out-of-range codes collapse to 500.
        assert_eq!(Res::status(9999).into_hyper().status(), 500);
    }

    #[test]
    fn test_builder_sets_status_and_headers() {
        let res = Res::builder()
            .status(405)
            .header("Allow", "GET, HEAD")
            .text("no")
            .into_hyper();
        assert_eq!(res.status(), 405);
        assert_eq!(res.headers()["allow"], "GET, HEAD");
        assert_eq!(res.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_file_infers_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.bundle.js");
        std::fs::write(&path, b"bundle").unwrap();

        let res = Res::file(&path).await.into_hyper();
        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/javascript");
    }

    #[tokio::test]
    async fn test_file_missing_is_404() {
        let res = Res::file("no/such/file.js").await.into_hyper();
        assert_eq!(res.status(), 404);
    }
}
