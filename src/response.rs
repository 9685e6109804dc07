//! Response model: a completed exchange and its (possibly unread) error body.
//!
//! A [`Response`] holds exactly one of a decoded body (success) or an
//! [`ErrorBody`] (non-success), gated by the status code. The error body is a
//! one-shot byte source: it can be read once, peeked any number of times, and
//! a peeked view never disturbs the original.

use crate::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use std::sync::atomic::{AtomicBool, Ordering};

/// The result of a completed HTTP exchange.
///
/// # Type Parameters
///
/// * `T` - The decoded body type for successful responses
///
/// # Examples
///
/// ```
/// use overhear::{ErrorBody, Response};
/// use http::{HeaderMap, StatusCode};
///
/// let ok: Response<String> = Response::success(
///     StatusCode::OK,
///     HeaderMap::new(),
///     "hello".to_string(),
/// )?;
/// assert!(ok.is_successful());
/// assert_eq!(ok.body(), Some(&"hello".to_string()));
/// assert!(ok.error_body().is_none());
///
/// let not_found: Response<String> = Response::error(
///     StatusCode::NOT_FOUND,
///     HeaderMap::new(),
///     ErrorBody::new("missing", Some("text/plain")),
/// )?;
/// assert!(!not_found.is_successful());
/// assert!(not_found.body().is_none());
/// assert_eq!(not_found.error_body().unwrap().content_length(), 7);
/// # Ok::<(), overhear::Error>(())
/// ```
#[derive(Debug)]
pub struct Response<T> {
    status: StatusCode,
    headers: HeaderMap,
    payload: Payload<T>,
}

#[derive(Debug)]
enum Payload<T> {
    Body(T),
    ErrorBody(ErrorBody),
}

impl<T> Response<T> {
    /// Creates a successful response with a decoded body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `status` is not a success code.
    pub fn success(status: StatusCode, headers: HeaderMap, body: T) -> Result<Self> {
        if !status.is_success() {
            return Err(Error::Configuration(format!(
                "Success response requires a 2xx status, got {}",
                status
            )));
        }
        Ok(Self {
            status,
            headers,
            payload: Payload::Body(body),
        })
    }

    /// Creates an unsuccessful response with an error body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `status` is a success code.
    pub fn error(status: StatusCode, headers: HeaderMap, error_body: ErrorBody) -> Result<Self> {
        if status.is_success() {
            return Err(Error::Configuration(format!(
                "Error response requires a non-2xx status, got {}",
                status
            )));
        }
        Ok(Self {
            status,
            headers,
            payload: Payload::ErrorBody(error_body),
        })
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns `true` if the status code is in the 2xx range.
    pub fn is_successful(&self) -> bool {
        self.status.is_success()
    }

    /// The decoded body, present only on successful responses.
    pub fn body(&self) -> Option<&T> {
        match &self.payload {
            Payload::Body(body) => Some(body),
            Payload::ErrorBody(_) => None,
        }
    }

    /// Consumes the response, returning the decoded body if successful.
    pub fn into_body(self) -> Option<T> {
        match self.payload {
            Payload::Body(body) => Some(body),
            Payload::ErrorBody(_) => None,
        }
    }

    /// The error body, present only on unsuccessful responses.
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match &self.payload {
            Payload::ErrorBody(error_body) => Some(error_body),
            Payload::Body(_) => None,
        }
    }

    /// For an unsuccessful response, a duplicate response wrapping a peeked
    /// view of the error body. Consuming the duplicate's body leaves the
    /// original fully readable.
    pub(crate) fn peeked(&self) -> Option<Response<T>> {
        let error_body = self.error_body()?;
        Some(Response {
            status: self.status,
            headers: self.headers.clone(),
            payload: Payload::ErrorBody(error_body.peek()),
        })
    }
}

/// The payload of a non-success response.
///
/// Reading is one-shot: [`read`](ErrorBody::read) and
/// [`text`](ErrorBody::text) succeed once, and any later read of the same
/// view fails with [`Error::BodyConsumed`]. Under concurrent reads exactly
/// one reader wins. [`peek`](ErrorBody::peek) produces an independent view
/// over the same bytes without touching the original's state.
///
/// # Examples
///
/// ```
/// use overhear::ErrorBody;
///
/// let body = ErrorBody::new("This request failed.", Some("text/plain; charset=utf-8"));
///
/// // A peeked view reads independently of the original.
/// assert_eq!(body.peek().text()?, "This request failed.");
///
/// // The original is still intact, but only once.
/// assert_eq!(body.text()?, "This request failed.");
/// assert!(body.text().is_err());
/// # Ok::<(), overhear::Error>(())
/// ```
#[derive(Debug)]
pub struct ErrorBody {
    bytes: Bytes,
    content_type: Option<String>,
    consumed: AtomicBool,
}

impl ErrorBody {
    /// Creates an error body over the given bytes with an optional declared
    /// content type (e.g. `"application/json; charset=utf-8"`).
    pub fn new(bytes: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.map(str::to_owned),
            consumed: AtomicBool::new(false),
        }
    }

    /// Creates an empty error body with no declared content type.
    pub fn empty() -> Self {
        Self::new(Bytes::new(), None)
    }

    /// The length of the body in bytes.
    pub fn content_length(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The declared content type, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The charset parameter of the declared content type, if any.
    pub fn charset(&self) -> Option<&str> {
        let content_type = self.content_type.as_deref()?;
        content_type.split(';').skip(1).find_map(|param| {
            let (key, value) = param.trim().split_once('=')?;
            if key.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches('"'))
            } else {
                None
            }
        })
    }

    /// Returns a duplicate view over the same bytes with fresh, independent
    /// consumption state.
    pub fn peek(&self) -> ErrorBody {
        Self {
            bytes: self.bytes.clone(),
            content_type: self.content_type.clone(),
            consumed: AtomicBool::new(false),
        }
    }

    /// Consumes the body, returning its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyConsumed`] if this view was already read.
    pub fn read(&self) -> Result<Bytes> {
        if self.consumed.swap(true, Ordering::AcqRel) {
            return Err(Error::BodyConsumed);
        }
        Ok(self.bytes.clone())
    }

    /// Consumes the body, decoding it as text.
    ///
    /// Decodes using the declared charset, defaulting to UTF-8 when
    /// unspecified. A leading UTF-8 byte-order mark is stripped. Bytes that
    /// are not valid in the encoding decode as U+FFFD. Charsets other than
    /// UTF-8 and US-ASCII are decoded as UTF-8 on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BodyConsumed`] if this view was already read.
    pub fn text(&self) -> Result<String> {
        let bytes = self.read()?;
        let bytes = bytes
            .strip_prefix(b"\xef\xbb\xbf".as_slice())
            .unwrap_or(&bytes);
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_is_one_shot() {
        let body = ErrorBody::new("payload", None);
        assert_eq!(body.read().unwrap().as_ref(), b"payload");
        assert!(matches!(body.read(), Err(Error::BodyConsumed)));
        assert!(matches!(body.text(), Err(Error::BodyConsumed)));
    }

    #[test]
    fn test_peeked_view_does_not_consume_original() {
        let body = ErrorBody::new("payload", None);
        let peeked = body.peek();
        assert_eq!(peeked.text().unwrap(), "payload");
        assert!(peeked.read().is_err());
        // Original is untouched.
        assert_eq!(body.text().unwrap(), "payload");
    }

    #[test]
    fn test_charset_parsed_from_content_type() {
        let body = ErrorBody::new("", Some("text/plain; charset=\"utf-8\""));
        assert_eq!(body.charset(), Some("utf-8"));

        let no_charset = ErrorBody::new("", Some("application/octet-stream"));
        assert_eq!(no_charset.charset(), None);

        let untyped = ErrorBody::empty();
        assert_eq!(untyped.charset(), None);
    }

    #[test]
    fn test_text_strips_utf8_bom() {
        let body = ErrorBody::new(&b"\xef\xbb\xbfhello"[..], Some("text/plain; charset=utf-8"));
        assert_eq!(body.text().unwrap(), "hello");
    }

    #[test]
    fn test_text_replaces_invalid_bytes() {
        let body = ErrorBody::new(&b"ok \xff\xfe"[..], None);
        assert_eq!(body.text().unwrap(), "ok \u{fffd}\u{fffd}");
    }

    #[test]
    fn test_response_constructors_enforce_status_agreement() {
        let err = Response::success(StatusCode::NOT_FOUND, HeaderMap::new(), ());
        assert!(matches!(err, Err(Error::Configuration(_))));

        let err = Response::<()>::error(StatusCode::OK, HeaderMap::new(), ErrorBody::empty());
        assert!(matches!(err, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_peeked_response_preserves_status_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", http::HeaderValue::from_static("abc"));
        let response: Response<()> = Response::error(
            StatusCode::BAD_REQUEST,
            headers,
            ErrorBody::new("nope", None),
        )
        .unwrap();

        let peeked = response.peeked().unwrap();
        assert_eq!(peeked.status(), StatusCode::BAD_REQUEST);
        assert_eq!(peeked.headers().get("x-request-id").unwrap(), "abc");
        assert_eq!(peeked.error_body().unwrap().text().unwrap(), "nope");
        assert_eq!(response.error_body().unwrap().text().unwrap(), "nope");
    }

    #[test]
    fn test_successful_response_has_no_peeked_view() {
        let response = Response::success(StatusCode::OK, HeaderMap::new(), 7u32).unwrap();
        assert!(response.peeked().is_none());
    }
}
