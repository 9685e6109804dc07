//! The typed HTTP call abstraction this crate instruments.
//!
//! A [`Call`] represents a single, possibly retryable, request/response
//! exchange owned by an embedding call framework. This crate never creates
//! calls; it only wraps them. The framework that builds calls is responsible
//! for attaching an [`Origin`] record to every [`Request`] so the logging
//! layer can report the value bound to the request-body parameter without
//! inspecting call sites at runtime.

use crate::{Error, Response, Result};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

/// A single HTTP request/response exchange, executable once synchronously or
/// asynchronously, and clonable to retry.
///
/// Implemented by the embedding call framework. The logging wrapper
/// ([`LoggingCall`](crate::LoggingCall)) implements this same trait and
/// forwards every capability it does not intercept.
///
/// # Contract
///
/// * `execute` blocks on the caller's thread and may be called once per call
///   instance; `enqueue` returns immediately and delivers the result on the
///   framework dispatcher's thread.
/// * `request` builds (or returns the already-built) request descriptor.
///   Building may fail; the same failure must then surface from the
///   `execute`/`enqueue` that follows.
/// * `clone_call` produces a new call with independent execution state but
///   the same request template.
pub trait Call<T>: Send {
    /// Synchronously executes the call, blocking until the exchange
    /// completes.
    fn execute(&mut self) -> Result<Response<T>>;

    /// Asynchronously executes the call, delivering the result to `callback`
    /// on the framework dispatcher's thread.
    fn enqueue(&mut self, callback: Box<dyn Callback<T>>);

    /// Cancels the call, if the framework supports in-flight cancellation.
    fn cancel(&self);

    /// Returns `true` if [`cancel`](Call::cancel) was called.
    fn is_canceled(&self) -> bool;

    /// Returns `true` if the call has been executed or enqueued.
    fn is_executed(&self) -> bool;

    /// Builds and returns the request descriptor for this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built, typically
    /// [`Error::RequestBuild`].
    fn request(&self) -> Result<Request>;

    /// Returns the configured timeout for the full exchange, if any.
    fn timeout(&self) -> Option<Duration>;

    /// Returns a new, not-yet-executed call with the same request template.
    fn clone_call(&self) -> Box<dyn Call<T>>;
}

/// Receiver for an asynchronously executed call's result.
///
/// Exactly one of the two methods is invoked, exactly once, on whatever
/// thread the framework dispatcher uses.
pub trait Callback<T>: Send {
    /// The exchange completed with a response (successful or not).
    fn on_response(self: Box<Self>, call: &dyn Call<T>, response: Response<T>);

    /// The exchange failed before producing a response.
    fn on_failure(self: Box<Self>, call: &dyn Call<T>, error: Error);
}

/// A request descriptor: what a call will send when executed.
///
/// Built by the call framework. The [`origin`](Request::origin) record is
/// mandatory for calls routed through the logging adapter; a request without
/// one is an integration bug and is reported as such (see
/// [`LoggingCall`](crate::LoggingCall)).
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method.
    pub method: Method,

    /// The fully resolved request URL.
    pub url: Url,

    /// The request headers.
    pub headers: HeaderMap,

    /// The call-site record attached at construction time, or `None` if the
    /// framework did not attach one.
    pub origin: Option<Origin>,
}

impl Request {
    /// Creates a new `Request` with the given method and URL and no headers.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            origin: None,
        }
    }

    /// Adds a header to the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Attaches the call-site record.
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// Construction-time record of the call site that produced a request.
///
/// Replaces runtime inspection of method signatures: the framework that
/// builds a call declares, once, which value (if any) was bound to the
/// request-body parameter.
///
/// # Examples
///
/// ```
/// use overhear::Origin;
/// use serde_json::json;
///
/// // A call site with a body parameter.
/// let with_body = Origin::new().with_body(json!({"name": "Alice"}));
/// assert!(with_body.body.is_some());
///
/// // A call site without one (e.g. a GET).
/// let bodiless = Origin::new();
/// assert!(bodiless.body.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Origin {
    /// The value bound to the request-body parameter, if the call site has
    /// one.
    pub body: Option<serde_json::Value>,
}

impl Origin {
    /// Creates a record for a call site with no body parameter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the value bound to the call site's body parameter.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The request-body value reported to a [`Logger`](crate::Logger).
///
/// The three states are distinct: a call site without a body parameter is not
/// the same thing as a request that could not be built at all.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Request construction failed before a body could be determined. The
    /// `execute`/`enqueue` that follows surfaces the construction error
    /// itself.
    Unbuilt,

    /// The call site has no body parameter.
    None,

    /// The value bound to the call site's body parameter.
    Value(serde_json::Value),
}

impl RequestBody {
    /// Returns the body value, if this is [`RequestBody::Value`].
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            RequestBody::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns `true` if the request could not be built.
    pub fn is_unbuilt(&self) -> bool {
        matches!(self, RequestBody::Unbuilt)
    }
}

impl<T: 'static> Clone for Box<dyn Call<T>> {
    fn clone(&self) -> Self {
        self.clone_call()
    }
}
