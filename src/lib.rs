//! # Overhear - transparent logging for typed HTTP calls
//!
//! Overhear wraps an existing HTTP [`Call`] so that every synchronous
//! execution and every asynchronously delivered result is observed by a
//! caller-supplied [`Logger`], without altering the call's outward behavior:
//! callers see exactly the responses and errors the underlying call would
//! have produced.
//!
//! The crate implements no networking, retries, or serialization of its own.
//! It defines the call capability set, wraps implementations of it, and
//! composes with the embedding framework's call adapters.
//!
//! ## Quick Start
//!
//! ```
//! use overhear::{
//!     Call, CallAdapter, IdentityAdapter, Logger, LoggingCallAdapterFactory, RequestBody,
//!     Response,
//! };
//!
//! struct PrintlnLogger;
//!
//! impl<T> Logger<T> for PrintlnLogger {
//!     fn on_response(
//!         &self,
//!         call: &dyn Call<T>,
//!         _request_body: &RequestBody,
//!         response: &Response<T>,
//!     ) {
//!         let url = call.request().map(|r| r.url.to_string()).unwrap_or_default();
//!         println!("{} -> {}", url, response.status());
//!     }
//!
//!     fn on_failure(
//!         &self,
//!         _call: &dyn Call<T>,
//!         _request_body: &RequestBody,
//!         error: &overhear::Error,
//!     ) {
//!         eprintln!("call failed: {error}");
//!     }
//! }
//!
//! # use overhear::{Callback, Origin, Request};
//! # use http::{HeaderMap, Method, StatusCode};
//! # use std::time::Duration;
//! # #[derive(Clone)]
//! # struct CannedCall;
//! # impl Call<String> for CannedCall {
//! #     fn execute(&mut self) -> overhear::Result<Response<String>> {
//! #         Response::success(StatusCode::OK, HeaderMap::new(), "ok".to_string())
//! #     }
//! #     fn enqueue(&mut self, callback: Box<dyn Callback<String>>) {
//! #         let response =
//! #             Response::success(StatusCode::OK, HeaderMap::new(), "ok".to_string()).unwrap();
//! #         callback.on_response(&CannedCall, response);
//! #     }
//! #     fn cancel(&self) {}
//! #     fn is_canceled(&self) -> bool { false }
//! #     fn is_executed(&self) -> bool { false }
//! #     fn request(&self) -> overhear::Result<Request> {
//! #         Ok(Request::new(Method::GET, "https://api.example.com/users/1".parse().unwrap())
//! #             .with_origin(Origin::new()))
//! #     }
//! #     fn timeout(&self) -> Option<Duration> { None }
//! #     fn clone_call(&self) -> Box<dyn Call<String>> { Box::new(self.clone()) }
//! # }
//! // One factory per logger; one wrapped adapter per call site.
//! let factory = LoggingCallAdapterFactory::new(PrintlnLogger);
//! let adapter = factory.wrap::<String, _>(IdentityAdapter);
//!
//! // The framework hands the adapter a raw call; the caller gets it back
//! // instrumented.
//! let raw: Box<dyn Call<String>> = Box::new(CannedCall);
//! let mut call = adapter.adapt(raw);
//! let response = call.execute()?;
//! assert_eq!(response.body(), Some(&"ok".to_string()));
//! # Ok::<(), overhear::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Transparent interception** - `execute` and `enqueue` notify the logger;
//!   every other capability (`cancel`, `is_canceled`, `is_executed`,
//!   `request`, `timeout`) is a pure pass-through
//! - **Non-destructive error-body logging** - loggers receive a peeked
//!   duplicate of the error body; the original stays fully readable by the
//!   caller
//! - **Plaintext sniffing** - [`sniff::error_message`] renders an error body
//!   as text only when its prefix looks human-readable
//! - **Request-body reporting** - the value bound to a call site's body
//!   parameter is reported alongside each result, with a distinct
//!   [`RequestBody::Unbuilt`] sentinel when the request could not be built
//!   at all
//! - **Adapter chaining** - [`LoggingCallAdapterFactory`] slots in ahead of
//!   any other call adapter without changing its output
//! - **Structured logging out of the box** - [`TracingLogger`] renders
//!   results as `tracing` events
//!
//! ## Threading
//!
//! The wrapper adds no threads and no locks. `execute` blocks on the
//! caller's thread; `enqueue` callbacks (the logger's and the forwarded
//! one) run on whatever thread the framework dispatcher uses. Per call, at
//! most one of `on_response`/`on_failure` fires, strictly before the result
//! reaches the original caller; ordering across concurrent calls is
//! unspecified.
//!
//! ## Fatal conditions
//!
//! Recoverable call failures are `Err` values and are always logged before
//! being returned unchanged. Fatal runtime conditions are panics, which the
//! wrapper never catches: they propagate without reaching the logger, since
//! logging inside a compromised execution environment is unreliable and
//! could mask the original condition.

mod adapter;
mod call;
mod error;
mod intercept;
mod logger;
mod response;
pub mod sniff;

pub use adapter::{CallAdapter, IdentityAdapter, LoggingCallAdapter, LoggingCallAdapterFactory};
pub use call::{Call, Callback, Origin, Request, RequestBody};
pub use error::{Error, Result};
pub use intercept::LoggingCall;
pub use logger::{Logger, TracingLogger};
pub use response::{ErrorBody, Response};
