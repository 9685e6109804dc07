//! The call wrapper that injects logger notifications around execution.

use crate::{Call, Callback, Error, Logger, Request, RequestBody, Response, Result};
use std::sync::Arc;
use std::time::Duration;

/// A [`Call`] that notifies a [`Logger`] of every result while behaving, in
/// every other respect, exactly like the call it wraps.
///
/// `execute` and `enqueue` are intercepted; `cancel`, `is_canceled`,
/// `is_executed`, `request` and `timeout` are pure pass-throughs with zero
/// added behavior. `clone_call` is a deep clone: the delegate is cloned and
/// re-wrapped with the same logger, so wrappers are never shared between
/// clones.
///
/// Callers observe exactly the responses and errors the delegate would have
/// produced; logging is a pure side effect inserted around them.
///
/// # Fatal conditions
///
/// Recoverable failures are `Err` values and are always reported to the
/// logger before being returned. Fatal runtime conditions are panics, and
/// the wrapper never catches a panic: they unwind past it, on both the
/// synchronous path and the dispatcher thread, without reaching the logger.
/// Logging inside a compromised execution environment would be unreliable
/// and could mask the original condition.
pub struct LoggingCall<T> {
    logger: Arc<dyn Logger<T>>,
    delegate: Box<dyn Call<T>>,
}

impl<T: 'static> LoggingCall<T> {
    /// Wraps `delegate`, reporting its results to `logger`.
    pub fn new(logger: Arc<dyn Logger<T>>, delegate: Box<dyn Call<T>>) -> Self {
        Self { logger, delegate }
    }

    /// The request-body value to report alongside this call's result.
    ///
    /// A request that cannot be built yields [`RequestBody::Unbuilt`]; the
    /// `execute` or `enqueue` that follows surfaces the build error itself.
    ///
    /// # Panics
    ///
    /// Panics if the built request has no [`Origin`](crate::Origin) record.
    /// That record is attached at construction time by the call framework;
    /// its absence is an integration bug, not a runtime condition, and is
    /// never reported through the logger.
    fn request_body(&self) -> RequestBody {
        let request = match self.delegate.request() {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(
                    error = %error,
                    "Request could not be built; logging the unbuilt sentinel"
                );
                return RequestBody::Unbuilt;
            }
        };
        let Some(origin) = request.origin else {
            tracing::error!(
                method = %request.method,
                url = %request.url,
                "Request is missing its Origin record"
            );
            panic!(
                "Missing Origin record. The call framework must attach an Origin \
                 to every request routed through the logging adapter."
            );
        };
        match origin.body {
            Some(value) => RequestBody::Value(value),
            None => RequestBody::None,
        }
    }
}

/// Reports a completed response, routing non-success responses through a
/// peeked duplicate so the logger cannot consume the caller's error body.
fn log_response<T>(
    logger: &dyn Logger<T>,
    call: &dyn Call<T>,
    request_body: &RequestBody,
    response: &Response<T>,
) {
    match response.peeked() {
        Some(peeked) => logger.on_response(call, request_body, &peeked),
        None => logger.on_response(call, request_body, response),
    }
}

impl<T: 'static> Call<T> for LoggingCall<T> {
    fn execute(&mut self) -> Result<Response<T>> {
        let request_body = self.request_body();
        match self.delegate.execute() {
            Ok(response) => {
                log_response(&*self.logger, self, &request_body, &response);
                Ok(response)
            }
            Err(error) => {
                self.logger.on_failure(self, &request_body, &error);
                Err(error)
            }
        }
    }

    fn enqueue(&mut self, callback: Box<dyn Callback<T>>) {
        let request_body = self.request_body();
        self.delegate.enqueue(Box::new(LoggingCallback {
            logger: Arc::clone(&self.logger),
            request_body,
            inner: callback,
        }));
    }

    fn cancel(&self) {
        self.delegate.cancel()
    }

    fn is_canceled(&self) -> bool {
        self.delegate.is_canceled()
    }

    fn is_executed(&self) -> bool {
        self.delegate.is_executed()
    }

    fn request(&self) -> Result<Request> {
        self.delegate.request()
    }

    fn timeout(&self) -> Option<Duration> {
        self.delegate.timeout()
    }

    fn clone_call(&self) -> Box<dyn Call<T>> {
        Box::new(LoggingCall {
            logger: Arc::clone(&self.logger),
            delegate: self.delegate.clone_call(),
        })
    }
}

/// The callback registered with the delegate by `enqueue`: logs the result,
/// then forwards it to the caller's callback.
struct LoggingCallback<T> {
    logger: Arc<dyn Logger<T>>,
    request_body: RequestBody,
    inner: Box<dyn Callback<T>>,
}

impl<T: 'static> Callback<T> for LoggingCallback<T> {
    fn on_response(self: Box<Self>, call: &dyn Call<T>, response: Response<T>) {
        log_response(&*self.logger, call, &self.request_body, &response);
        self.inner.on_response(call, response);
    }

    fn on_failure(self: Box<Self>, call: &dyn Call<T>, error: Error) {
        // Unconditional, unlike execute's fatal filtering: the dispatcher's
        // failure channel only ever carries Err values, since a panic on the
        // dispatcher thread unwinds it instead of invoking the callback.
        self.logger.on_failure(call, &self.request_body, &error);
        self.inner.on_failure(call, error);
    }
}
