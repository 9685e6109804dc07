//! The logger capability invoked by the interception layer.

use crate::sniff::error_message;
use crate::{Call, Error, RequestBody, Response};

/// A logger for the results of calls.
///
/// Implemented by the embedding application and invoked by
/// [`LoggingCall`](crate::LoggingCall) around every execution. These methods
/// are called on whatever thread the underlying transport delivers results
/// on; implementations must not block that thread for long and must not
/// mutate the call from within these methods.
///
/// For unsuccessful responses, `on_response` receives a response wrapping a
/// [peeked](crate::ErrorBody::peek) duplicate of the error body: the logger
/// may consume it freely, and the original caller still reads the untouched
/// original.
pub trait Logger<T>: Send + Sync {
    /// The call completed with a response (successful or not).
    fn on_response(&self, call: &dyn Call<T>, request_body: &RequestBody, response: &Response<T>);

    /// The call failed before producing a response.
    fn on_failure(&self, call: &dyn Call<T>, request_body: &RequestBody, error: &Error);
}

impl<T, L> Logger<T> for std::sync::Arc<L>
where
    L: Logger<T> + ?Sized,
{
    fn on_response(&self, call: &dyn Call<T>, request_body: &RequestBody, response: &Response<T>) {
        (**self).on_response(call, request_body, response)
    }

    fn on_failure(&self, call: &dyn Call<T>, request_body: &RequestBody, error: &Error) {
        (**self).on_failure(call, request_body, error)
    }
}

/// A ready-made [`Logger`] that renders results as `tracing` events.
///
/// Successful responses log at `info`, non-success statuses and failures at
/// `warn`. Plain-text error bodies are included in the event; binary ones are
/// reported only by length.
///
/// # Examples
///
/// ```
/// use overhear::{LoggingCallAdapterFactory, TracingLogger};
///
/// let factory = LoggingCallAdapterFactory::new(TracingLogger);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl<T> Logger<T> for TracingLogger {
    fn on_response(&self, call: &dyn Call<T>, request_body: &RequestBody, response: &Response<T>) {
        let url = call.request().map(|r| r.url.to_string()).ok();
        let url = url.as_deref().unwrap_or("unknown");
        if response.is_successful() {
            tracing::info!(
                url,
                status = response.status().as_u16(),
                request_body = ?request_body.as_value(),
                "Call completed"
            );
            return;
        }
        // The peeked duplicate is ours to consume.
        let rendered = response
            .error_body()
            .map(error_message)
            .transpose()
            .ok()
            .flatten()
            .flatten();
        match rendered {
            Some(message) => tracing::warn!(
                url,
                status = response.status().as_u16(),
                request_body = ?request_body.as_value(),
                error_body = %message,
                "Call completed with error status"
            ),
            None => tracing::warn!(
                url,
                status = response.status().as_u16(),
                request_body = ?request_body.as_value(),
                error_body_bytes = response
                    .error_body()
                    .map(|b| b.content_length())
                    .unwrap_or(0),
                "Call completed with non-text error body"
            ),
        }
    }

    fn on_failure(&self, call: &dyn Call<T>, request_body: &RequestBody, error: &Error) {
        let url = call.request().map(|r| r.url.to_string()).ok();
        tracing::warn!(
            url = url.as_deref().unwrap_or("unknown"),
            unbuilt_request = request_body.is_unbuilt(),
            error = %error,
            "Call failed"
        );
    }
}
