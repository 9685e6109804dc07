//! Call adapters and the logging adapter factory.
//!
//! A call adapter turns a raw [`Call`] into the return shape a call site
//! actually wants (the call itself, a future, a stripped-down handle, and so
//! on). [`LoggingCallAdapterFactory`] slots the logging wrapper in front of
//! any such adapter: the next adapter in the chain receives a
//! [`LoggingCall`] and behaves exactly as it would have without logging.

use crate::{Call, Logger, LoggingCall};
use std::sync::Arc;

/// Translates a raw call into an application-facing return type.
pub trait CallAdapter<T>: Send + Sync {
    /// The user-facing type produced from a call.
    type Output;

    /// Adapts `call` into the user-facing return type.
    fn adapt(&self, call: Box<dyn Call<T>>) -> Self::Output;
}

/// The trivial adapter: the user-facing type is the call itself.
///
/// This is the framework's default return shape and the usual tail of an
/// adapter chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAdapter;

impl<T: 'static> CallAdapter<T> for IdentityAdapter {
    type Output = Box<dyn Call<T>>;

    fn adapt(&self, call: Box<dyn Call<T>>) -> Self::Output {
        call
    }
}

/// Produces [`LoggingCallAdapter`]s that report every call's result to one
/// shared logger.
///
/// # Examples
///
/// ```
/// use overhear::{IdentityAdapter, LoggingCallAdapterFactory, TracingLogger};
///
/// let factory = LoggingCallAdapterFactory::new(TracingLogger);
/// // Per call site: wrap whatever adapter would otherwise run.
/// let adapter = factory.wrap::<String, _>(IdentityAdapter);
/// ```
pub struct LoggingCallAdapterFactory<L> {
    logger: Arc<L>,
}

impl<L> LoggingCallAdapterFactory<L> {
    /// Creates a factory whose adapters report to `logger`.
    pub fn new(logger: L) -> Self {
        Self {
            logger: Arc::new(logger),
        }
    }

    /// Wraps the next adapter in the chain for one call site.
    pub fn wrap<T, A>(&self, next: A) -> LoggingCallAdapter<A, L>
    where
        A: CallAdapter<T>,
        L: Logger<T>,
    {
        LoggingCallAdapter {
            delegate: next,
            logger: Arc::clone(&self.logger),
        }
    }
}

/// A [`CallAdapter`] that wraps each call in a [`LoggingCall`] before
/// handing it to the next adapter in the chain.
///
/// The delegate adapter's output type and behavior are untouched; it simply
/// operates on an instrumented call.
pub struct LoggingCallAdapter<A, L> {
    delegate: A,
    logger: Arc<L>,
}

impl<T, A, L> CallAdapter<T> for LoggingCallAdapter<A, L>
where
    T: 'static,
    A: CallAdapter<T>,
    L: Logger<T> + 'static,
{
    type Output = A::Output;

    fn adapt(&self, call: Box<dyn Call<T>>) -> Self::Output {
        let logger: Arc<dyn Logger<T>> = self.logger.clone();
        self.delegate.adapt(Box::new(LoggingCall::new(logger, call)))
    }
}
