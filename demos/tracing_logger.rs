//! Demonstrates wrapping a real HTTP call with the ready-made
//! [`TracingLogger`].
//!
//! This example shows how to:
//! - Implement the `Call` trait over an existing HTTP client
//! - Attach the `Origin` record the logging layer requires
//! - Wrap the call through `LoggingCallAdapterFactory`
//! - Watch results arrive as `tracing` events
//!
//! Run with: `cargo run --example tracing_logger`

use http::Method;
use overhear::{
    Call, CallAdapter, Callback, Error, ErrorBody, IdentityAdapter, LoggingCallAdapterFactory,
    Origin, Request, Response, TracingLogger,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A minimal call implementation over `reqwest::blocking`, standing in for
/// an embedding call framework.
struct HttpCall {
    client: reqwest::blocking::Client,
    request: Request,
    executed: Arc<AtomicBool>,
    canceled: Arc<AtomicBool>,
}

impl HttpCall {
    fn get(url: &str) -> Result<Self, Error> {
        let url = url
            .parse()
            .map_err(|e| Error::Configuration(format!("Invalid URL: {}", e)))?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            request: Request::new(Method::GET, url).with_origin(Origin::new()),
            executed: Arc::new(AtomicBool::new(false)),
            canceled: Arc::new(AtomicBool::new(false)),
        })
    }
}

impl Call<String> for HttpCall {
    fn execute(&mut self) -> overhear::Result<Response<String>> {
        self.executed.store(true, Ordering::SeqCst);
        let response = self
            .client
            .request(self.request.method.clone(), self.request.url.clone())
            .send()
            .map_err(|e| {
                Error::Network(std::io::Error::new(std::io::ErrorKind::Other, e))
            })?;

        let status = response.status();
        let headers = response.headers().clone();
        if status.is_success() {
            let body = response.text().map_err(|e| Error::Decode {
                message: e.to_string(),
                status,
            })?;
            Response::success(status, headers, body)
        } else {
            let content_type = headers
                .get(http::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let bytes = response.bytes().map_err(|e| Error::Decode {
                message: e.to_string(),
                status,
            })?;
            Response::error(status, headers, ErrorBody::new(bytes, content_type.as_deref()))
        }
    }

    fn enqueue(&mut self, callback: Box<dyn Callback<String>>) {
        let mut call = HttpCall {
            client: self.client.clone(),
            request: self.request.clone(),
            executed: Arc::clone(&self.executed),
            canceled: Arc::clone(&self.canceled),
        };
        self.executed.store(true, Ordering::SeqCst);
        std::thread::spawn(move || match call.execute() {
            Ok(response) => callback.on_response(&call, response),
            Err(error) => callback.on_failure(&call, error),
        });
    }

    fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    fn is_executed(&self) -> bool {
        self.executed.load(Ordering::SeqCst)
    }

    fn request(&self) -> overhear::Result<Request> {
        Ok(self.request.clone())
    }

    fn timeout(&self) -> Option<Duration> {
        Some(Duration::from_secs(30))
    }

    fn clone_call(&self) -> Box<dyn Call<String>> {
        Box::new(HttpCall {
            client: self.client.clone(),
            request: self.request.clone(),
            executed: Arc::new(AtomicBool::new(false)),
            canceled: Arc::new(AtomicBool::new(false)),
        })
    }
}

fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("overhear=debug,tracing_logger=info")
        .init();

    let factory = LoggingCallAdapterFactory::new(TracingLogger);
    let adapter = factory.wrap::<String, _>(IdentityAdapter);

    // A request that succeeds: logged at info.
    let raw: Box<dyn Call<String>> =
        Box::new(HttpCall::get("https://jsonplaceholder.typicode.com/posts/1")?);
    let mut call = adapter.adapt(raw);
    let response = call.execute()?;
    println!(
        "fetched {} bytes with status {}",
        response.body().map(String::len).unwrap_or(0),
        response.status()
    );

    // A request that hits a 404: the error body is peeked and logged at
    // warn, and stays readable here.
    let raw: Box<dyn Call<String>> =
        Box::new(HttpCall::get("https://jsonplaceholder.typicode.com/no-such-route")?);
    let mut call = adapter.adapt(raw);
    let response = call.execute()?;
    if let Some(error_body) = response.error_body() {
        println!(
            "caller still owns the error body: {} bytes",
            error_body.content_length()
        );
    }

    Ok(())
}
