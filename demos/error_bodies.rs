//! Demonstrates error-body reading, peeking, and plaintext sniffing.
//!
//! This example shows how to:
//! - Render an error body for display with `sniff::error_message`
//! - Peek an error body without consuming it
//! - See how binary payloads are refused
//!
//! Run with: `cargo run --example error_bodies`

use overhear::sniff::{error_message, is_plaintext};
use overhear::{Error, ErrorBody};

fn main() -> Result<(), Error> {
    // A plain-text error body renders as its text.
    let body = ErrorBody::new(
        "This request failed.",
        Some("text/plain; charset=utf-8"),
    );
    println!("text body    -> {:?}", error_message(&body)?);

    // A zero-length body renders as the empty string without any read.
    let body = ErrorBody::empty();
    println!("empty body   -> {:?}", error_message(&body)?);

    // A binary payload is refused: the PNG signature contains control
    // characters.
    let body = ErrorBody::new(&b"\x89PNG\r\n\x1a\n"[..], Some("image/png"));
    println!("binary body  -> {:?}", error_message(&body)?);

    // The sniffer can also be used directly.
    println!("sniff text   -> {}", is_plaintext(b"looks fine"));
    println!("sniff binary -> {}", is_plaintext(b"\x00\x01\x02"));

    // Peeking lets two consumers read the same body: the peeked view is
    // consumed here, the original afterwards.
    let body = ErrorBody::new("shared payload", Some("text/plain"));
    let peeked = body.peek();
    println!("peeked view  -> {:?}", error_message(&peeked)?);
    println!("original     -> {:?}", body.text()?);

    // But a single view is strictly one-shot.
    match body.text() {
        Err(Error::BodyConsumed) => println!("second read  -> already consumed"),
        other => println!("second read  -> unexpected: {:?}", other.map(|_| ())),
    }

    Ok(())
}
