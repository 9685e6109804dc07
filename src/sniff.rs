//! Heuristics for rendering error bodies as loggable text.
//!
//! Error bodies are frequently binary (protobuf, gzip, images). Before
//! displaying one, [`error_message`] samples its prefix with
//! [`is_plaintext`] and refuses to decode anything that looks like a binary
//! signature.

use crate::{ErrorBody, Result};

/// Number of bytes sampled from the front of a buffer when sniffing.
const SNIFF_BYTES: usize = 64;

/// Number of decoded characters inspected within the sampled prefix.
const SNIFF_CHARS: usize = 16;

/// Reads an [`ErrorBody`] as a string, or `None` if the content does not
/// look like plain text.
///
/// Useful for rendering error bodies for display or logging. Consumes the
/// body it is given; pass a [`peek`](ErrorBody::peek)ed view when the
/// original must stay readable.
///
/// A zero-length body returns the empty string without performing any read.
///
/// # Errors
///
/// Returns [`Error::BodyConsumed`](crate::Error::BodyConsumed) if the body
/// was already read.
///
/// # Examples
///
/// ```
/// use overhear::{sniff::error_message, ErrorBody};
///
/// let text = ErrorBody::new("This request failed.", Some("text/plain"));
/// assert_eq!(error_message(&text)?, Some("This request failed.".to_string()));
///
/// let png = ErrorBody::new(&b"\x89PNG\r\n\x1a\n"[..], Some("image/png"));
/// assert_eq!(error_message(&png)?, None);
/// # Ok::<(), overhear::Error>(())
/// ```
pub fn error_message(error_body: &ErrorBody) -> Result<Option<String>> {
    if error_body.content_length() == 0 {
        return Ok(Some(String::new()));
    }
    let bytes = error_body.read()?;
    if !is_plaintext(&bytes) {
        tracing::debug!(
            content_type = error_body.content_type().unwrap_or("unknown"),
            content_length = bytes.len(),
            "Error body is not plain text; not rendering it"
        );
        return Ok(None);
    }
    let bytes = bytes
        .strip_prefix(b"\xef\xbb\xbf".as_slice())
        .unwrap_or(&bytes);
    Ok(Some(String::from_utf8_lossy(bytes).into_owned()))
}

/// Returns `true` if the buffer probably contains human-readable text.
///
/// Inspects up to 16 decoded characters from the first 64 bytes. A
/// non-whitespace control character disqualifies the buffer, as does a
/// multi-byte UTF-8 sequence truncated at the sample boundary. Ill-formed
/// sequences inside the sample decode as U+FFFD and do not disqualify. This
/// is a heuristic: false positives and negatives on exotic encodings are
/// acceptable.
pub fn is_plaintext(bytes: &[u8]) -> bool {
    let mut rest = &bytes[..bytes.len().min(SNIFF_BYTES)];
    let mut inspected = 0;
    while inspected < SNIFF_CHARS && !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                for c in valid.chars().take(SNIFF_CHARS - inspected) {
                    if c.is_control() && !c.is_whitespace() {
                        return false;
                    }
                }
                return true;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // valid_up_to marks a char boundary, so this cannot fail.
                for c in std::str::from_utf8(valid)
                    .unwrap()
                    .chars()
                    .take(SNIFF_CHARS - inspected)
                {
                    if c.is_control() && !c.is_whitespace() {
                        return false;
                    }
                    inspected += 1;
                }
                if inspected >= SNIFF_CHARS {
                    return true;
                }
                match e.error_len() {
                    // Ill-formed sequence: reads as U+FFFD, keep going.
                    Some(len) => {
                        inspected += 1;
                        rest = &after[len..];
                    }
                    // Truncated sequence at the sample boundary.
                    None => return false,
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_ascii_is_plaintext() {
        assert!(is_plaintext(b"This request failed."));
        assert!(is_plaintext(b"line one\nline two\ttabbed"));
    }

    #[test]
    fn test_empty_buffer_is_plaintext() {
        assert!(is_plaintext(b""));
    }

    #[test]
    fn test_control_characters_are_not_plaintext() {
        // PNG signature opens with 0x89 (ill-formed, reads as U+FFFD) but
        // contains 0x1a (SUB) within the first 16 characters.
        assert!(!is_plaintext(b"\x89PNG\r\n\x1a\n"));
        assert!(!is_plaintext(b"\x00\x01\x02"));
        assert!(!is_plaintext(b"text then \x07 bell"));
    }

    #[test]
    fn test_control_character_beyond_sample_is_ignored() {
        let mut buffer = vec![b'a'; 16];
        buffer.push(0x00);
        assert!(is_plaintext(&buffer));
    }

    #[test]
    fn test_multibyte_text_is_plaintext() {
        assert!(is_plaintext("привет мир".as_bytes()));
        assert!(is_plaintext("日本語のエラー".as_bytes()));
    }

    #[test]
    fn test_truncated_multibyte_sequence_is_not_plaintext() {
        // First two bytes of a three-byte sequence, cut at the end.
        let mut buffer = b"ok ".to_vec();
        buffer.extend_from_slice(&"é".as_bytes()[..1]);
        assert!(!is_plaintext(&buffer));
    }

    #[test]
    fn test_sample_is_limited_to_prefix() {
        // 64 'a's, then binary garbage: only the prefix is sampled.
        let mut buffer = vec![b'a'; SNIFF_BYTES];
        buffer.extend_from_slice(&[0x00, 0x01, 0x02]);
        assert!(is_plaintext(&buffer));
    }

    #[test]
    fn test_error_message_empty_body_returns_empty_string() {
        let body = ErrorBody::empty();
        assert_eq!(error_message(&body).unwrap(), Some(String::new()));
        // No read happened; the body is still consumable.
        assert!(body.read().is_ok());
    }

    #[test]
    fn test_error_message_plaintext_body() {
        let body = ErrorBody::new("not found", Some("text/plain; charset=utf-8"));
        assert_eq!(error_message(&body).unwrap(), Some("not found".to_string()));
    }

    #[test]
    fn test_error_message_binary_body_returns_none() {
        let body = ErrorBody::new(&b"\x00\x01\x02\x03"[..], Some("application/octet-stream"));
        assert_eq!(error_message(&body).unwrap(), None);
    }

    #[test]
    fn test_error_message_consumes_the_body() {
        let body = ErrorBody::new("gone", None);
        error_message(&body).unwrap();
        assert!(body.read().is_err());
    }
}
