//! Percent-encoding for query-string fragments.
//!
//! Every byte outside the RFC 3986 unreserved set (`A-Z a-z 0-9 - _ . ~`) is
//! written as `%XX` using uppercase hex. Multi-byte UTF-8 characters are
//! encoded byte by byte, so `"é"` becomes `%C3%A9`.
//!
//! [`encode_bounded`] caps the output length. When the cap is hit, encoding
//! stops at the last whole unit (a literal byte or a full `%XX` triple), so
//! the result is always a prefix of [`encode`] and never ends in a partial
//! escape.

/// Returns true for bytes that may appear unescaped in a query value.
pub fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encodes `input` without any length limit.
///
/// # Example
///
/// ```
/// use sclink::encoding::encode;
///
/// assert_eq!(encode("daft punk"), "daft%20punk");
/// assert_eq!(encode("soundcloud:tracks:1"), "soundcloud%3Atracks%3A1");
/// ```
pub fn encode(input: &str) -> String {
    urlencoding::encode(input).into_owned()
}

/// Percent-encodes `input`, producing at most `max_len` bytes.
///
/// Truncation is silent but deterministic: the output is the longest prefix
/// of `encode(input)` that ends on a unit boundary and fits in `max_len`.
pub fn encode_bounded(input: &str, max_len: usize) -> String {
    let full = urlencoding::encode(input);
    if full.len() <= max_len {
        return full.into_owned();
    }

    // a literal '%' is itself escaped, so every '%' in the output starts a triple
    let bytes = full.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let unit = if bytes[end] == b'%' { 3 } else { 1 };
        if end + unit > max_len {
            break;
        }
        end += unit;
    }

    full[..end].to_string()
}
