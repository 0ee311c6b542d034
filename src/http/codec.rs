//! Text codecs used on the request path and in generated listings.
//!
//! - URL decoding of request paths (`+` and `%XX` escapes)
//! - URL encoding of directory entry names for `href` targets
//! - HTML escaping of any text interpolated into markup

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};

/// Bytes left as-is when encoding: `[A-Za-z0-9.~_-]`.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'.')
    .remove(b'~')
    .remove(b'_')
    .remove(b'-');

/// Percent-decodes `s` into raw bytes.
///
/// `+` becomes a space first, then every `%XX` escape (hex digits in either
/// case) becomes the byte it names. A `%` that is not followed by two hex
/// digits is kept literally, along with whatever follows it.
pub fn decode_bytes(s: &str) -> Vec<u8> {
    let spaced: Vec<u8> = s
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();

    percent_decode(&spaced).collect()
}

/// Percent-decodes `s`, replacing byte sequences that are not UTF-8 with
/// U+FFFD.
///
/// # Example
///
/// ```
/// # use dirserve::http::codec::decode;
/// assert_eq!(decode("/my%20file+name.txt"), "/my file name.txt");
/// assert_eq!(decode("100%"), "100%");
/// ```
pub fn decode(s: &str) -> String {
    String::from_utf8_lossy(&decode_bytes(s)).into_owned()
}

/// Percent-encodes every byte outside `[A-Za-z0-9.~_-]` as `%XX`
/// (uppercase hex).
///
/// # Example
///
/// ```
/// # use dirserve::http::codec::encode;
/// assert_eq!(encode("<a&b>"), "%3Ca%26b%3E");
/// assert_eq!(encode("notes-v1.2_final~"), "notes-v1.2_final~");
/// ```
pub fn encode(s: impl AsRef<[u8]>) -> String {
    percent_encode(s.as_ref(), UNRESERVED).to_string()
}

/// Escapes `&`, `<`, `>`, `"` and `'` for inclusion in HTML text.
///
/// ```
/// # use dirserve::http::codec::html_escape;
/// assert_eq!(html_escape("<a&b>"), "&lt;a&amp;b&gt;");
/// ```
pub fn html_escape(s: &str) -> String {
    // The entities `encode_text` emits contain no quote characters.
    ::html_escape::encode_text(s)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
