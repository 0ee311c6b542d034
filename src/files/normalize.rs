//! Logical path normalization.
//!
//! Collapses a slash-delimited path into its canonical absolute form. The
//! result never contains a `..` segment and can never climb above `/`:
//! excess `..` segments at the root are dropped.

/// Normalizes `path` into an absolute, `.`/`..`-free form.
///
/// The input is treated as rooted whether or not it starts with `/`.
/// Repeated slashes collapse and trailing slashes are not preserved.
///
/// # Example
///
/// ```
/// # use dirserve::files::normalize::normalize;
/// assert_eq!(normalize("../../etc/passwd"), "/etc/passwd");
/// assert_eq!(normalize("/usr/bin/../lib//./"), "/usr/lib");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(path: &str) -> String {
    // Splitting on `/` never cuts a UTF-8 sequence, so nothing is replaced.
    String::from_utf8_lossy(&normalize_bytes(path.as_bytes())).into_owned()
}

/// Byte-level [`normalize`], for decoded paths that need not be UTF-8.
pub fn normalize_bytes(path: &[u8]) -> Vec<u8> {
    let mut stack: Vec<&[u8]> = Vec::new();

    for segment in path.split(|&b| b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                stack.pop();
            }
            other => stack.push(other),
        }
    }

    let mut out = Vec::with_capacity(path.len() + 1);
    out.push(b'/');
    out.extend_from_slice(&stack.join(&b'/'));
    out
}
