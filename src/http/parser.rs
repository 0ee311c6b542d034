use std::collections::HashMap;

use thiserror::Error;

use crate::http::request::Request;

/// Largest request head (request line plus headers) accepted from a client.
pub const MAX_HEAD_SIZE: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed request line")]
    InvalidRequestLine,
    #[error("malformed header line")]
    InvalidHeader,
    #[error("request head is not valid UTF-8")]
    InvalidEncoding,
    #[error("request head exceeds 64 KiB")]
    HeadTooLarge,
    #[error("request head is incomplete")]
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Status,
    Headers,
    Done,
}

/// Line-driven request head parser.
///
/// Feed it one line at a time, terminator already stripped. It moves from
/// `Status` to `Headers` after the request line and to `Done` on the first
/// empty line. Nothing past that line is ever looked at, so bodies are left
/// unread on the connection.
#[derive(Debug)]
pub struct RequestParser {
    state: ParseState,
    method: String,
    path: String,
    version: String,
    headers: HashMap<String, String>,
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Status,
            method: String::new(),
            path: String::new(),
            version: String::new(),
            headers: HashMap::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    pub fn feed_line(&mut self, line: &str) -> Result<(), ParseError> {
        match self.state {
            ParseState::Status => {
                let mut parts = line.split_whitespace();
                let (Some(method), Some(path), Some(version), None) =
                    (parts.next(), parts.next(), parts.next(), parts.next())
                else {
                    return Err(ParseError::InvalidRequestLine);
                };

                self.method = method.to_string();
                self.path = path.to_string();
                self.version = version.to_string();
                self.state = ParseState::Headers;
            }

            ParseState::Headers => {
                if line.is_empty() {
                    self.state = ParseState::Done;
                    return Ok(());
                }

                let (key, value) = line
                    .split_once(':')
                    .ok_or(ParseError::InvalidHeader)?;

                let key = key.trim();
                if key.is_empty() {
                    return Err(ParseError::InvalidHeader);
                }

                // Duplicate names overwrite.
                self.headers.insert(
                    key.to_ascii_lowercase(),
                    value.trim_start_matches([' ', '\t']).to_string(),
                );
            }

            ParseState::Done => {}
        }

        Ok(())
    }

    /// Produces the request once the terminating blank line has been seen.
    pub fn finish(self) -> Result<Request, ParseError> {
        if !self.is_done() {
            return Err(ParseError::Incomplete);
        }

        Ok(Request {
            method: self.method,
            path: self.path,
            version: self.version,
            headers: self.headers,
        })
    }
}

/// Parses a request head out of `buf`.
///
/// Returns the request and the number of bytes making up the head, or
/// `ParseError::Incomplete` if the blank line has not arrived yet. Lines may
/// end in `\r\n` or a bare `\n`.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    let mut parser = RequestParser::new();
    let mut start = 0;

    while let Some(offset) = buf[start..].iter().position(|&b| b == b'\n') {
        let end = start + offset;
        let raw = &buf[start..end];
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

        let line = std::str::from_utf8(raw).map_err(|_| ParseError::InvalidEncoding)?;
        parser.feed_line(line)?;

        start = end + 1;

        if parser.is_done() {
            return Ok((parser.finish()?, start));
        }

        if start > MAX_HEAD_SIZE {
            return Err(ParseError::HeadTooLarge);
        }
    }

    if buf.len() > MAX_HEAD_SIZE {
        return Err(ParseError::HeadTooLarge);
    }

    Err(ParseError::Incomplete)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn state_advances_line_by_line() {
        let mut parser = RequestParser::new();
        assert_eq!(parser.state, ParseState::Status);

        parser.feed_line("GET /a HTTP/1.1").unwrap();
        assert_eq!(parser.state, ParseState::Headers);

        parser.feed_line("Accept: */*").unwrap();
        assert_eq!(parser.state, ParseState::Headers);

        parser.feed_line("").unwrap();
        assert_eq!(parser.state, ParseState::Done);
    }

    #[test]
    fn finish_before_blank_line_is_incomplete() {
        let mut parser = RequestParser::new();
        parser.feed_line("GET / HTTP/1.1").unwrap();

        assert_eq!(parser.finish(), Err(ParseError::Incomplete));
    }
}
