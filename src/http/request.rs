use std::collections::HashMap;

use thiserror::Error;

/// The only protocol version the server speaks.
pub const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// The only method the server answers.
pub const SUPPORTED_METHOD: &str = "GET";

/// A request rejected after parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported HTTP version {0:?}")]
    UnsupportedVersion(String),
    #[error("unsupported method {0:?}")]
    UnsupportedMethod(String),
    #[error("request target {0:?} is not an absolute path")]
    RelativePath(String),
}

/// A parsed HTTP request head.
///
/// Built once per connection by the parser and never mutated afterwards.
/// Request bodies are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The method token exactly as sent (e.g. "GET")
    pub method: String,
    /// The raw request target, query string included (e.g. "/docs/a%20b?x=1")
    pub path: String,
    /// HTTP version token (e.g. "HTTP/1.1")
    pub version: String,
    /// Headers keyed by lower-cased name; the last occurrence wins
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Checks that the request is one this server is willing to answer:
    /// `GET`, `HTTP/1.1`, and an origin-form target starting with `/`.
    ///
    /// The method comparison is case-sensitive.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version != SUPPORTED_VERSION {
            return Err(ValidationError::UnsupportedVersion(self.version.clone()));
        }

        if self.method != SUPPORTED_METHOD {
            return Err(ValidationError::UnsupportedMethod(self.method.clone()));
        }

        if !self.path.starts_with('/') {
            return Err(ValidationError::RelativePath(self.path.clone()));
        }

        Ok(())
    }
}

/// Splits a request target into its path and optional query (without `?`).
pub fn split_query(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}
