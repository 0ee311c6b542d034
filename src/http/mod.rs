//! HTTP protocol implementation.
//!
//! This module implements a one-request-per-connection HTTP/1.1 server that
//! only answers `GET`.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection request-response state machine
//! - **`parser`**: parses the request line and headers from a byte buffer
//! - **`request`**: HTTP request representation and validation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: serializes and writes HTTP responses to the client
//! - **`codec`**: URL decoding/encoding and HTML escaping
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request head
//!        └──────┬──────┘
//!               │ Head received (malformed → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Validate, resolve, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write side
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! The listener spawns one [`connection::Connection`] per accepted socket:
//!
//! ```no_run
//! use dirserve::files::Resolver;
//! use dirserve::server::listener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     tracing_subscriber::fmt().init();
//!     listener::run("127.0.0.1:8080", Resolver::new(".")).await
//! }
//! ```

pub mod codec;
pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
