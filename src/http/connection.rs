use std::io;
use std::path::Path;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::files::listing;
use crate::files::resolver::{Resolver, Target, logical_path};
use crate::http::mime;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::{Request, split_query};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::http::writer::ResponseWriter;

/// One client connection, handled from first byte to close.
///
/// A connection answers at most one request. It owns its stream and shares
/// nothing mutable with other connections.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    resolver: Resolver,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What arrived on the wire.
#[derive(Debug)]
pub enum Incoming {
    Request(Request),
    Malformed(ParseError),
    /// The peer closed before sending a complete request head.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, resolver: Resolver) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            resolver,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Malformed(e) => {
                            tracing::warn!(error = %e, "rejecting malformed request");
                            ConnectionState::Writing(ResponseWriter::new(Response::bad_request()))
                        }
                        Incoming::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.handle_request(&req).await;

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "request served"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.stream.shutdown().await?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> io::Result<Incoming> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    // Anything past the head (a body) is left unread.
                    let _ = self.buffer.split_to(consumed);
                    return Ok(Incoming::Request(request));
                }

                Err(ParseError::Incomplete) => {}

                Err(e) => return Ok(Incoming::Malformed(e)),
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                return Ok(Incoming::Closed);
            }
        }
    }

    async fn handle_request(&self, req: &Request) -> Response {
        if let Err(e) = req.validate() {
            tracing::warn!(error = %e, "rejecting request");
            return Response::bad_request();
        }

        let target = self.resolver.resolve(&req.path).await;
        respond(target, &req.path).await
    }
}

/// Builds the response for a resolved target.
///
/// `raw_path` is the request target as sent; its trailing slash decides
/// between redirecting and serving a directory.
pub async fn respond(target: Target, raw_path: &str) -> Response {
    match target {
        Target::File(path) => serve_file(&path).await,

        Target::Directory { path, index } => {
            let (path_only, query) = split_query(raw_path);

            if !path_only.ends_with('/') {
                let location = match query {
                    Some(query) => format!("{path_only}/?{query}"),
                    None => format!("{path_only}/"),
                };
                return Response::redirect(location);
            }

            match index {
                Some(index) => serve_file(&index).await,
                None => serve_listing(&path, raw_path).await,
            }
        }

        Target::NotFound => Response::not_found(),
    }
}

async fn serve_file(path: &Path) -> Response {
    let opened = async {
        let file = tokio::fs::File::open(path).await?;
        let len = file.metadata().await?.len();
        io::Result::Ok((file, len))
    }
    .await;

    match opened {
        Ok((file, len)) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", mime::content_type(&path.to_string_lossy()))
            .file(file, len)
            .build(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Response::not_found(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open file");
            Response::internal_error()
        }
    }
}

async fn serve_listing(dir: &Path, raw_path: &str) -> Response {
    let mut title = logical_path(raw_path);
    if !title.ends_with('/') {
        title.push('/');
    }

    match listing::render(dir, &title).await {
        Ok(html) => Response::ok("text/html; charset=utf-8", html),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot list directory");
            Response::internal_error()
        }
    }
}
