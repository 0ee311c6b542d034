use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes the status line and header block, including the blank line
/// that separates it from the body.
///
/// Headers are emitted in name order so output is stable.
pub fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    let mut headers: Vec<_> = resp.headers.iter().collect();
    headers.sort();
    for (k, v) in headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes one response to a stream: the serialized head followed by the
/// body, with file bodies copied straight from disk.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response) -> Self {
        let mut buffer = serialize_head(&response);
        let body = match response.body {
            Body::Bytes(bytes) => {
                buffer.extend_from_slice(&bytes);
                Body::Empty
            }
            other => other,
        };

        Self {
            buffer,
            written: 0,
            body,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        if let Body::File { file, len } = &mut self.body {
            let expected = *len;
            let copied = tokio::io::copy(&mut file.take(expected), stream)
                .await
                .context("streaming file body")?;

            if copied != expected {
                anyhow::bail!("file shrank while streaming: sent {copied} of {expected} bytes");
            }
        }

        stream.flush().await?;
        Ok(())
    }
}
