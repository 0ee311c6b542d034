use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::files::Resolver;
use crate::http::connection::Connection;

pub async fn bind(listen_addr: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accepts connections forever, one task per connection.
///
/// A failure inside a connection is logged and stays inside its task.
pub async fn serve(listener: TcpListener, resolver: Resolver) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::warn!(error = %e, "accept failed");
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let resolver = resolver.clone();
        let span = tracing::info_span!("conn", %peer);
        tokio::spawn(
            async move {
                let mut conn = Connection::new(socket, resolver);
                if let Err(e) = conn.run().await {
                    tracing::warn!(error = %e, "connection aborted");
                }
            }
            .instrument(span),
        );
    }
}

pub async fn run(listen_addr: &str, resolver: Resolver) -> anyhow::Result<()> {
    let listener = bind(listen_addr).await?;
    serve(listener, resolver).await
}
