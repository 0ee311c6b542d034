use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dirserve::cli::Cli;
use dirserve::files::Resolver;
use dirserve::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Cli::parse().into_config()?;

    std::env::set_current_dir(&cfg.root)
        .with_context(|| format!("cannot serve {}", cfg.root.display()))?;
    tracing::info!(root = %cfg.root.display(), "Serving directory");

    let listen_addr = cfg.listen_addr();

    tokio::select! {
        res = server::listener::run(&listen_addr, Resolver::new(".")) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
