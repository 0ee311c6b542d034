use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Serve static files and directory listings over HTTP/1.1.
#[derive(Debug, Parser)]
#[command(name = "dirserve", version, about, long_about = None)]
pub struct Cli {
    /// Address to bind [default: 0.0.0.0]
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on [default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve [default: current directory]
    #[arg(short, long = "directory")]
    pub directory: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds the final configuration: file (if given), then environment,
    /// then these flags.
    pub fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        cfg.apply_env()?;

        if let Some(bind) = self.bind {
            cfg.bind = bind;
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(directory) = self.directory {
            cfg.root = directory;
        }

        Ok(cfg)
    }
}
