use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Server settings, fixed at startup.
///
/// Built from defaults, then an optional YAML file, then `DIRSERVE_*`
/// environment variables, then command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address to bind
    pub bind: String,
    /// Port to listen on
    pub port: u16,
    /// Directory to serve
    pub root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Parses a YAML document. Missing keys keep their defaults.
    ///
    /// ```yaml
    /// bind: 127.0.0.1
    /// port: 9000
    /// root: /srv/www
    /// ```
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid configuration")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&yaml).with_context(|| format!("in config file {}", path.display()))
    }

    /// Overrides fields from `DIRSERVE_BIND`, `DIRSERVE_PORT` and
    /// `DIRSERVE_ROOT` when they are set.
    pub fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(bind) = std::env::var("DIRSERVE_BIND") {
            self.bind = bind;
        }

        if let Ok(port) = std::env::var("DIRSERVE_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("DIRSERVE_PORT={port:?} is not a valid port"))?;
        }

        if let Ok(root) = std::env::var("DIRSERVE_ROOT") {
            self.root = PathBuf::from(root);
        }

        Ok(())
    }

    /// `bind:port`, bracketing IPv6 literals.
    pub fn listen_addr(&self) -> String {
        if self.bind.contains(':') && !self.bind.starts_with('[') {
            format!("[{}]:{}", self.bind, self.port)
        } else {
            format!("{}:{}", self.bind, self.port)
        }
    }
}
