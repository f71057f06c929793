//! Server configuration.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. a YAML file (`--config <FILE>` or `SIMPLE_CONFIG`)
//! 3. environment variables `LISTEN`, `DOC_ROOT`, `MAX_CONNECTIONS`
//! 4. command line arguments
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8080"
//!   max_connections: 25
//! static_files:
//!   root: "/srv/www"
//!   index_file: "index.html"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use crate::server::admission::DEFAULT_MAX_CONNECTIONS;

/// Lowest port the server agrees to listen on.
pub const MIN_PORT: u16 = 1024;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Document root every URI is resolved under
    pub root: PathBuf,
    /// File served for `/`
    pub index_file: String,
}

/// Command line of the `simple-server` binary.
#[derive(Debug, Default, Parser)]
#[command(name = "simple-server", version, about = "Minimal static file HTTP server")]
pub struct Cli {
    /// Port to listen on (keeps the configured host)
    pub port: Option<u16>,

    /// Document root
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, env = "SIMPLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of connections served at once
    #[arg(short = 'm', long)]
    pub max_connections: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index_file: "index.html".to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration for the binary from every layer.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        base.with_env(|key| std::env::var(key).ok())?.with_cli(cli)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Applies environment overrides, reading variables through `lookup`.
    pub fn with_env<F>(mut self, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup("DOC_ROOT") {
            self.static_files.root = PathBuf::from(root);
        }
        if let Some(max) = lookup("MAX_CONNECTIONS") {
            self.server.max_connections = max
                .parse()
                .with_context(|| format!("MAX_CONNECTIONS is not a number: {max:?}"))?;
        }
        Ok(self)
    }

    pub fn with_cli(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(port) = cli.port {
            let mut addr = self.socket_addr()?;
            addr.set_port(port);
            self.server.listen_addr = addr.to_string();
        }
        if let Some(root) = &cli.root {
            self.static_files.root = root.clone();
        }
        if let Some(max) = cli.max_connections {
            self.server.max_connections = max;
        }
        Ok(self)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .listen_addr
            .parse()
            .with_context(|| format!("invalid listen address {:?}", self.server.listen_addr))
    }

    /// Checks everything that must hold before the accept loop starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        let addr = self.socket_addr()?;
        if addr.port() < MIN_PORT {
            bail!("port must be in range {MIN_PORT} to 65535, got {}", addr.port());
        }

        if self.server.max_connections == 0 {
            bail!("max_connections must be at least 1");
        }

        if self.static_files.index_file.is_empty() || self.static_files.index_file.contains('/') {
            bail!("index_file must be a plain file name, got {:?}", self.static_files.index_file);
        }

        let root = &self.static_files.root;
        let meta = std::fs::metadata(root)
            .with_context(|| format!("document root {} is not accessible", root.display()))?;
        if !meta.is_dir() {
            bail!("document root {} is not a directory", root.display());
        }

        Ok(())
    }
}
