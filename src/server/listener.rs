use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, StaticFilesConfig};
use crate::http::connection::Connection;
use crate::server::admission::AdmissionController;

/// A bound listening socket plus everything each connection needs.
pub struct Server {
    listener: TcpListener,
    static_files: StaticFilesConfig,
    admission: AdmissionController,
}

impl Server {
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&cfg.server.listen_addr)
            .await
            .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;

        Ok(Self {
            listener,
            static_files: cfg.static_files.clone(),
            admission: AdmissionController::new(cfg.server.max_connections),
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Handle on the admission counter shared with every connection.
    pub fn admission(&self) -> AdmissionController {
        self.admission.clone()
    }

    /// Accepts connections forever, one task each. Only an accept failure
    /// ends the loop.
    pub async fn run(self) -> anyhow::Result<()> {
        info!(
            root = %self.static_files.root.display(),
            limit = self.admission.limit(),
            "Listening on {}",
            self.local_addr()?
        );

        loop {
            let (socket, peer) = self.listener.accept().await.context("accept failed")?;
            tracing::debug!("Accepted connection from {}", peer);

            let static_files = self.static_files.clone();
            let admission = self.admission.clone();
            tokio::spawn(async move {
                let mut conn = Connection::new(socket, static_files, admission);
                if let Err(e) = conn.run().await {
                    tracing::error!("Connection error from {}: {}", peer, e);
                }
                tracing::debug!("Closed connection from {}", peer);
            });
        }
    }
}

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    Server::bind(cfg).await?.run().await
}
