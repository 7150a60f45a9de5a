use super::{create_relay_route, MemoryStorage, RelayState, RoomRepository};
use crate::config::Config;
use crate::model::RelayError;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

pub struct RelayServer {
    config: Config,
    relay: RelayState,
}

impl RelayServer {
    pub fn new(config: Config) -> Self {
        Self::with_repository(config, Arc::new(MemoryStorage::new()))
    }

    pub fn with_repository(config: Config, rooms: Arc<dyn RoomRepository>) -> Self {
        RelayServer {
            config,
            relay: RelayState::new(rooms),
        }
    }

    pub fn router(&self) -> Router {
        create_relay_route(self.relay.clone())
    }

    /// Binds the configured address and serves until ctrl-c.
    pub async fn run(self) -> Result<(), RelayError> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener, shutdown_signal()).await
    }

    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), RelayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!("Server running at http://{}/", addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
