//! Server execution logic: the accept loop.

use std::{future::Future, net::SocketAddr, sync::Arc};

use tokio::{
    net::{TcpListener, TcpStream},
    sync::{mpsc, watch},
    task::{JoinError, JoinSet},
};

use crate::{
    config::ServerConfig,
    domain::{PeerHandle, PeerIdFactory},
    usecase::{BroadcastMessageUseCase, ConnectPeerUseCase, DisconnectPeerUseCase},
};

use super::{error::ServerError, handler::handle_session, signal::shutdown_signal, state::AppState};

/// TCP broadcast server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_peer_usecase,
///     disconnect_peer_usecase,
///     broadcast_message_usecase,
///     ServerConfig::default(),
/// );
/// server.run().await?;
/// ```
pub struct Server {
    /// ConnectPeerUseCase（ピア接続のユースケース）
    connect_peer_usecase: Arc<ConnectPeerUseCase>,
    /// DisconnectPeerUseCase（ピア切断のユースケース）
    disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    /// BroadcastMessageUseCase（ブロードキャストのユースケース）
    broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    /// Server configuration
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `connect_peer_usecase` - UseCase for peer registration
    /// * `disconnect_peer_usecase` - UseCase for peer removal
    /// * `broadcast_message_usecase` - UseCase for message fan-out
    /// * `config` - Bind address and buffer sizes
    pub fn new(
        connect_peer_usecase: Arc<ConnectPeerUseCase>,
        disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
        broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            connect_peer_usecase,
            disconnect_peer_usecase,
            broadcast_message_usecase,
            config,
        }
    }

    /// Run the broadcast server until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the server fails to
    /// bind to the configured address.
    pub async fn run(self) -> Result<(), ServerError> {
        self.config.validate().map_err(ServerError::InvalidConfig)?;

        // Bind the server to the host and port
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Run the accept loop on an already bound listener until `shutdown` resolves.
    ///
    /// Each accepted connection is registered before its session worker is
    /// spawned. On shutdown the loop stops accepting, tells every worker to
    /// stop, and waits for all of them to leave the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the listener has no
    /// local address. Accept failures are logged and retried.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        self.config.validate().map_err(ServerError::InvalidConfig)?;

        let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
        tracing::info!("Broadcast server listening on {}", local_addr);

        let state = Arc::new(AppState {
            connect_peer_usecase: self.connect_peer_usecase,
            disconnect_peer_usecase: self.disconnect_peer_usecase,
            broadcast_message_usecase: self.broadcast_message_usecase,
            config: self.config,
        });

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut sessions = JoinSet::new();

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Some(result) = sessions.join_next() => reap_session(result),
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        accept_peer(&state, stream, peer_addr, &mut sessions, shutdown_rx.clone())
                            .await;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                    }
                },
            }
        }

        // Stop accepting, then let every session retire itself.
        drop(listener);
        let _ = shutdown_tx.send(true);
        tracing::info!("Waiting for {} session(s) to finish", sessions.len());
        while let Some(result) = sessions.join_next().await {
            reap_session(result);
        }

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Register a freshly accepted connection, then start its session worker.
async fn accept_peer(
    state: &Arc<AppState>,
    stream: TcpStream,
    peer_addr: SocketAddr,
    sessions: &mut JoinSet<()>,
    shutdown: watch::Receiver<bool>,
) {
    let (tx, rx) = mpsc::channel(state.config.outbound_queue_capacity);
    let handle = PeerHandle::new(PeerIdFactory::generate(), tx);
    let peer_id = handle.id();

    // The handle must be in the registry before the worker can read anything.
    match state.connect_peer_usecase.execute(handle.clone()).await {
        Ok(connected) => {
            tracing::info!(
                "Peer '{}' connected from {} (total={})",
                peer_id,
                peer_addr,
                connected
            );
        }
        Err(e) => {
            tracing::warn!("Rejecting connection from {}: {}", peer_addr, e);
            return;
        }
    }

    sessions.spawn(handle_session(
        stream,
        peer_addr,
        handle,
        rx,
        state.clone(),
        shutdown,
    ));
}

fn reap_session(result: Result<(), JoinError>) {
    if let Err(e) = result {
        if e.is_panic() {
            tracing::error!("Session worker panicked: {}", e);
        } else {
            tracing::debug!("Session worker cancelled: {}", e);
        }
    }
}
