//! Client session worker: one per accepted connection.
//!
//! ```text
//! Connected -> Reading -> (Broadcasting -> Reading)* -> Disconnecting -> Terminated
//! ```
//!
//! The peer is already registered when the worker starts. A zero-length read or
//! an I/O error is the only disconnect signal; it is terminal and never retried.
//!
//! On disconnect the peer leaves the registry first, then its writer flushes
//! whatever is already queued (a half-closed peer still receives its own last
//! message) before the socket is released.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::{mpsc, oneshot, watch},
    time::timeout,
};

use crate::{
    domain::{Message, PeerHandle, PeerId},
    ui::state::AppState,
};

/// Upper bound for flushing queued messages to a disconnecting peer.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Spawns a task that receives messages from the rx channel and writes them to the peer's socket.
///
/// This function handles the outbound message flow: broadcasts (via rx channel)
/// are written to this peer's connection. A failed write ends only this task; later
/// broadcasts to the peer then fail fast with a closed queue.
///
/// When `close` fires the queue stops accepting new messages, the messages already
/// queued are written out, and the write half is shut down.
///
/// # Arguments
///
/// * `peer_id` - The peer this writer belongs to
/// * `rx` - Receiving side of the peer's outbound queue
/// * `writer` - Write half of the peer's TCP stream
/// * `close` - Fires when the session is disconnecting
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    peer_id: PeerId,
    mut rx: mpsc::Receiver<Message>,
    mut writer: OwnedWriteHalf,
    mut close: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                message = rx.recv() => match message {
                    Some(message) => {
                        if let Err(e) = writer.write_all(message.as_bytes()).await {
                            tracing::warn!("Failed to write to peer '{}': {}", peer_id, e);
                            return;
                        }
                    }
                    None => break,
                },
                _ = &mut close => {
                    rx.close();
                    while let Some(message) = rx.recv().await {
                        if let Err(e) = writer.write_all(message.as_bytes()).await {
                            tracing::debug!("Dropping queued messages for '{}': {}", peer_id, e);
                            return;
                        }
                    }
                    break;
                }
            }
        }

        let _ = writer.shutdown().await;
    })
}

/// Why the read loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Termination {
    Closed,
    ReadError,
    Shutdown,
    Evicted,
}

/// Run the receive loop of one peer until it disconnects, then retire it.
pub(crate) async fn handle_session(
    stream: TcpStream,
    peer_addr: SocketAddr,
    handle: PeerHandle,
    rx: mpsc::Receiver<Message>,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) {
    let peer_id = handle.id();
    let (mut reader, writer) = stream.into_split();
    let (close_tx, close_rx) = oneshot::channel();
    let mut push_task = pusher_loop(peer_id, rx, writer, close_rx);

    let mut buffer = vec![0u8; state.config.read_buffer_size];

    let termination = loop {
        tokio::select! {
            result = reader.read(&mut buffer) => match result {
                Ok(0) => break Termination::Closed,
                Ok(n) => {
                    let message = match Message::try_from(&buffer[..n]) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!("Discarding read from peer '{}': {}", peer_id, e);
                            continue;
                        }
                    };
                    tracing::info!("Received from '{}': {}", peer_id, message.to_lossy_string());

                    // Fan-out failures are per target and never end this loop.
                    state
                        .broadcast_message_usecase
                        .execute(&peer_id, &message)
                        .await;
                }
                Err(e) => {
                    tracing::warn!("Read error from peer '{}': {}", peer_id, e);
                    break Termination::ReadError;
                }
            },
            _ = shutdown.changed() => break Termination::Shutdown,
            _ = handle.evicted() => break Termination::Evicted,
        }
    };

    // Disconnecting: leave the registry exactly once so no new broadcast targets us,
    // then let the writer flush what is already queued.
    state.disconnect_peer_usecase.execute(&peer_id).await;
    drop(handle);

    let _ = close_tx.send(());
    if timeout(DRAIN_TIMEOUT, &mut push_task).await.is_err() {
        tracing::debug!("Writer for '{}' did not drain in time", peer_id);
        push_task.abort();
        let _ = push_task.await;
    }
    drop(reader);

    let remaining = state.disconnect_peer_usecase.count_remaining_peers().await;
    match termination {
        Termination::Closed => tracing::info!(
            "Peer '{}' ({}) disconnected (remaining={})",
            peer_id,
            peer_addr,
            remaining
        ),
        Termination::ReadError => tracing::info!(
            "Peer '{}' ({}) dropped after read error (remaining={})",
            peer_id,
            peer_addr,
            remaining
        ),
        Termination::Shutdown => tracing::debug!(
            "Peer '{}' ({}) closed by server shutdown (remaining={})",
            peer_id,
            peer_addr,
            remaining
        ),
        Termination::Evicted => tracing::warn!(
            "Peer '{}' ({}) evicted after its outbound queue overflowed (remaining={})",
            peer_id,
            peer_addr,
            remaining
        ),
    }
}
