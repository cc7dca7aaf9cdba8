//! Server state shared by the accept loop and every session worker.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    usecase::{BroadcastMessageUseCase, ConnectPeerUseCase, DisconnectPeerUseCase},
};

/// Shared application state
pub struct AppState {
    /// ConnectPeerUseCase（ピア接続のユースケース）
    pub connect_peer_usecase: Arc<ConnectPeerUseCase>,
    /// DisconnectPeerUseCase（ピア切断のユースケース）
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    /// BroadcastMessageUseCase（ブロードキャストのユースケース）
    pub broadcast_message_usecase: Arc<BroadcastMessageUseCase>,
    /// Server configuration
    pub config: ServerConfig,
}
