//! UseCase 層
//!
//! UI 層（Accept Loop / Session Worker）から呼ばれるアプリケーションロジック。

mod broadcast_message;
mod connect_peer;
mod disconnect_peer;
mod error;

pub use broadcast_message::BroadcastMessageUseCase;
pub use connect_peer::ConnectPeerUseCase;
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::ConnectError;
