//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::PeerId;

/// ピア接続時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ PeerId が既に登録されている
    #[error("Peer '{0}' is already connected")]
    AlreadyConnected(PeerId),
}
