//! UseCase: ピア接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectPeerUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - Session Worker が動き出す前に、ピアがレジストリに登録されていることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいピアの登録
//! - 異常系：同じ PeerId の二重登録

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, PeerHandle};

use super::error::ConnectError;

/// ピア接続のユースケース
pub struct ConnectPeerUseCase {
    /// ConnectionRegistry（接続中ピアの集合）
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectPeerUseCase {
    /// 新しい ConnectPeerUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// ピア接続を実行
    ///
    /// # Arguments
    ///
    /// * `handle` - 新しく受け付けた接続のハンドル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 登録後の接続中ピア数
    /// * `Err(ConnectError)` - 既に登録済み
    pub async fn execute(&self, handle: PeerHandle) -> Result<usize, ConnectError> {
        let peer_id = handle.id();

        if !self.registry.insert(handle).await {
            return Err(ConnectError::AlreadyConnected(peer_id));
        }

        let connected = self.registry.len().await;
        tracing::debug!("Peer '{}' registered (total={})", peer_id, connected);

        Ok(connected)
    }
}
