//! UseCase: ピア切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectPeerUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断したピアがレジストリから確実に取り除かれることを保証する
//! - 重複した切断シグナルでもエラーにならないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続中ピアの切断
//! - エッジケース：既に削除済みのピアの切断（no-op）

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, PeerId};

/// ピア切断のユースケース
pub struct DisconnectPeerUseCase {
    /// ConnectionRegistry（接続中ピアの集合）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectPeerUseCase {
    /// 新しい DisconnectPeerUseCase を作成
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// ピア切断を実行
    ///
    /// # Returns
    ///
    /// `true` - 登録を解除した / `false` - 既に登録されていなかった
    pub async fn execute(&self, peer_id: &PeerId) -> bool {
        let removed = self.registry.remove(peer_id).await;

        if removed {
            tracing::debug!("Peer '{}' unregistered", peer_id);
        } else {
            tracing::debug!("Peer '{}' was already unregistered", peer_id);
        }

        removed
    }

    /// 残りのピア数を取得
    pub async fn count_remaining_peers(&self) -> usize {
        self.registry.len().await
    }
}
