//! UseCase: メッセージのブロードキャスト処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - BroadcastMessageUseCase::execute() メソッド
//! - レジストリのスナップショットを宛先としたファンアウト
//!
//! ### なぜこのテストが必要か
//! - 送信者自身も宛先に含まれる（自分の送信したメッセージが自分にも返ってくる）
//! - 一部のピアへの送信失敗が送信者にエラーとして返らないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：全ピアへの配信
//! - 異常系：一部のピアが閉じている
//! - エッジケース：送信者がスナップショットに含まれていない（切断直後）

use std::sync::Arc;

use crate::domain::{BroadcastReport, ConnectionRegistry, Message, MessagePusher, PeerId};

/// メッセージブロードキャストのユースケース
pub struct BroadcastMessageUseCase {
    /// ConnectionRegistry（接続中ピアの集合）
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl BroadcastMessageUseCase {
    /// 新しい BroadcastMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// ブロードキャストを実行
    ///
    /// 宛先は呼び出し時点のスナップショット（送信者を含む）。
    /// スナップショットはロックの外で走査される。
    ///
    /// # Arguments
    ///
    /// * `from_peer_id` - メッセージを読み込んだピア（ログ用）
    /// * `message` - ブロードキャストするメッセージ
    ///
    /// # Returns
    ///
    /// 配信結果。個々の失敗は含まれるが、この関数自体は失敗しない。
    pub async fn execute(&self, from_peer_id: &PeerId, message: &Message) -> BroadcastReport {
        let targets = self.registry.snapshot().await;

        let report = self.message_pusher.broadcast(&targets, message).await;

        tracing::debug!(
            "Broadcasted {} bytes from peer '{}' to {}/{} peers",
            message.len(),
            from_peer_id,
            report.delivered.len(),
            report.target_count()
        );

        report
    }
}
