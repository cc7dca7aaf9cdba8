//! MessagePusher trait 定義
//!
//! メッセージをピアへ届けるためのインターフェース（Broadcast Dispatcher）。
//!
//! ## 設計ノート
//!
//! 送信は宛先ごとに独立している。
//! 1 つのピアへの送信失敗は他のピアへの配信を止めず、送信者にもエラーとして返らない。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{Message, MessagePushError, PeerHandle, PeerId};

/// 1 回のブロードキャストの結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// 送信キューに積めたピア
    pub delivered: Vec<PeerId>,
    /// 送信に失敗したピアとその理由
    pub failed: Vec<(PeerId, MessagePushError)>,
}

impl BroadcastReport {
    /// 宛先の総数
    pub fn target_count(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 特定のピアにメッセージを送信
    async fn push_to(&self, target: &PeerHandle, message: &Message)
    -> Result<(), MessagePushError>;

    /// スナップショット内の全ピアにメッセージを送信
    ///
    /// 個々の失敗はログに記録して `BroadcastReport` に積むだけで、掃引は最後まで続ける。
    async fn broadcast(&self, targets: &[PeerHandle], message: &Message) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        for target in targets {
            match self.push_to(target, message).await {
                Ok(()) => {
                    tracing::debug!("Broadcasted message to peer '{}'", target.id());
                    report.delivered.push(target.id());
                }
                Err(e) => {
                    tracing::warn!("Failed to push message to peer '{}': {}", target.id(), e);
                    report.failed.push((target.id(), e));
                }
            }
        }

        report
    }
}
