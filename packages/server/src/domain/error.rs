//! ドメイン層のエラー型

use thiserror::Error;

use super::PeerId;

/// メッセージ生成時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// 空のメッセージは存在しない（長さ 0 の読み込みは切断を意味する）
    #[error("Message must not be empty")]
    Empty,
}

/// メッセージ送信（通知）時のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信キューが満杯（遅いピア）
    #[error("Outbound queue of peer '{0}' is full")]
    QueueFull(PeerId),

    /// 送信キューが閉じている（ピアの writer が終了済み）
    #[error("Peer '{0}' is closed")]
    PeerClosed(PeerId),
}
