//! Peer ドメインモデル
//!
//! `PeerHandle` は 1 本の生きている接続を表す不透明なハンドルです。
//! 接続ごとの状態はハンドル自身に持たせません（ユーザー名やアドレスは扱わない）。

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use tokio::sync::{Notify, mpsc};
use uuid::Uuid;

use super::{Message, MessagePushError};

/// ピアの送信キュー（writer タスクが受信側を保持する）
pub type PusherChannel = mpsc::Sender<Message>;

/// ピア ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeerId(Uuid);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// PeerId の生成器（UUID v4）
pub struct PeerIdFactory;

impl PeerIdFactory {
    pub fn generate() -> PeerId {
        PeerId(Uuid::new_v4())
    }
}

/// 1 本の接続を表すハンドル
///
/// 同一性は `PeerId` のみで判定する。`sender` はブロードキャストの宛先としてのみ使う。
///
/// 送信キューが溢れたピアは退去させる。区切りのないバイトストリームで
/// 取りこぼしを抱えたまま接続を続けることはしない。
#[derive(Clone)]
pub struct PeerHandle {
    id: PeerId,
    sender: PusherChannel,
    /// キュー溢れの通知（Session Worker が待ち受ける）
    evict: Arc<Notify>,
}

impl PeerHandle {
    pub fn new(id: PeerId, sender: PusherChannel) -> Self {
        Self {
            id,
            sender,
            evict: Arc::new(Notify::new()),
        }
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    /// 送信キューにメッセージを積む（待機しない）
    ///
    /// # Errors
    ///
    /// * `MessagePushError::QueueFull` - キューが満杯（このピアに退去を通知する）
    /// * `MessagePushError::PeerClosed` - writer タスクが終了済み
    pub fn try_push(&self, message: Message) -> Result<(), MessagePushError> {
        self.sender.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                self.evict.notify_one();
                MessagePushError::QueueFull(self.id)
            }
            mpsc::error::TrySendError::Closed(_) => MessagePushError::PeerClosed(self.id),
        })
    }

    /// キュー溢れで退去を求められるまで待つ
    ///
    /// 待ち始める前に溢れていた場合もすぐに完了する。
    pub async fn evicted(&self) {
        self.evict.notified().await;
    }

    /// writer タスクが既に終了しているか
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl PartialEq for PeerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PeerHandle {}

impl Hash for PeerHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PeerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerHandle").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_peer_ids_are_unique() {
        // テスト項目: 生成される PeerId は重複しない
        let a = PeerIdFactory::generate();
        let b = PeerIdFactory::generate();

        assert_ne!(a, b);
    }

    #[test]
    fn test_handle_equality_is_by_id() {
        // テスト項目: 同じ ID を持つハンドルは送信キューが異なっても等しい
        // given (前提条件):
        let id = PeerIdFactory::generate();
        let (tx1, _rx1) = mpsc::channel(1);
        let (tx2, _rx2) = mpsc::channel(1);

        // when (操作):
        let a = PeerHandle::new(id, tx1);
        let b = PeerHandle::new(id, tx2);

        // then (期待する結果):
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_try_push_delivers_to_queue() {
        // テスト項目: try_push したメッセージが受信側に届く
        // given (前提条件):
        let (tx, mut rx) = mpsc::channel(1);
        let handle = PeerHandle::new(PeerIdFactory::generate(), tx);
        let message = Message::try_from("hello").unwrap();

        // when (操作):
        let result = handle.try_push(message.clone());

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(message));
    }

    #[test]
    fn test_try_push_full_queue() {
        // テスト項目: キューが満杯の場合は QueueFull が返る
        // given (前提条件):
        let (tx, _rx) = mpsc::channel(1);
        let id = PeerIdFactory::generate();
        let handle = PeerHandle::new(id, tx);
        handle.try_push(Message::try_from("first").unwrap()).unwrap();

        // when (操作):
        let result = handle.try_push(Message::try_from("second").unwrap());

        // then (期待する結果):
        assert_eq!(result, Err(MessagePushError::QueueFull(id)));
    }

    #[tokio::test]
    async fn test_full_queue_evicts_peer() {
        // テスト項目: キューが溢れると、同じピアの別のハンドルからも退去を待ち受けられる
        // given (前提条件): Session Worker 側のハンドルとレジストリ側のハンドル
        let (tx, _rx) = mpsc::channel(1);
        let session_side = PeerHandle::new(PeerIdFactory::generate(), tx);
        let registry_side = session_side.clone();
        registry_side
            .try_push(Message::try_from("first").unwrap())
            .unwrap();

        // when (操作):
        let result = registry_side.try_push(Message::try_from("second").unwrap());

        // then (期待する結果):
        assert!(result.is_err());
        tokio::time::timeout(std::time::Duration::from_secs(1), session_side.evicted())
            .await
            .expect("Peer was not evicted");
    }

    #[tokio::test]
    async fn test_successful_push_does_not_evict() {
        // テスト項目: 通常の送信では退去は通知されない
        let (tx, _rx) = mpsc::channel(4);
        let handle = PeerHandle::new(PeerIdFactory::generate(), tx);
        handle.try_push(Message::try_from("hello").unwrap()).unwrap();

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(100), handle.evicted()).await;

        assert!(result.is_err());
    }

    #[test]
    fn test_try_push_closed_queue() {
        // テスト項目: 受信側が破棄されている場合は PeerClosed が返る
        // given (前提条件):
        let (tx, rx) = mpsc::channel(1);
        let id = PeerIdFactory::generate();
        let handle = PeerHandle::new(id, tx);
        drop(rx);

        // when (操作):
        let result = handle.try_push(Message::try_from("hello").unwrap());

        // then (期待する結果):
        assert!(handle.is_closed());
        assert_eq!(result, Err(MessagePushError::PeerClosed(id)));
    }
}
