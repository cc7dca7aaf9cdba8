//! ピアごとの送信キューを使った MessagePusher 実装
//!
//! ## 責務
//!
//! - `PeerHandle` が持つ送信キューへのメッセージ投入（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! ソケットへの書き込みは UI 層（`src/ui/handler/session.rs`）の writer タスクが行います。
//! この実装はキューに積むだけで待機しないため、遅いピアがいても他のピアへの配信は遅れません。
//! キューが溢れたピアには退去が通知され、そのセッションは切断されます。
//! 欠落を抱えたままのピアへ配信を続けることはありません。
//!
//! - UI 層: ソケットの読み書き、キューの受信側の所有
//! - Infrastructure 層: キューへの投入

use async_trait::async_trait;

use crate::domain::{Message, MessagePushError, MessagePusher, PeerHandle};

/// 送信キューを使った MessagePusher 実装
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelMessagePusher;

impl ChannelMessagePusher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagePusher for ChannelMessagePusher {
    async fn push_to(
        &self,
        target: &PeerHandle,
        message: &Message,
    ) -> Result<(), MessagePushError> {
        target.try_push(message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeerId, PeerIdFactory};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ブロードキャストがスナップショット内の全ピアに届くこと
    // - 一部のピアへの送信失敗が他のピアへの配信を妨げないこと
    //
    // 【どのようなシナリオをテストするか】
    // 1. 全員に配信（送信者自身を含む）
    // 2. 閉じたピアが混ざっている場合
    // 3. 送信キューが満杯のピアが混ざっている場合
    // 4. 空のスナップショット
    // ========================================

    fn create_peer(capacity: usize) -> (PeerHandle, mpsc::Receiver<Message>) {
        let (tx, rx) = mpsc::channel(capacity);
        (PeerHandle::new(PeerIdFactory::generate(), tx), rx)
    }

    fn failed_ids(report: &crate::domain::BroadcastReport) -> Vec<PeerId> {
        report.failed.iter().map(|(id, _)| *id).collect()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のピアにメッセージを送信できる
        // given (前提条件):
        let pusher = ChannelMessagePusher::new();
        let (peer, mut rx) = create_peer(4);
        let message = Message::try_from("Hello").unwrap();

        // when (操作):
        let result = pusher.push_to(&peer, &message).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some(message));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_every_peer() {
        // テスト項目: 送信者を含む全ピアに同じバイト列が届く
        // given (前提条件):
        let pusher = ChannelMessagePusher::new();
        let (sender, mut sender_rx) = create_peer(4);
        let (alice, mut alice_rx) = create_peer(4);
        let (bob, mut bob_rx) = create_peer(4);
        let message = Message::try_from("hello").unwrap();

        // when (操作):
        let report = pusher
            .broadcast(&[sender.clone(), alice.clone(), bob.clone()], &message)
            .await;

        // then (期待する結果):
        assert!(report.is_complete());
        assert_eq!(report.target_count(), 3);
        assert_eq!(sender_rx.recv().await.unwrap().as_bytes(), b"hello");
        assert_eq!(alice_rx.recv().await.unwrap().as_bytes(), b"hello");
        assert_eq!(bob_rx.recv().await.unwrap().as_bytes(), b"hello");
    }

    #[tokio::test]
    async fn test_broadcast_isolates_closed_peer() {
        // テスト項目: 閉じたピアへの失敗が他のピアへの配信を止めない
        // given (前提条件):
        let pusher = ChannelMessagePusher::new();
        let (sender, mut sender_rx) = create_peer(4);
        let (alice, alice_rx) = create_peer(4);
        let (bob, mut bob_rx) = create_peer(4);
        drop(alice_rx);
        let message = Message::try_from("hello").unwrap();

        // when (操作): 失敗するピアを先頭に置く
        let report = pusher
            .broadcast(&[alice.clone(), sender.clone(), bob.clone()], &message)
            .await;

        // then (期待する結果):
        assert_eq!(failed_ids(&report), vec![alice.id()]);
        assert_eq!(report.delivered, vec![sender.id(), bob.id()]);
        assert_eq!(sender_rx.recv().await, Some(message.clone()));
        assert_eq!(bob_rx.recv().await, Some(message));
    }

    #[tokio::test]
    async fn test_broadcast_does_not_wait_for_slow_peer() {
        // テスト項目: 送信キューが満杯のピアは退去を通知され、他は配信される
        // given (前提条件):
        let pusher = ChannelMessagePusher::new();
        let (slow, mut slow_rx) = create_peer(1);
        let (bob, mut bob_rx) = create_peer(4);
        let first = Message::try_from("first").unwrap();
        let second = Message::try_from("second").unwrap();
        pusher.broadcast(&[slow.clone(), bob.clone()], &first).await;

        // when (操作):
        let report = pusher.broadcast(&[slow.clone(), bob.clone()], &second).await;

        // then (期待する結果):
        assert_eq!(
            report.failed,
            vec![(slow.id(), MessagePushError::QueueFull(slow.id()))]
        );
        assert_eq!(slow_rx.recv().await, Some(first.clone()));
        assert_eq!(bob_rx.recv().await, Some(first));
        assert_eq!(bob_rx.recv().await, Some(second));
        tokio::time::timeout(std::time::Duration::from_secs(1), slow.evicted())
            .await
            .expect("Slow peer was not evicted");
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のスナップショットでもエラーにならない
        let pusher = ChannelMessagePusher::new();
        let message = Message::try_from("Message").unwrap();

        let report = pusher.broadcast(&[], &message).await;

        assert_eq!(report, crate::domain::BroadcastReport::default());
    }
}
