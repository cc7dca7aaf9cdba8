//! InMemory ConnectionRegistry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! `PeerId` をキーとする HashMap を 1 つの Mutex で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionRegistry, PeerHandle, PeerId};

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// 接続中のピア
    ///
    /// Key: PeerId
    /// Value: PeerHandle
    peers: Mutex<HashMap<PeerId, PeerHandle>>,
}

impl InMemoryConnectionRegistry {
    /// 空の InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn insert(&self, handle: PeerHandle) -> bool {
        let mut peers = self.peers.lock().await;
        if peers.contains_key(&handle.id()) {
            return false;
        }
        peers.insert(handle.id(), handle);
        true
    }

    async fn remove(&self, peer_id: &PeerId) -> bool {
        let mut peers = self.peers.lock().await;
        peers.remove(peer_id).is_some()
    }

    async fn snapshot(&self) -> Vec<PeerHandle> {
        let peers = self.peers.lock().await;
        peers.values().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.peers.lock().await.len()
    }
}
