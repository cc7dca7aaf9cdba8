//! ConnectionRegistry trait 定義
//!
//! 現在接続中のピアの集合を表すインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::{PeerHandle, PeerId};

/// 接続中ピアのレジストリ
///
/// 全ての操作は互いに排他的に実行される。
/// 公開する操作は insert / remove / snapshot のみで、ロックを保持したままの走査は提供しない
/// （ロック中に I/O が走ると、無関係なピアの登録・解除まで止まってしまうため）。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// ピアを登録する
    ///
    /// 既に同じ `PeerId` が登録されている場合は何もせず `false` を返す。
    async fn insert(&self, handle: PeerHandle) -> bool;

    /// ピアの登録を解除する
    ///
    /// 登録されていない場合もエラーにはせず `false` を返す（冪等）。
    async fn remove(&self, peer_id: &PeerId) -> bool;

    /// 現時点のメンバーのコピーを返す
    ///
    /// コピーはロック内で作成され、呼び出し側はロックなしで走査できる。
    /// スナップショット取得後のメンバー変更は反映されない。
    async fn snapshot(&self) -> Vec<PeerHandle>;

    /// 接続中のピア数
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
