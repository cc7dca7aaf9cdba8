//! ドメイン層
//!
//! ブロードキャストサーバーの中核となる型と、Infrastructure 層が実装する
//! インターフェース（`ConnectionRegistry`, `MessagePusher`）を定義します。

mod error;
mod message;
mod peer;
mod pusher;
mod registry;

pub use error::{MessageError, MessagePushError};
pub use message::Message;
pub use peer::{PeerHandle, PeerId, PeerIdFactory, PusherChannel};
pub use pusher::{BroadcastReport, MessagePusher};
pub use registry::ConnectionRegistry;

#[cfg(test)]
pub use pusher::MockMessagePusher;
#[cfg(test)]
pub use registry::MockConnectionRegistry;
