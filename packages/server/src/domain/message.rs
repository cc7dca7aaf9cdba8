//! Message ドメインモデル
//!
//! 1 回の読み込みで得られたバイト列が、そのまま 1 つのメッセージになります。
//! 送信者の情報はワイヤ上に含まれません（ペイロードのみ）。

use std::{fmt, sync::Arc};

use super::MessageError;

/// ブロードキャストされるメッセージ
///
/// 中身は不変の共有バッファで、全ピアへのファンアウト時に clone してもコピーは発生しない。
#[derive(Clone, PartialEq, Eq)]
pub struct Message(Arc<[u8]>);

impl Message {
    /// バイト列からメッセージを作成
    ///
    /// # Errors
    ///
    /// 空のバイト列の場合は `MessageError::Empty`
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, MessageError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(MessageError::Empty);
        }
        Ok(Self(bytes.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 常に `false`（空のメッセージは作成できない）
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// ログ出力用の文字列表現（不正な UTF-8 は置換文字になる）
    pub fn to_lossy_string(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl TryFrom<&[u8]> for Message {
    type Error = MessageError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl TryFrom<&str> for Message {
    type Error = MessageError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        Self::new(text.as_bytes())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message")
            .field(&self.to_lossy_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_keeps_exact_bytes() {
        // テスト項目: 読み込んだバイト列がそのまま保持される
        // given (前提条件):
        let bytes = b"hello".to_vec();

        // when (操作):
        let message = Message::new(bytes).unwrap();

        // then (期待する結果):
        assert_eq!(message.as_bytes(), b"hello");
        assert_eq!(message.len(), 5);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_empty_message_is_rejected() {
        // テスト項目: 空のバイト列からはメッセージを作成できない
        // when (操作):
        let result = Message::try_from(&b""[..]);

        // then (期待する結果):
        assert_eq!(result, Err(MessageError::Empty));
    }

    #[test]
    fn test_non_utf8_payload_is_accepted() {
        // テスト項目: プロトコルはバイト列なので UTF-8 でなくても受け付ける
        // given (前提条件):
        let bytes: &[u8] = &[0xff, 0xfe, b'a'];

        // when (操作):
        let message = Message::try_from(bytes).unwrap();

        // then (期待する結果):
        assert_eq!(message.as_bytes(), bytes);
        assert!(message.to_lossy_string().ends_with('a'));
    }

    #[test]
    fn test_clone_shares_buffer() {
        // テスト項目: clone したメッセージは同じ内容を指す
        let message = Message::try_from("world").unwrap();
        let cloned = message.clone();

        assert_eq!(message, cloned);
        assert!(Arc::ptr_eq(&message.0, &cloned.0));
    }
}
