//! Wire-level constants shared by the server and the console client.
//!
//! The protocol is a raw byte stream: no framing, no length prefix and no
//! delimiter. Every read performed by the server is relayed as one message.

/// Default host the server binds to and the client connects to.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP port of the broadcast service.
pub const DEFAULT_PORT: u16 = 55555;

/// Upper bound of a single read on either side of the connection.
///
/// The legacy console and GUI clients allocate 200 bytes but receive at most
/// 199 per call, keeping one byte for a NUL terminator. A 200-byte read relays
/// the same bytes; only the split points of a long send can differ, and the
/// unframed protocol gives no guarantee about those.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 200;

/// Format a `host:port` socket address string.
pub fn socket_addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_with_defaults() {
        assert_eq!(socket_addr(DEFAULT_HOST, DEFAULT_PORT), "127.0.0.1:55555");
    }

    #[test]
    fn test_read_size_covers_legacy_receive() {
        // 旧クライアントが 1 回で受け取る 199 バイトは 1 回の読み込みに収まる
        assert_eq!(DEFAULT_READ_BUFFER_SIZE, 200);
    }
}
