//! Server configuration.

use hiroba_shared::protocol::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_READ_BUFFER_SIZE, socket_addr,
};

/// Default capacity of each peer's outbound queue.
pub const DEFAULT_OUTBOUND_QUEUE_CAPACITY: usize = 64;

/// Runtime settings of the broadcast server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to bind to
    pub port: u16,
    /// Upper bound of a single read; each read becomes one message
    pub read_buffer_size: usize,
    /// Messages buffered per peer before further broadcasts to it are dropped
    pub outbound_queue_capacity: usize,
}

impl ServerConfig {
    /// `host:port` string the listener binds to
    pub fn bind_addr(&self) -> String {
        socket_addr(&self.host, self.port)
    }

    /// Check that the sizes are usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.read_buffer_size == 0 {
            return Err("read buffer size must be at least 1 byte".to_string());
        }
        if self.outbound_queue_capacity == 0 {
            return Err("outbound queue capacity must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            outbound_queue_capacity: DEFAULT_OUTBOUND_QUEUE_CAPACITY,
        }
    }
}
