//! TCP broadcast server.
//!
//! Relays every message received from one client to all connected clients,
//! including the sender.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 55555
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::{DEFAULT_OUTBOUND_QUEUE_CAPACITY, ServerConfig},
    infrastructure::{message_pusher::ChannelMessagePusher, registry::InMemoryConnectionRegistry},
    ui::Server,
    usecase::{BroadcastMessageUseCase, ConnectPeerUseCase, DisconnectPeerUseCase},
};
use hiroba_shared::{
    logger::setup_logger,
    protocol::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_READ_BUFFER_SIZE},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "TCP broadcast server: every message is relayed to all connected clients", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Maximum number of bytes taken by a single read (one message)
    #[arg(long, default_value_t = DEFAULT_READ_BUFFER_SIZE)]
    read_buffer_size: usize,

    /// Number of messages buffered per client before broadcasts to it are dropped
    #[arg(long, default_value_t = DEFAULT_OUTBOUND_QUEUE_CAPACITY)]
    queue_capacity: usize,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            read_buffer_size: args.read_buffer_size,
            outbound_queue_capacity: args.queue_capacity,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. ConnectionRegistry
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create ConnectionRegistry (in-memory)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create MessagePusher (per-peer outbound queues)
    let message_pusher = Arc::new(ChannelMessagePusher::new());

    // 3. Create UseCases
    let connect_peer_usecase = Arc::new(ConnectPeerUseCase::new(registry.clone()));
    let disconnect_peer_usecase = Arc::new(DisconnectPeerUseCase::new(registry.clone()));
    let broadcast_message_usecase = Arc::new(BroadcastMessageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));

    // 4. Create and run the server
    let server = Server::new(
        connect_peer_usecase,
        disconnect_peer_usecase,
        broadcast_message_usecase,
        ServerConfig::from(args),
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
