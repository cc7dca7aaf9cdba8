//! Console client for the TCP broadcast server.
//!
//! Connects to the server and sends every line typed at the "> " prompt.
//! Everything the server relays is printed as "[Broadcast] ...".
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client
//! cargo run --bin hiroba-client -- --host 192.168.0.10 --port 55555
//! ```

use clap::Parser;

use hiroba_client::{ReconnectPolicy, run_client, ui::spawn_line_reader};
use hiroba_shared::{
    logger::setup_logger,
    protocol::{DEFAULT_HOST, DEFAULT_PORT, socket_addr},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Console client for the TCP broadcast server", long_about = None)]
struct Args {
    /// Server host address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST)]
    host: String,

    /// Server port number
    #[arg(short = 'p', long, default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let addr = socket_addr(&args.host, args.port);

    let input = spawn_line_reader();

    // Run the client
    if let Err(e) = run_client(addr, ReconnectPolicy::default(), input).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
