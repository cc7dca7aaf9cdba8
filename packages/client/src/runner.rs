//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::mpsc;

use super::{error::ClientError, session::run_client_session};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// How often and how fast the client tries to reconnect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RECONNECT_ATTEMPTS,
            interval: Duration::from_secs(RECONNECT_INTERVAL_SECS),
        }
    }
}

/// Run the client with reconnection logic
///
/// Returns `Ok(())` when the user ends the input, and an error once every
/// reconnection attempt has failed.
pub async fn run_client(
    addr: String,
    policy: ReconnectPolicy,
    mut input: mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            addr,
            reconnect_count + 1,
            policy.max_attempts
        );

        match run_client_session(&addr, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the input ended (user exit), don't reconnect
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("{}", e);
                // A lost connection was established first, so the attempt budget starts over.
                if matches!(e, ClientError::ConnectionLost) {
                    reconnect_count = 0;
                }
                reconnect_count += 1;

                if reconnect_count >= policy.max_attempts {
                    return Err(ClientError::ReconnectExhausted(policy.max_attempts));
                }

                tracing::info!(
                    "Reconnecting in {:?}... (attempt {}/{})",
                    policy.interval,
                    reconnect_count + 1,
                    policy.max_attempts
                );

                tokio::time::sleep(policy.interval).await;
            }
        }
    }
}
