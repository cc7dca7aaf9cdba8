//! One TCP connection to the broadcast server.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc,
};

use hiroba_shared::protocol::DEFAULT_READ_BUFFER_SIZE;

use super::{
    error::ClientError,
    ui::{format_broadcast, redisplay_prompt},
};

/// Run one client session.
///
/// Lines from `input` are written as raw bytes with no terminator. Every read from
/// the server is printed as one broadcast.
///
/// # Returns
///
/// * `Ok(())` - the input ended (user exit)
/// * `Err(ClientError)` - the connection could not be opened or was lost
pub async fn run_client_session(
    addr: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ClientError::ConnectionFailed {
            addr: addr.to_string(),
            source,
        })?;

    tracing::info!("Connected to broadcast server at {}", addr);
    println!("\nConnected to server! Type messages and press Enter to send. Press Ctrl+C to exit.\n");

    let (mut reader, mut writer) = stream.into_split();

    // Spawn a task to handle incoming broadcasts
    let mut read_task = tokio::spawn(async move {
        let mut buffer = vec![0u8; DEFAULT_READ_BUFFER_SIZE];
        loop {
            match reader.read(&mut buffer).await {
                Ok(0) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Ok(n) => {
                    print!("{}", format_broadcast(&buffer[..n]));
                    redisplay_prompt();
                }
                Err(e) => {
                    tracing::warn!("Read error: {}", e);
                    break;
                }
            }
        }
    });

    let outcome = loop {
        tokio::select! {
            _ = &mut read_task => break Err(ClientError::ConnectionLost),
            line = input.recv() => match line {
                Some(line) => {
                    if let Err(e) = writer.write_all(line.as_bytes()).await {
                        tracing::warn!("Failed to send message: {}", e);
                        break Err(ClientError::ConnectionLost);
                    }
                }
                None => break Ok(()),
            },
        }
    };

    read_task.abort();

    outcome
}
