//! Terminal I/O for the client.

use std::io::Write;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

/// Prompt shown while waiting for input
pub const PROMPT: &str = "> ";

/// Render one relayed chunk for the transcript.
pub fn format_broadcast(bytes: &[u8]) -> String {
    format!("\n[Broadcast] {}\n", String::from_utf8_lossy(bytes))
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}

/// Spawn a blocking thread running rustyline and forward non-empty lines.
///
/// The returned receiver yields `None` once the user presses Ctrl+C or Ctrl+D.
/// It outlives individual connections, so reconnecting never starts a second reader.
pub fn spawn_line_reader() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_broadcast_text() {
        assert_eq!(format_broadcast(b"hello"), "\n[Broadcast] hello\n");
    }

    #[test]
    fn test_format_broadcast_invalid_utf8() {
        let formatted = format_broadcast(&[b'h', 0xff, b'i']);

        assert_eq!(formatted, "\n[Broadcast] h\u{fffd}i\n");
    }
}
