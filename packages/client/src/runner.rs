//! Client execution logic with reconnection support.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    domain::ReconnectPolicy, error::ClientError, message_log::MessageLog,
    session::run_client_session,
};

/// Read lines on a dedicated thread for the whole lifetime of the client.
///
/// The receiver yields `None` once the user presses Ctrl+C or Ctrl+D.
fn spawn_readline(name: &str) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", name);

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
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

/// Run the WebSocket client with reconnection logic
///
/// Returns when the user quits, or with `ReconnectExhausted` once
/// `policy.max_attempts` consecutive connection attempts have failed.
pub async fn run_client(
    url: String,
    name: String,
    policy: ReconnectPolicy,
) -> Result<MessageLog, ClientError> {
    let mut input = spawn_readline(&name);
    let mut log = MessageLog::new();
    let mut failed_attempts = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            url,
            name,
            failed_attempts + 1,
            policy.max_attempts
        );

        match run_client_session(&url, &name, &mut input, &mut log).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(log);
            }
            Err(e @ ClientError::ConnectionLost(_)) => {
                // The connection was up, so the next attempt starts a fresh count.
                tracing::warn!("{}", e);
                failed_attempts = 0;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                failed_attempts += 1;
            }
        }

        if !policy.should_attempt_reconnect(failed_attempts) {
            return Err(ClientError::ReconnectExhausted(failed_attempts));
        }

        tracing::info!(
            "Reconnecting in {:?}... (attempt {}/{})",
            policy.interval,
            failed_attempts + 1,
            policy.max_attempts
        );
        tokio::time::sleep(policy.interval).await;
    }
}
