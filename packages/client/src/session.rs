//! WebSocket client session management.

use campus_shared::time::get_timestamp;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    domain::{build_chat_frame, parse_incoming},
    error::ClientError,
    formatter::MessageFormatter,
    message_log::MessageLog,
    ui::redisplay_prompt,
};

/// Run one connection until the user quits or the connection drops.
///
/// Returns `Ok(())` when the input side closes (Ctrl+C / Ctrl+D).
/// Every received frame is appended to `log` before it is printed.
pub async fn run_client_session(
    url: &str,
    name: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
    log: &mut MessageLog,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        name
    );
    redisplay_prompt(name);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    let entry = log.append(parse_incoming(&text), get_timestamp());
                    print!("{}", MessageFormatter::format_entry(entry));
                    redisplay_prompt(name);
                }
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(name);
                }
                Some(Ok(Message::Close(frame))) => {
                    tracing::info!("Server closed the connection: {:?}", frame);
                    return Err(ClientError::ConnectionLost("closed by server".to_string()));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return Err(ClientError::ConnectionLost(e.to_string()));
                }
                None => {
                    return Err(ClientError::ConnectionLost("stream ended".to_string()));
                }
            },
            line = input.recv() => {
                let Some(line) = line else {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };
                let Some(frame) = build_chat_frame(name, &line, get_timestamp()) else {
                    continue;
                };
                let json = match serde_json::to_string(&frame) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize message: {}", e);
                        continue;
                    }
                };
                write
                    .send(Message::Text(json.into()))
                    .await
                    .map_err(|e| ClientError::ConnectionLost(e.to_string()))?;

                print!("\n{}", MessageFormatter::format_sent_confirmation(frame.timestamp));
                redisplay_prompt(name);
            }
        }
    }
}
