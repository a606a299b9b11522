//! Campus chat client.
//!
//! Connects to the relay and sends every input line as a chat frame.
//! Reconnects after a dropped connection (5 attempts, 5 seconds apart).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campus-client -- --name Alice
//! cargo run --bin campus-client -- -n Bob -u ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;

use campus_client::domain::ReconnectPolicy;
use campus_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "campus-client")]
#[command(about = "WebSocket chat client for the Campus relay", long_about = None)]
struct Args {
    /// Name shown to other users next to your messages
    #[arg(short = 'n', long, env = "CAMPUS_NAME")]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "CAMPUS_URL", default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    match campus_client::run_client(args.url, args.name, ReconnectPolicy::default()).await {
        Ok(log) => tracing::info!("Received {} messages this run", log.len()),
        Err(e) => {
            tracing::error!("Client error: {}", e);
            std::process::exit(1);
        }
    }
}
