//! Campus server: chat relay (`/ws`) and school resource API (`/api/*`).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campus-server
//! cargo run --bin campus-server -- --host 0.0.0.0 --port 3000 \
//!     --admin-username admin --admin-password secret
//! ```

use std::time::Duration;

use campus_server::{
    config::{AdminSeed, RelayConfig, ServerConfig},
    ui::Server,
};
use campus_shared::logger::setup_logger;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "campus-server")]
#[command(about = "Chat relay and school resource API server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "CAMPUS_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "CAMPUS_PORT", default_value = "8080")]
    port: u16,

    /// Largest chat frame (bytes) that is relayed
    #[arg(long, env = "CAMPUS_MAX_FRAME_BYTES", default_value = "16384")]
    max_frame_bytes: usize,

    /// Largest WebSocket message (bytes) before the connection is closed
    #[arg(long, env = "CAMPUS_MAX_MESSAGE_BYTES", default_value = "65536")]
    max_message_bytes: usize,

    /// Maximum characters in a chat message text
    #[arg(long, env = "CAMPUS_MAX_TEXT_CHARS", default_value = "2000")]
    max_text_chars: usize,

    /// Maximum characters in a sender label
    #[arg(long, env = "CAMPUS_MAX_SENDER_CHARS", default_value = "64")]
    max_sender_chars: usize,

    /// Frames a peer may have queued before it is disconnected
    #[arg(long, env = "CAMPUS_OUTBOUND_QUEUE_CAPACITY", default_value = "64")]
    outbound_queue_capacity: usize,

    /// Seconds without any inbound frame before a connection is closed
    #[arg(long, env = "CAMPUS_IDLE_TIMEOUT_SECS", default_value = "90")]
    idle_timeout_secs: u64,

    /// Seconds between keepalive pings
    #[arg(long, env = "CAMPUS_PING_INTERVAL_SECS", default_value = "30")]
    ping_interval_secs: u64,

    /// Login session lifetime in seconds
    #[arg(long, env = "CAMPUS_SESSION_TTL_SECS", default_value = "86400")]
    session_ttl_secs: u64,

    /// Username of the admin account created at startup
    #[arg(long, env = "CAMPUS_ADMIN_USERNAME", requires = "admin_password")]
    admin_username: Option<String>,

    /// Password of the admin account created at startup
    #[arg(long, env = "CAMPUS_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    /// Display name of the admin account created at startup
    #[arg(long, env = "CAMPUS_ADMIN_NAME", default_value = "Administrator")]
    admin_name: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        let admin_seed = match (args.admin_username, args.admin_password) {
            (Some(username), Some(password)) => Some(AdminSeed {
                username,
                password,
                name: args.admin_name,
            }),
            _ => None,
        };

        Self {
            host: args.host,
            port: args.port,
            relay: RelayConfig {
                max_frame_bytes: args.max_frame_bytes,
                max_message_bytes: args.max_message_bytes,
                max_text_chars: args.max_text_chars,
                max_sender_chars: args.max_sender_chars,
                outbound_queue_capacity: args.outbound_queue_capacity,
                idle_timeout: Duration::from_secs(args.idle_timeout_secs),
                ping_interval: Duration::from_secs(args.ping_interval_secs),
            },
            session_ttl: Duration::from_secs(args.session_ttl_secs),
            admin_seed,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = ServerConfig::from(Args::parse());

    let server = match Server::from_config(&config).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run(config.host.clone(), config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
