//! HTTP / WebSocket server.

mod error;
mod extractor;
mod handler;
mod server;
mod signal;
pub mod state;

pub use error::ApiError;
pub use server::Server;
