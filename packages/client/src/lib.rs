//! Campus chat client.
//!
//! Connects to the relay at `/ws`, sends one frame per input line and keeps an
//! append-only log of everything received.

pub mod domain;
pub mod dto;
pub mod error;
pub mod formatter;
pub mod message_log;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
