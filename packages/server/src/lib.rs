//! Campus server: a chat relay over WebSocket and a role-gated school resource API.
//!
//! Layers, from the inside out:
//! - `domain`: entities, value objects and the traits the other layers implement
//! - `usecase`: application operations
//! - `infrastructure`: in-memory stores, password hashing, DTOs
//! - `ui`: axum handlers and the server

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
