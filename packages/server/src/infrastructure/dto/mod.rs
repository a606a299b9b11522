//! Data Transfer Objects (DTOs)
//!
//! DTOs are organized by protocol:
//! - `websocket`: chat relay frames
//! - `http`: resource API request/response bodies

pub mod conversion;
pub mod http;
pub mod websocket;
