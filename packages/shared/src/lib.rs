//! Utilities shared by the Campus server and client binaries.

pub mod logger;
pub mod time;
