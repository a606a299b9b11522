//! Infrastructure layer
//!
//! ドメイン層の trait の具体的な実装と、外部とのデータ形式（DTO）。

pub mod dto;
pub mod password;
pub mod registry;
pub mod repository;
