//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{AccessError, RelayError, RepositoryError, ValueObjectError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error(transparent)]
    Registration(#[from] RelayError),
}

/// ログイン・セッション処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// ユーザー名とパスワードのどちらが誤っているかは区別しない
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// リソース操作（ユーザー、課題、小テスト、成績、お知らせ）のエラー
///
/// HTTP 境界ですべて 400 `{ "error": ... }` に変換される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Validation(#[from] ValueObjectError),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}
