//! Role-based access checks.
//!
//! Pure functions, so every use case applies the same rule before touching the store.

use thiserror::Error;

use super::{Role, User};

/// Authorization failure.
///
/// The messages are part of the HTTP contract (`{"error": "Unauthorized"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No authenticated caller.
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but the role is not allowed.
    #[error("Forbidden")]
    Forbidden,
}

/// Return the caller if it is authenticated and holds one of `allowed`.
///
/// # Examples
///
/// ```
/// use campus_server::domain::{AccessError, Role, authorize};
///
/// assert_eq!(authorize(None, &[Role::Admin]).unwrap_err(), AccessError::Unauthorized);
/// ```
pub fn authorize<'a>(caller: Option<&'a User>, allowed: &[Role]) -> Result<&'a User, AccessError> {
    let user = caller.ok_or(AccessError::Unauthorized)?;
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AccessError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, Username};

    fn user(role: Role) -> User {
        User {
            id: UserId::new(1).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: String::new(),
            role,
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn test_authorize_without_caller_is_unauthorized() {
        // テスト項目: 未認証の呼び出しは Unauthorized になる
        // given (前提条件):
        let caller = None;

        // when (操作):
        let result = authorize(caller, &Role::ALL);

        // then (期待する結果):
        assert_eq!(result, Err(AccessError::Unauthorized));
    }

    #[test]
    fn test_authorize_with_wrong_role_is_forbidden() {
        // テスト項目: 許可されていないロールは Forbidden になる
        // given (前提条件):
        let student = user(Role::Student);

        // when (操作):
        let result = authorize(Some(&student), &[Role::Teacher, Role::Admin]);

        // then (期待する結果):
        assert_eq!(result, Err(AccessError::Forbidden));
    }

    #[test]
    fn test_authorize_with_allowed_role_returns_user() {
        // テスト項目: 許可されたロールの場合は呼び出し元ユーザーが返される
        // given (前提条件):
        let teacher = user(Role::Teacher);

        // when (操作):
        let result = authorize(Some(&teacher), &[Role::Teacher]);

        // then (期待する結果):
        assert_eq!(result.unwrap().role, Role::Teacher);
    }
}
