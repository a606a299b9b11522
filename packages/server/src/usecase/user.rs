//! UseCase: ユーザー登録・一覧

use std::sync::Arc;

use crate::domain::{
    NewUser, PasswordHasher, Role, SchoolRepository, User, Username, ValueObjectError, authorize,
};

use super::error::ResourceError;

/// 登録するユーザーの入力
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// ユーザー管理のユースケース
pub struct UserUseCase {
    repository: Arc<dyn SchoolRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserUseCase {
    pub fn new(repository: Arc<dyn SchoolRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// 新しいユーザーを登録（管理者のみ）
    pub async fn register(
        &self,
        caller: Option<&User>,
        draft: UserDraft,
    ) -> Result<User, ResourceError> {
        let admin = authorize(caller, &[Role::Admin])?;

        let username = Username::new(draft.username)?;
        if draft.password.is_empty() {
            return Err(ValueObjectError::Empty { field: "password" }.into());
        }
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ValueObjectError::Empty { field: "name" }.into());
        }

        let password_hash = self
            .hasher
            .hash(&draft.password)
            .map_err(ResourceError::PasswordHash)?;
        let user = self
            .repository
            .create_user(NewUser {
                username,
                password_hash,
                role: draft.role,
                name,
            })
            .await?;

        tracing::info!(
            "Admin '{}' registered {} '{}'",
            admin.username.as_str(),
            user.role,
            user.username.as_str()
        );
        Ok(user)
    }

    /// 全ユーザー一覧（管理者のみ）
    pub async fn list(&self, caller: Option<&User>) -> Result<Vec<User>, ResourceError> {
        authorize(caller, &[Role::Admin])?;
        Ok(self.repository.list_users().await)
    }

    /// 学生一覧（教師・管理者）
    pub async fn list_students(&self, caller: Option<&User>) -> Result<Vec<User>, ResourceError> {
        authorize(caller, &[Role::Teacher, Role::Admin])?;
        Ok(self
            .repository
            .list_users()
            .await
            .into_iter()
            .filter(|u| u.role == Role::Student)
            .collect())
    }
}
