//! UseCase: ログイン・ログアウト・セッション解決
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthUseCase の login / logout / authenticate / seed_admin
//!
//! ### どのような状況を想定しているか
//! - 正常系：正しい資格情報でのログイン、トークンからのユーザー解決
//! - 異常系：誤ったパスワード、存在しないユーザー、期限切れトークン
//! - エッジケース：管理者シードの再実行

use std::{sync::Arc, time::Duration};

use campus_shared::time::Clock;

use crate::{
    config::AdminSeed,
    domain::{
        NewUser, PasswordHasher, Role, SchoolRepository, SessionRepository, SessionToken,
        Timestamp, User, Username,
    },
};

use super::error::{AuthError, ResourceError};

/// Verified against when the username is unknown, so both failures cost one hash check.
const DUMMY_PASSWORD: &str = "campus-unknown-user";

/// 認証のユースケース
pub struct AuthUseCase {
    repository: Arc<dyn SchoolRepository>,
    sessions: Arc<dyn SessionRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    session_ttl: Duration,
    dummy_hash: Option<String>,
}

impl AuthUseCase {
    pub fn new(
        repository: Arc<dyn SchoolRepository>,
        sessions: Arc<dyn SessionRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        session_ttl: Duration,
    ) -> Self {
        let dummy_hash = match hasher.hash(DUMMY_PASSWORD) {
            Ok(hash) => Some(hash),
            Err(e) => {
                tracing::warn!("Failed to prepare dummy password hash: {}", e);
                None
            }
        };
        Self {
            repository,
            sessions,
            hasher,
            clock,
            session_ttl,
            dummy_hash,
        }
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// 資格情報を検証し、新しいセッションを発行
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(SessionToken, User), AuthError> {
        let Some(user) = self.repository.find_user_by_username(username.trim()).await else {
            if let Some(dummy_hash) = &self.dummy_hash {
                let _ = self.hasher.verify(password, dummy_hash);
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::info!("Failed login attempt for '{}'", user.username.as_str());
            return Err(AuthError::InvalidCredentials);
        }

        let ttl_millis = i64::try_from(self.session_ttl.as_millis()).unwrap_or(i64::MAX);
        let expires_at = Timestamp::new(self.now().value().saturating_add(ttl_millis));
        let token = self.sessions.create(user.id, expires_at).await;

        tracing::info!("User '{}' logged in as {}", user.username.as_str(), user.role);
        Ok((token, user))
    }

    /// セッションを破棄。存在しないトークンでもエラーにはならない
    pub async fn logout(&self, token: &SessionToken) -> bool {
        self.sessions.revoke(token).await
    }

    /// ベアラートークンからユーザーを解決
    ///
    /// 形式不正・期限切れ・ユーザー削除済みはすべて `None`。
    pub async fn authenticate(&self, token: &str) -> Option<User> {
        let token = SessionToken::new(token.to_string()).ok()?;
        let user_id = self.sessions.resolve(&token, self.now()).await?;
        self.repository.find_user(user_id).await
    }

    /// 起動時の管理者アカウントを作成
    ///
    /// 同名のユーザーが既に存在する場合はそのユーザーを返し、何も変更しない。
    pub async fn seed_admin(&self, seed: &AdminSeed) -> Result<User, ResourceError> {
        let username = Username::new(seed.username.clone())?;
        if let Some(existing) = self.repository.find_user_by_username(username.as_str()).await {
            tracing::debug!("Admin '{}' already exists", username.as_str());
            return Ok(existing);
        }

        let password_hash = self
            .hasher
            .hash(&seed.password)
            .map_err(ResourceError::PasswordHash)?;
        let user = self
            .repository
            .create_user(NewUser {
                username,
                password_hash,
                role: Role::Admin,
                name: seed.name.clone(),
            })
            .await?;

        tracing::info!("Seeded admin account '{}'", user.username.as_str());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        infrastructure::repository::{InMemorySchoolRepository, InMemorySessionStore},
        usecase::test_support::plain_hasher,
    };
    use crate::domain::repository::MockPasswordHasher;
    use campus_shared::time::FixedClock;
    use mockall::predicate::{always, eq};

    const NOW: i64 = 1_700_000_000_000;

    fn usecase_at(
        repository: Arc<InMemorySchoolRepository>,
        sessions: Arc<InMemorySessionStore>,
        now: i64,
    ) -> AuthUseCase {
        AuthUseCase::new(
            repository,
            sessions,
            Arc::new(plain_hasher()),
            Arc::new(FixedClock::new(now)),
            Duration::from_secs(60),
        )
    }

    fn seed() -> AdminSeed {
        AdminSeed {
            username: "admin".to_string(),
            password: "secret".to_string(),
            name: "Administrator".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        // テスト項目: 正しい資格情報でログインするとトークンが発行され、ユーザーが解決できる
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let usecase = usecase_at(repository, sessions, NOW);
        usecase.seed_admin(&seed()).await.unwrap();

        // when (操作):
        let (token, user) = usecase.login("admin", "secret").await.unwrap();

        // then (期待する結果):
        assert_eq!(user.role, Role::Admin);
        let resolved = usecase.authenticate(token.as_str()).await;
        assert_eq!(resolved.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_fails() {
        // テスト項目: 誤ったパスワード・存在しないユーザーでは InvalidCredentials になる
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let usecase = usecase_at(repository, sessions, NOW);
        usecase.seed_admin(&seed()).await.unwrap();

        // when (操作):
        let wrong_password = usecase.login("admin", "nope").await;
        let unknown_user = usecase.login("ghost", "secret").await;

        // then (期待する結果):
        assert_eq!(wrong_password.unwrap_err(), AuthError::InvalidCredentials);
        assert_eq!(unknown_user.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_unknown_user_still_verifies_a_hash() {
        // テスト項目: 存在しないユーザー名でも、既存ユーザーと同じくハッシュ検証が1回行われる
        // given (前提条件):
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq(DUMMY_PASSWORD))
            .times(1)
            .returning(|_| Ok("dummy-hash".to_string()));
        hasher
            .expect_verify()
            .with(always(), eq("dummy-hash"))
            .times(1)
            .returning(|_, _| false);
        let usecase = AuthUseCase::new(
            Arc::new(InMemorySchoolRepository::new()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(hasher),
            Arc::new(FixedClock::new(NOW)),
            Duration::from_secs(60),
        );

        // when (操作):
        let result = usecase.login("ghost", "secret").await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_session_expires_after_ttl() {
        // テスト項目: TTL を過ぎたトークンは解決されない
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let issuer = usecase_at(repository.clone(), sessions.clone(), NOW);
        issuer.seed_admin(&seed()).await.unwrap();
        let (token, _) = issuer.login("admin", "secret").await.unwrap();

        // when (操作):
        let later = usecase_at(repository, sessions, NOW + 61_000);
        let resolved = later.authenticate(token.as_str()).await;

        // then (期待する結果):
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        // テスト項目: ログアウト後のトークンは解決されない
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let usecase = usecase_at(repository, sessions, NOW);
        usecase.seed_admin(&seed()).await.unwrap();
        let (token, _) = usecase.login("admin", "secret").await.unwrap();

        // when (操作):
        let revoked = usecase.logout(&token).await;

        // then (期待する結果):
        assert!(revoked);
        assert!(usecase.authenticate(token.as_str()).await.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_rejects_garbage_token() {
        // テスト項目: 空や未知のトークンは None になる
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let usecase = usecase_at(repository, sessions, NOW);

        // when (操作):
        let empty = usecase.authenticate("").await;
        let unknown = usecase.authenticate("0123456789abcdef").await;

        // then (期待する結果):
        assert!(empty.is_none());
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        // テスト項目: 管理者シードを2回実行してもユーザーは1人のまま
        // given (前提条件):
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let usecase = usecase_at(repository.clone(), sessions, NOW);

        // when (操作):
        let first = usecase.seed_admin(&seed()).await.unwrap();
        let second = usecase.seed_admin(&seed()).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.id, second.id);
        assert_eq!(repository.list_users().await.len(), 1);
    }
}
