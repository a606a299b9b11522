//! InMemory Session Store 実装
//!
//! ベアラートークンとユーザー ID の対応を HashMap で保持します。
//! 期限切れのセッションは `resolve` 時に削除されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{SessionRepository, SessionToken, SessionTokenFactory, Timestamp, UserId};

#[derive(Debug, Clone, Copy)]
struct Session {
    user_id: UserId,
    expires_at: Timestamp,
}

/// インメモリのセッションストア
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionToken, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn create(&self, user_id: UserId, expires_at: Timestamp) -> SessionToken {
        let mut sessions = self.sessions.lock().await;
        loop {
            // 32 桁の16進数は常に妥当なトークンなので、失敗は再生成で扱う
            let Ok(token) = SessionTokenFactory::generate() else {
                continue;
            };
            if sessions.contains_key(&token) {
                continue;
            }
            sessions.insert(
                token.clone(),
                Session {
                    user_id,
                    expires_at,
                },
            );
            return token;
        }
    }

    async fn resolve(&self, token: &SessionToken, now: Timestamp) -> Option<UserId> {
        let mut sessions = self.sessions.lock().await;
        let session = *sessions.get(token)?;
        if session.expires_at <= now {
            sessions.remove(token);
            tracing::debug!("Session for user {} expired", session.user_id);
            return None;
        }
        Some(session.user_id)
    }

    async fn revoke(&self, token: &SessionToken) -> bool {
        self.sessions.lock().await.remove(token).is_some()
    }
}
