//! UseCase: お知らせの作成・閲覧

use std::sync::Arc;

use campus_shared::time::Clock;

use crate::domain::{
    Announcement, NewAnnouncement, Role, SchoolRepository, Title, User, authorize,
};

use super::error::ResourceError;

/// 作成するお知らせの入力
#[derive(Debug, Clone)]
pub struct AnnouncementDraft {
    pub title: String,
    pub content: String,
    /// `None` なら全員向け
    pub target_role: Option<Role>,
}

/// お知らせのユースケース
pub struct AnnouncementUseCase {
    repository: Arc<dyn SchoolRepository>,
    clock: Arc<dyn Clock>,
}

impl AnnouncementUseCase {
    pub fn new(repository: Arc<dyn SchoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// お知らせを作成（管理者のみ）
    pub async fn create(
        &self,
        caller: Option<&User>,
        draft: AnnouncementDraft,
    ) -> Result<Announcement, ResourceError> {
        let admin = authorize(caller, &[Role::Admin])?;

        let announcement = self
            .repository
            .create_announcement(NewAnnouncement {
                title: Title::new(draft.title)?,
                content: draft.content,
                admin_id: admin.id,
                target_role: draft.target_role,
                created_at: self.clock.now_utc(),
            })
            .await?;

        tracing::info!(
            "Admin '{}' posted announcement {} for {}",
            admin.username.as_str(),
            announcement.id,
            announcement
                .target_role
                .map_or("everyone", |role| role.as_str())
        );
        Ok(announcement)
    }

    /// 呼び出し元に表示されるお知らせの一覧
    ///
    /// 管理者は全件、それ以外は全員向けと自分のロール向けのみ。
    pub async fn list(&self, caller: Option<&User>) -> Result<Vec<Announcement>, ResourceError> {
        let user = authorize(caller, &Role::ALL)?;
        Ok(self
            .repository
            .list_announcements()
            .await
            .into_iter()
            .filter(|a| a.is_visible_to(user.role))
            .collect())
    }
}
