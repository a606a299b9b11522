//! UseCase: 課題の作成・一覧

use std::sync::Arc;

use campus_shared::time::Clock;
use chrono::{DateTime, Utc};

use crate::domain::{
    Assignment, NewAssignment, Role, SchoolRepository, Title, User, authorize,
};

use super::error::ResourceError;

/// 作成する課題の入力
#[derive(Debug, Clone)]
pub struct AssignmentDraft {
    pub title: String,
    pub description: String,
    pub file_url: Option<String>,
    pub due_date: DateTime<Utc>,
}

/// 課題のユースケース
pub struct AssignmentUseCase {
    repository: Arc<dyn SchoolRepository>,
    clock: Arc<dyn Clock>,
}

impl AssignmentUseCase {
    pub fn new(repository: Arc<dyn SchoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 課題を作成（教師のみ）。`teacher_id` は呼び出し元になる
    pub async fn create(
        &self,
        caller: Option<&User>,
        draft: AssignmentDraft,
    ) -> Result<Assignment, ResourceError> {
        let teacher = authorize(caller, &[Role::Teacher])?;

        let assignment = self
            .repository
            .create_assignment(NewAssignment {
                title: Title::new(draft.title)?,
                description: draft.description,
                teacher_id: teacher.id,
                file_url: draft.file_url.unwrap_or_default(),
                due_date: draft.due_date,
                created_at: self.clock.now_utc(),
            })
            .await?;

        tracing::info!(
            "Teacher '{}' created assignment {}",
            teacher.username.as_str(),
            assignment.id
        );
        Ok(assignment)
    }

    /// 課題一覧。教師は自分の課題のみ、それ以外は全件
    pub async fn list(&self, caller: Option<&User>) -> Result<Vec<Assignment>, ResourceError> {
        let user = authorize(caller, &Role::ALL)?;
        let assignments = match user.role {
            Role::Teacher => self.repository.list_assignments_by_teacher(user.id).await,
            Role::Student | Role::Admin => self.repository.list_assignments().await,
        };
        Ok(assignments)
    }
}
