//! UseCase: 成績の登録・閲覧

use std::sync::Arc;

use campus_shared::time::Clock;

use crate::domain::{
    AssignmentId, Grade, GradeValue, NewGrade, RepositoryError, Role, SchoolRepository, User,
    UserId, authorize,
};

use super::error::ResourceError;

/// 登録する成績の入力
#[derive(Debug, Clone)]
pub struct GradeDraft {
    pub student_id: i64,
    pub assignment_id: AssignmentId,
    pub grade: i64,
    pub feedback: Option<String>,
}

/// 成績のユースケース
pub struct GradeUseCase {
    repository: Arc<dyn SchoolRepository>,
    clock: Arc<dyn Clock>,
}

impl GradeUseCase {
    pub fn new(repository: Arc<dyn SchoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 成績を登録（教師のみ）。学生と課題が存在する必要がある
    pub async fn create(
        &self,
        caller: Option<&User>,
        draft: GradeDraft,
    ) -> Result<Grade, ResourceError> {
        let teacher = authorize(caller, &[Role::Teacher])?;

        let grade = GradeValue::new(draft.grade)?;
        let student_id = UserId::new(draft.student_id)?;
        let student = self
            .repository
            .find_user(student_id)
            .await
            .filter(|u| u.role == Role::Student)
            .ok_or(RepositoryError::NotFound {
                entity: "student",
                id: draft.student_id,
            })?;
        self.repository
            .find_assignment(draft.assignment_id)
            .await
            .ok_or(RepositoryError::NotFound {
                entity: "assignment",
                id: draft.assignment_id,
            })?;

        let feedback = draft
            .feedback
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty());
        let created = self
            .repository
            .create_grade(NewGrade {
                student_id: student.id,
                assignment_id: draft.assignment_id,
                grade,
                feedback,
                submitted_at: self.clock.now_utc(),
            })
            .await?;

        tracing::info!(
            "Teacher '{}' graded '{}' on assignment {}: {}",
            teacher.username.as_str(),
            student.username.as_str(),
            created.assignment_id,
            created.grade.value()
        );
        Ok(created)
    }

    /// 自分の成績一覧（学生のみ）
    pub async fn list_own(&self, caller: Option<&User>) -> Result<Vec<Grade>, ResourceError> {
        let student = authorize(caller, &[Role::Student])?;
        Ok(self.repository.list_grades_by_student(student.id).await)
    }
}
