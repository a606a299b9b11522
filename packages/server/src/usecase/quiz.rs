//! UseCase: 小テストの作成・一覧・提出
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - QuizUseCase の create / list / submit / list_own_submissions
//!
//! ### どのような状況を想定しているか
//! - 正常系：教師による作成、学生による提出と採点
//! - 異常系：問題と解答の数の不一致、存在しない小テストへの提出、権限違反

use std::sync::Arc;

use campus_shared::time::Clock;

use crate::domain::{
    NewQuiz, NewQuizSubmission, Quiz, QuizId, QuizSubmission, RepositoryError, Role,
    SchoolRepository, Title, User, ValueObjectError, authorize,
};

use super::error::ResourceError;

/// 作成する小テストの入力
#[derive(Debug, Clone)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub time_limit: Option<u32>,
}

/// 小テストのユースケース
pub struct QuizUseCase {
    repository: Arc<dyn SchoolRepository>,
    clock: Arc<dyn Clock>,
}

impl QuizUseCase {
    pub fn new(repository: Arc<dyn SchoolRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// 小テストを作成（教師のみ）
    pub async fn create(
        &self,
        caller: Option<&User>,
        draft: QuizDraft,
    ) -> Result<Quiz, ResourceError> {
        let teacher = authorize(caller, &[Role::Teacher])?;

        let title = Title::new(draft.title)?;
        if draft.questions.is_empty() {
            return Err(ValueObjectError::Empty { field: "questions" }.into());
        }
        if draft.questions.len() != draft.answers.len() {
            return Err(ResourceError::Invalid(format!(
                "quiz has {} questions but {} answers",
                draft.questions.len(),
                draft.answers.len()
            )));
        }
        if draft.time_limit == Some(0) {
            return Err(ValueObjectError::Invalid {
                field: "timeLimit",
                reason: "must be a positive number of minutes".to_string(),
            }
            .into());
        }

        let quiz = self
            .repository
            .create_quiz(NewQuiz {
                title,
                description: draft.description,
                teacher_id: teacher.id,
                questions: draft.questions,
                answers: draft.answers,
                time_limit: draft.time_limit,
                created_at: self.clock.now_utc(),
            })
            .await?;

        tracing::info!(
            "Teacher '{}' created quiz {} with {} questions",
            teacher.username.as_str(),
            quiz.id,
            quiz.questions.len()
        );
        Ok(quiz)
    }

    /// 小テスト一覧。教師は自分の小テストのみ、それ以外は全件
    pub async fn list(&self, caller: Option<&User>) -> Result<Vec<Quiz>, ResourceError> {
        let user = authorize(caller, &Role::ALL)?;
        let quizzes = match user.role {
            Role::Teacher => self.repository.list_quizzes_by_teacher(user.id).await,
            Role::Student | Role::Admin => self.repository.list_quizzes().await,
        };
        Ok(quizzes)
    }

    /// 解答を提出して採点（学生のみ）
    pub async fn submit(
        &self,
        caller: Option<&User>,
        quiz_id: QuizId,
        answers: Vec<String>,
    ) -> Result<QuizSubmission, ResourceError> {
        let student = authorize(caller, &[Role::Student])?;

        let quiz = self
            .repository
            .find_quiz(quiz_id)
            .await
            .ok_or(RepositoryError::NotFound {
                entity: "quiz",
                id: quiz_id,
            })?;
        let score = quiz.score(&answers);

        let submission = self
            .repository
            .create_submission(NewQuizSubmission {
                student_id: student.id,
                quiz_id,
                answers,
                score,
                completed_at: self.clock.now_utc(),
            })
            .await?;

        tracing::info!(
            "Student '{}' submitted quiz {}: {}/{}",
            student.username.as_str(),
            quiz_id,
            score,
            quiz.answers.len()
        );
        Ok(submission)
    }

    /// 自分の提出一覧（学生のみ）
    pub async fn list_own_submissions(
        &self,
        caller: Option<&User>,
    ) -> Result<Vec<QuizSubmission>, ResourceError> {
        let student = authorize(caller, &[Role::Student])?;
        Ok(self.repository.list_submissions_by_student(student.id).await)
    }
}
