//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    Announcement, Assignment, AssignmentId, Grade, NewAnnouncement, NewAssignment, NewGrade,
    NewQuiz, NewQuizSubmission, NewUser, Quiz, QuizId, QuizSubmission, RepositoryError,
    SessionToken, Timestamp, User, UserId,
};

/// School Repository trait
///
/// ユーザー、課題、小テスト、提出、成績、お知らせの永続化を担当する。
/// ID の採番はリポジトリが行う。
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// ユーザーを作成（ユーザー名が重複する場合は Conflict）
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_user(&self, id: UserId) -> Option<User>;

    async fn find_user_by_username(&self, username: &str) -> Option<User>;

    /// 全ユーザーを ID 順で取得
    async fn list_users(&self) -> Vec<User>;

    async fn create_assignment(
        &self,
        assignment: NewAssignment,
    ) -> Result<Assignment, RepositoryError>;

    async fn find_assignment(&self, id: AssignmentId) -> Option<Assignment>;

    async fn list_assignments(&self) -> Vec<Assignment>;

    async fn list_assignments_by_teacher(&self, teacher_id: UserId) -> Vec<Assignment>;

    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz, RepositoryError>;

    async fn find_quiz(&self, id: QuizId) -> Option<Quiz>;

    async fn list_quizzes(&self) -> Vec<Quiz>;

    async fn list_quizzes_by_teacher(&self, teacher_id: UserId) -> Vec<Quiz>;

    async fn create_submission(
        &self,
        submission: NewQuizSubmission,
    ) -> Result<QuizSubmission, RepositoryError>;

    async fn list_submissions_by_student(&self, student_id: UserId) -> Vec<QuizSubmission>;

    async fn create_grade(&self, grade: NewGrade) -> Result<Grade, RepositoryError>;

    async fn list_grades_by_student(&self, student_id: UserId) -> Vec<Grade>;

    async fn create_announcement(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, RepositoryError>;

    async fn list_announcements(&self) -> Vec<Announcement>;
}

/// Session Repository trait
///
/// ログインセッション（ベアラートークン → ユーザー ID）を管理する。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// `expires_at` まで有効なセッションを発行
    async fn create(&self, user_id: UserId, expires_at: Timestamp) -> SessionToken;

    /// 有効なセッションのユーザー ID を取得（期限切れは削除して `None`）
    async fn resolve(&self, token: &SessionToken, now: Timestamp) -> Option<UserId>;

    /// セッションを破棄。存在しなかった場合は `false`
    async fn revoke(&self, token: &SessionToken) -> bool;
}

/// Password hashing and verification.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, String>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}
