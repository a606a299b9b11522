//! InMemory School Repository 実装
//!
//! ドメイン層が定義する SchoolRepository trait の具体的な実装。
//! テーブルごとの Vec をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! プロセス終了でデータは失われます。PostgreSQL などの DBMS を実装する際は、
//! 同じ trait を実装した別の Repository を追加します。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Announcement, Assignment, AssignmentId, Grade, NewAnnouncement, NewAssignment, NewGrade,
    NewQuiz, NewQuizSubmission, NewUser, Quiz, QuizId, QuizSubmission, RepositoryError,
    SchoolRepository, User, UserId,
};

/// 全テーブルと ID 採番カウンタ
#[derive(Default)]
struct Tables {
    users: Vec<User>,
    assignments: Vec<Assignment>,
    quizzes: Vec<Quiz>,
    submissions: Vec<QuizSubmission>,
    grades: Vec<Grade>,
    announcements: Vec<Announcement>,
    last_id: i64,
}

impl Tables {
    /// SERIAL 相当の採番（全テーブル共通の単調増加）
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// インメモリ School Repository 実装
#[derive(Default)]
pub struct InMemorySchoolRepository {
    tables: Mutex<Tables>,
}

impl InMemorySchoolRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchoolRepository for InMemorySchoolRepository {
    async fn create_user(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' is already taken",
                user.username.as_str()
            )));
        }

        let id = UserId::new(tables.next_id())
            .map_err(|e| RepositoryError::Conflict(e.to_string()))?;
        let created = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            name: user.name,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_user(&self, id: UserId) -> Option<User> {
        let tables = self.tables.lock().await;
        tables.users.iter().find(|u| u.id == id).cloned()
    }

    async fn find_user_by_username(&self, username: &str) -> Option<User> {
        let tables = self.tables.lock().await;
        tables
            .users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned()
    }

    async fn list_users(&self) -> Vec<User> {
        self.tables.lock().await.users.clone()
    }

    async fn create_assignment(
        &self,
        assignment: NewAssignment,
    ) -> Result<Assignment, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let created = Assignment {
            id: tables.next_id(),
            title: assignment.title,
            description: assignment.description,
            teacher_id: assignment.teacher_id,
            file_url: assignment.file_url,
            due_date: assignment.due_date,
            created_at: assignment.created_at,
        };
        tables.assignments.push(created.clone());
        Ok(created)
    }

    async fn find_assignment(&self, id: AssignmentId) -> Option<Assignment> {
        let tables = self.tables.lock().await;
        tables.assignments.iter().find(|a| a.id == id).cloned()
    }

    async fn list_assignments(&self) -> Vec<Assignment> {
        self.tables.lock().await.assignments.clone()
    }

    async fn list_assignments_by_teacher(&self, teacher_id: UserId) -> Vec<Assignment> {
        let tables = self.tables.lock().await;
        tables
            .assignments
            .iter()
            .filter(|a| a.teacher_id == teacher_id)
            .cloned()
            .collect()
    }

    async fn create_quiz(&self, quiz: NewQuiz) -> Result<Quiz, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let created = Quiz {
            id: tables.next_id(),
            title: quiz.title,
            description: quiz.description,
            teacher_id: quiz.teacher_id,
            questions: quiz.questions,
            answers: quiz.answers,
            time_limit: quiz.time_limit,
            created_at: quiz.created_at,
        };
        tables.quizzes.push(created.clone());
        Ok(created)
    }

    async fn find_quiz(&self, id: QuizId) -> Option<Quiz> {
        let tables = self.tables.lock().await;
        tables.quizzes.iter().find(|q| q.id == id).cloned()
    }

    async fn list_quizzes(&self) -> Vec<Quiz> {
        self.tables.lock().await.quizzes.clone()
    }

    async fn list_quizzes_by_teacher(&self, teacher_id: UserId) -> Vec<Quiz> {
        let tables = self.tables.lock().await;
        tables
            .quizzes
            .iter()
            .filter(|q| q.teacher_id == teacher_id)
            .cloned()
            .collect()
    }

    async fn create_submission(
        &self,
        submission: NewQuizSubmission,
    ) -> Result<QuizSubmission, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.quizzes.iter().any(|q| q.id == submission.quiz_id) {
            return Err(RepositoryError::NotFound {
                entity: "quiz",
                id: submission.quiz_id,
            });
        }
        let created = QuizSubmission {
            id: tables.next_id(),
            student_id: submission.student_id,
            quiz_id: submission.quiz_id,
            answers: submission.answers,
            score: submission.score,
            completed_at: submission.completed_at,
        };
        tables.submissions.push(created.clone());
        Ok(created)
    }

    async fn list_submissions_by_student(&self, student_id: UserId) -> Vec<QuizSubmission> {
        let tables = self.tables.lock().await;
        tables
            .submissions
            .iter()
            .filter(|s| s.student_id == student_id)
            .cloned()
            .collect()
    }

    async fn create_grade(&self, grade: NewGrade) -> Result<Grade, RepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.assignments.iter().any(|a| a.id == grade.assignment_id) {
            return Err(RepositoryError::NotFound {
                entity: "assignment",
                id: grade.assignment_id,
            });
        }
        let created = Grade {
            id: tables.next_id(),
            student_id: grade.student_id,
            assignment_id: grade.assignment_id,
            grade: grade.grade,
            feedback: grade.feedback,
            submitted_at: grade.submitted_at,
        };
        tables.grades.push(created.clone());
        Ok(created)
    }

    async fn list_grades_by_student(&self, student_id: UserId) -> Vec<Grade> {
        let tables = self.tables.lock().await;
        tables
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect()
    }

    async fn create_announcement(
        &self,
        announcement: NewAnnouncement,
    ) -> Result<Announcement, RepositoryError> {
        let mut tables = self.tables.lock().await;
        let created = Announcement {
            id: tables.next_id(),
            title: announcement.title,
            content: announcement.content,
            admin_id: announcement.admin_id,
            target_role: announcement.target_role,
            created_at: announcement.created_at,
        };
        tables.announcements.push(created.clone());
        Ok(created)
    }

    async fn list_announcements(&self) -> Vec<Announcement> {
        self.tables.lock().await.announcements.clone()
    }
}
