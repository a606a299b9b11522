//! Entities
//!
//! チャットリレーの接続・メッセージと、学校リソース（ユーザー、課題、小テスト、
//! 成績、お知らせ）のドメインモデル。

use chrono::{DateTime, Utc};

use super::value_object::{
    ConnectionId, GradeValue, MessageText, Role, SenderName, Timestamp, Title, UserId, Username,
};

pub type AssignmentId = i64;
pub type QuizId = i64;
pub type SubmissionId = i64;
pub type GradeId = i64;
pub type AnnouncementId = i64;

// ========================================
// Chat relay
// ========================================

/// An ephemeral chat message in transit through the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: MessageText,
    /// Display-only label supplied by the client.
    pub sender: SenderName,
    /// Client clock, never reconciled with the server clock.
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(text: MessageText, sender: SenderName, timestamp: Timestamp) -> Self {
        Self {
            text,
            sender,
            timestamp,
        }
    }
}

/// Lifecycle of a relay connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// A live bidirectional channel between one client and the relay.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
    state: ConnectionState,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            connected_at,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == ConnectionState::Open
    }

    /// `Connecting → Open`. Returns `false` when the transition does not apply.
    pub fn open(&mut self) -> bool {
        if self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Open;
            true
        } else {
            false
        }
    }

    /// Move to `Closed` from any state. Closing twice is a no-op returning `false`.
    pub fn close(&mut self) -> bool {
        if self.state == ConnectionState::Closed {
            return false;
        }
        self.state = ConnectionState::Closed;
        true
    }
}

// ========================================
// School resources
// ========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: AssignmentId,
    pub title: Title,
    pub description: String,
    pub teacher_id: UserId,
    pub file_url: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub title: Title,
    pub description: String,
    pub teacher_id: UserId,
    pub file_url: String,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: QuizId,
    pub title: Title,
    pub description: String,
    pub teacher_id: UserId,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    /// Minutes allowed, if limited.
    pub time_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Count answers matching the key at the same position.
    ///
    /// Comparison ignores surrounding whitespace and ASCII case. Extra answers
    /// beyond the key are ignored.
    pub fn score(&self, submitted: &[String]) -> u32 {
        self.answers
            .iter()
            .zip(submitted)
            .filter(|(expected, given)| expected.trim().eq_ignore_ascii_case(given.trim()))
            .count() as u32
    }
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: Title,
    pub description: String,
    pub teacher_id: UserId,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub time_limit: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    pub id: SubmissionId,
    pub student_id: UserId,
    pub quiz_id: QuizId,
    pub answers: Vec<String>,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuizSubmission {
    pub student_id: UserId,
    pub quiz_id: QuizId,
    pub answers: Vec<String>,
    pub score: u32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub id: GradeId,
    pub student_id: UserId,
    pub assignment_id: AssignmentId,
    pub grade: GradeValue,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewGrade {
    pub student_id: UserId,
    pub assignment_id: AssignmentId,
    pub grade: GradeValue,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: Title,
    pub content: String,
    pub admin_id: UserId,
    /// `None` means everyone.
    pub target_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

impl Announcement {
    /// Whether a user with `role` should see this announcement.
    pub fn is_visible_to(&self, role: Role) -> bool {
        role == Role::Admin || self.target_role.is_none_or(|target| target == role)
    }
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: Title,
    pub content: String,
    pub admin_id: UserId,
    pub target_role: Option<Role>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> Connection {
        Connection::new(
            ConnectionId::new("conn-1".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    #[test]
    fn test_connection_starts_connecting() {
        // テスト項目: 新しい接続は Connecting 状態から始まる
        // given (前提条件):
        let conn = connection();

        // when (操作):
        let state = conn.state();

        // then (期待する結果):
        assert_eq!(state, ConnectionState::Connecting);
        assert!(!conn.is_open());
    }

    #[test]
    fn test_connection_opens_once() {
        // テスト項目: Connecting → Open の遷移は一度だけ成功する
        // given (前提条件):
        let mut conn = connection();

        // when (操作):
        let first = conn.open();
        let second = conn.open();

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(conn.is_open());
    }

    #[test]
    fn test_connection_close_is_idempotent() {
        // テスト項目: Closed への遷移は冪等で、Closed からは開けない
        // given (前提条件):
        let mut conn = connection();
        conn.open();

        // when (操作):
        let first = conn.close();
        let second = conn.close();
        let reopened = conn.open();

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert!(!reopened);
        assert_eq!(conn.state(), ConnectionState::Closed);
    }

    fn quiz(answers: &[&str]) -> Quiz {
        Quiz {
            id: 1,
            title: Title::new("Quiz".to_string()).unwrap(),
            description: String::new(),
            teacher_id: UserId::new(1).unwrap(),
            questions: answers.iter().map(|_| "?".to_string()).collect(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            time_limit: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_quiz_score_counts_matching_answers() {
        // テスト項目: 小テストの採点は同じ位置の一致数を数える（大文字小文字・空白は無視）
        // given (前提条件):
        let quiz = quiz(&["Paris", "4", "blue"]);
        let submitted = vec![" paris ".to_string(), "5".to_string(), "BLUE".to_string()];

        // when (操作):
        let score = quiz.score(&submitted);

        // then (期待する結果):
        assert_eq!(score, 2);
    }

    #[test]
    fn test_quiz_score_with_fewer_answers() {
        // テスト項目: 回答数が少ない場合、未回答は不正解として扱われる
        // given (前提条件):
        let quiz = quiz(&["a", "b", "c"]);
        let submitted = vec!["a".to_string()];

        // when (操作):
        let score = quiz.score(&submitted);

        // then (期待する結果):
        assert_eq!(score, 1);
    }

    fn announcement(target_role: Option<Role>) -> Announcement {
        Announcement {
            id: 1,
            title: Title::new("Notice".to_string()).unwrap(),
            content: "content".to_string(),
            admin_id: UserId::new(1).unwrap(),
            target_role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_announcement_visibility() {
        // テスト項目: 対象ロール付きのお知らせは対象ロールと管理者にのみ表示される
        // given (前提条件):
        let for_teachers = announcement(Some(Role::Teacher));
        let for_everyone = announcement(None);

        // when (操作) / then (期待する結果):
        assert!(for_teachers.is_visible_to(Role::Teacher));
        assert!(for_teachers.is_visible_to(Role::Admin));
        assert!(!for_teachers.is_visible_to(Role::Student));
        for role in Role::ALL {
            assert!(for_everyone.is_visible_to(role));
        }
    }
}
