//! Conversion logic between DTOs and domain entities.

use crate::{
    config::RelayConfig,
    domain::{
        Announcement, Assignment, ChatMessage, Grade, MalformedFrame, MessageText, OutboundFrame,
        Quiz, QuizSubmission, SenderName, Timestamp, User,
    },
    infrastructure::dto::{http, websocket as ws},
    usecase::{AnnouncementDraft, AssignmentDraft, GradeDraft, QuizDraft, UserDraft},
};

// ========================================
// WebSocket frames
// ========================================

/// Decode and validate one inbound text frame.
///
/// Checks run in order: size, JSON shape, field values.
pub fn decode_chat_frame(payload: &str, limits: &RelayConfig) -> Result<ChatMessage, MalformedFrame> {
    if payload.len() > limits.max_frame_bytes {
        return Err(MalformedFrame::TooLarge {
            size: payload.len(),
            max: limits.max_frame_bytes,
        });
    }

    let frame: ws::ChatFrame =
        serde_json::from_str(payload).map_err(|e| MalformedFrame::InvalidJson(e.to_string()))?;

    Ok(ChatMessage::new(
        MessageText::new(frame.text, limits.max_text_chars)?,
        SenderName::new(frame.sender, limits.max_sender_chars)?,
        Timestamp::new(frame.timestamp),
    ))
}

/// Canonical encoding of a validated message, shared by every recipient.
pub fn encode_chat_frame(message: &ChatMessage) -> Result<OutboundFrame, serde_json::Error> {
    let frame = ws::ChatFrame::from(message.clone());
    Ok(OutboundFrame::from(serde_json::to_string(&frame)?))
}

impl From<ChatMessage> for ws::ChatFrame {
    fn from(model: ChatMessage) -> Self {
        Self {
            text: model.text.into_string(),
            sender: model.sender.into_string(),
            timestamp: model.timestamp.value(),
        }
    }
}

// ========================================
// HTTP request DTO → UseCase input
// ========================================

impl From<http::RegisterRequest> for UserDraft {
    fn from(dto: http::RegisterRequest) -> Self {
        Self {
            username: dto.username,
            password: dto.password,
            name: dto.name,
            role: dto.role,
        }
    }
}

impl From<http::CreateAssignmentRequest> for AssignmentDraft {
    fn from(dto: http::CreateAssignmentRequest) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            file_url: dto.file_url,
            due_date: dto.due_date,
        }
    }
}

impl From<http::CreateQuizRequest> for QuizDraft {
    fn from(dto: http::CreateQuizRequest) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            questions: dto.questions,
            answers: dto.answers,
            time_limit: dto.time_limit,
        }
    }
}

impl From<http::CreateGradeRequest> for GradeDraft {
    fn from(dto: http::CreateGradeRequest) -> Self {
        Self {
            student_id: dto.student_id,
            assignment_id: dto.assignment_id,
            grade: dto.grade,
            feedback: dto.feedback,
        }
    }
}

impl From<http::CreateAnnouncementRequest> for AnnouncementDraft {
    fn from(dto: http::CreateAnnouncementRequest) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
            target_role: dto.target_role,
        }
    }
}

// ========================================
// Domain Entity → HTTP response DTO
// ========================================

impl From<User> for http::UserResponse {
    fn from(model: User) -> Self {
        Self {
            id: model.id.value(),
            username: model.username.as_str().to_string(),
            role: model.role,
            name: model.name,
        }
    }
}

impl From<Assignment> for http::AssignmentResponse {
    fn from(model: Assignment) -> Self {
        Self {
            id: model.id,
            title: model.title.as_str().to_string(),
            description: model.description,
            teacher_id: model.teacher_id.value(),
            file_url: model.file_url,
            due_date: model.due_date,
            created_at: model.created_at,
        }
    }
}

impl From<Quiz> for http::QuizResponse {
    fn from(model: Quiz) -> Self {
        Self {
            id: model.id,
            title: model.title.as_str().to_string(),
            description: model.description,
            teacher_id: model.teacher_id.value(),
            questions: model.questions,
            answers: Some(model.answers),
            time_limit: model.time_limit,
            created_at: model.created_at,
        }
    }
}

impl http::QuizResponse {
    /// Same quiz with the answer key removed.
    pub fn without_answers(self) -> Self {
        Self {
            answers: None,
            ..self
        }
    }
}

impl From<QuizSubmission> for http::SubmissionResponse {
    fn from(model: QuizSubmission) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id.value(),
            quiz_id: model.quiz_id,
            answers: model.answers,
            score: model.score,
            completed_at: model.completed_at,
        }
    }
}

impl From<Grade> for http::GradeResponse {
    fn from(model: Grade) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id.value(),
            assignment_id: model.assignment_id,
            grade: model.grade.value(),
            feedback: model.feedback,
            submitted_at: model.submitted_at,
        }
    }
}

impl From<Announcement> for http::AnnouncementResponse {
    fn from(model: Announcement) -> Self {
        Self {
            id: model.id,
            title: model.title.as_str().to_string(),
            content: model.content,
            admin_id: model.admin_id.value(),
            target_role: model.target_role,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId, Username, ValueObjectError};

    fn limits() -> RelayConfig {
        RelayConfig {
            max_frame_bytes: 256,
            max_text_chars: 10,
            max_sender_chars: 5,
            ..RelayConfig::default()
        }
    }

    #[test]
    fn test_decode_valid_frame() {
        // テスト項目: 正しいフレームは ChatMessage にデコードされる
        // given (前提条件):
        let payload = r#"{"text":"hello","sender":"bob","timestamp":1000}"#;

        // when (操作):
        let message = decode_chat_frame(payload, &limits()).unwrap();

        // then (期待する結果):
        assert_eq!(message.text.as_str(), "hello");
        assert_eq!(message.sender.as_str(), "bob");
        assert_eq!(message.timestamp, Timestamp::new(1000));
    }

    #[test]
    fn test_decode_rejects_oversized_frame() {
        // テスト項目: サイズ上限を超えるフレームは JSON として解析される前に拒否される
        // given (前提条件):
        let payload = "x".repeat(257);

        // when (操作):
        let result = decode_chat_frame(&payload, &limits());

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MalformedFrame::TooLarge {
                size: 257,
                max: 256
            })
        );
    }

    #[test]
    fn test_decode_rejects_non_json_and_wrong_shape() {
        // テスト項目: JSON でないフレーム・フィールドが欠けたフレームは InvalidJson
        // given (前提条件):
        let garbage = "not json";
        let missing_sender = r#"{"text":"hi","timestamp":1}"#;
        let float_timestamp = r#"{"text":"hi","sender":"a","timestamp":1.5}"#;

        // when (操作):
        let results = [garbage, missing_sender, float_timestamp]
            .map(|payload| decode_chat_frame(payload, &limits()));

        // then (期待する結果):
        for result in results {
            assert!(matches!(result, Err(MalformedFrame::InvalidJson(_))));
        }
    }

    #[test]
    fn test_decode_rejects_invalid_fields() {
        // テスト項目: 空のテキスト・長すぎる送信者名は InvalidField
        // given (前提条件):
        let blank_text = r#"{"text":"   ","sender":"a","timestamp":1}"#;
        let long_sender = r#"{"text":"hi","sender":"abcdef","timestamp":1}"#;

        // when (操作):
        let blank = decode_chat_frame(blank_text, &limits());
        let long = decode_chat_frame(long_sender, &limits());

        // then (期待する結果):
        assert!(matches!(
            blank,
            Err(MalformedFrame::InvalidField(ValueObjectError::Empty { .. }))
        ));
        assert!(matches!(
            long,
            Err(MalformedFrame::InvalidField(ValueObjectError::TooLong { .. }))
        ));
    }

    #[test]
    fn test_encode_drops_unknown_fields() {
        // テスト項目: 再エンコードされたフレームには既知のフィールドだけが含まれる
        // given (前提条件):
        let payload = r#"{"text":"hi","sender":"a","timestamp":7,"admin":true}"#;
        let message = decode_chat_frame(payload, &limits()).unwrap();

        // when (操作):
        let frame = encode_chat_frame(&message).unwrap();

        // then (期待する結果):
        let value: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"text": "hi", "sender": "a", "timestamp": 7})
        );
    }

    #[test]
    fn test_user_response_has_no_password_hash() {
        // テスト項目: ユーザーのレスポンスにパスワードハッシュが含まれない
        // given (前提条件):
        let user = User {
            id: UserId::new(3).unwrap(),
            username: Username::new("alice".to_string()).unwrap(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Teacher,
            name: "Alice".to_string(),
        };

        // when (操作):
        let json = serde_json::to_value(http::UserResponse::from(user)).unwrap();

        // then (期待する結果):
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "username": "alice", "role": "teacher", "name": "Alice"})
        );
    }

    #[test]
    fn test_quiz_response_without_answers() {
        // テスト項目: 解答キーを除いたレスポンスでは answers が出力されない
        // given (前提条件):
        let quiz = Quiz {
            id: 1,
            title: crate::domain::Title::new("Q".to_string()).unwrap(),
            description: String::new(),
            teacher_id: UserId::new(2).unwrap(),
            questions: vec!["1+1?".to_string()],
            answers: vec!["2".to_string()],
            time_limit: None,
            created_at: chrono::Utc::now(),
        };

        // when (操作):
        let json = serde_json::to_value(http::QuizResponse::from(quiz).without_answers()).unwrap();

        // then (期待する結果):
        assert!(json.get("answers").is_none());
        assert_eq!(json["teacherId"], 2);
        assert_eq!(json["questions"], serde_json::json!(["1+1?"]));
    }
}
