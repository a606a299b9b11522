//! Domain layer
//!
//! ビジネスルールとドメインモデル。外部のフレームワーク（axum など）には依存しない。

pub mod access;
pub mod entity;
pub mod error;
pub mod factory;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use access::{AccessError, authorize};
pub use entity::{
    Announcement, AnnouncementId, Assignment, AssignmentId, ChatMessage, Connection,
    ConnectionState, Grade, GradeId, NewAnnouncement, NewAssignment, NewGrade, NewQuiz,
    NewQuizSubmission, NewUser, Quiz, QuizId, QuizSubmission, SubmissionId, User,
};
pub use error::{DeliveryFailure, MalformedFrame, RelayError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, SessionTokenFactory};
pub use registry::{
    BroadcastReport, ConnectionRegistry, EvictionNotice, OutboundFrame, PeerChannel,
};
pub use repository::{PasswordHasher, SchoolRepository, SessionRepository};
pub use value_object::{
    ConnectionId, GradeValue, MessageText, Role, SenderName, SessionToken, Timestamp, Title,
    UserId, Username,
};
