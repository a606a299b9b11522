//! UseCase layer
//!
//! ドメインモデルと trait を組み合わせたアプリケーションの操作。
//! 各ユースケースは依存を `Arc<dyn Trait>` で受け取ります。

pub mod announcement;
pub mod assignment;
pub mod auth;
pub mod connect_peer;
pub mod disconnect_peer;
pub mod error;
pub mod grade;
pub mod quiz;
pub mod relay_message;
pub mod user;

pub use announcement::{AnnouncementDraft, AnnouncementUseCase};
pub use assignment::{AssignmentDraft, AssignmentUseCase};
pub use auth::AuthUseCase;
pub use connect_peer::ConnectPeerUseCase;
pub use disconnect_peer::DisconnectPeerUseCase;
pub use error::{AuthError, ConnectError, ResourceError};
pub use grade::{GradeDraft, GradeUseCase};
pub use quiz::{QuizDraft, QuizUseCase};
pub use relay_message::RelayMessageUseCase;
pub use user::{UserDraft, UserUseCase};
