//! Shared application state.

use std::sync::Arc;

use crate::{
    config::RelayConfig,
    usecase::{
        AnnouncementUseCase, AssignmentUseCase, AuthUseCase, ConnectPeerUseCase,
        DisconnectPeerUseCase, GradeUseCase, QuizUseCase, RelayMessageUseCase, UserUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// Limits and timers applied to every relay connection
    pub relay_config: RelayConfig,
    /// ConnectPeerUseCase（ピア接続のユースケース）
    pub connect_peer_usecase: Arc<ConnectPeerUseCase>,
    /// DisconnectPeerUseCase（ピア切断のユースケース）
    pub disconnect_peer_usecase: Arc<DisconnectPeerUseCase>,
    /// RelayMessageUseCase（メッセージリレーのユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    pub auth_usecase: Arc<AuthUseCase>,
    pub user_usecase: Arc<UserUseCase>,
    pub assignment_usecase: Arc<AssignmentUseCase>,
    pub quiz_usecase: Arc<QuizUseCase>,
    pub grade_usecase: Arc<GradeUseCase>,
    pub announcement_usecase: Arc<AnnouncementUseCase>,
}
