//! Server construction and execution.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use campus_shared::time::{Clock, SystemClock};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    infrastructure::{
        password::Argon2PasswordHasher,
        registry::InMemoryConnectionRegistry,
        repository::{InMemorySchoolRepository, InMemorySessionStore},
    },
    usecase::{
        AnnouncementUseCase, AssignmentUseCase, AuthUseCase, ConnectPeerUseCase,
        DisconnectPeerUseCase, GradeUseCase, QuizUseCase, RelayMessageUseCase, UserUseCase,
    },
};

use super::{
    handler::{
        create_announcement, create_assignment, create_grade, create_quiz, current_user,
        health_check, list_announcements, list_assignments, list_own_grades,
        list_own_submissions, list_quizzes, list_students, list_users, login, logout,
        register_user, submit_quiz, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay and school resource API server
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig::default();
/// let server = Server::from_config(&config).await?;
/// server.run(config.host.clone(), config.port).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Wire the in-memory stores and use cases, and seed the admin account if configured.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        config.validate()?;

        // Initialize dependencies in order:
        // 1. Registry / Repositories
        // 2. UseCases
        // 3. AppState

        // 1. Create Registry and Repositories (in-memory)
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let repository = Arc::new(InMemorySchoolRepository::new());
        let sessions = Arc::new(InMemorySessionStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        // 2. Create UseCases
        let auth_usecase = Arc::new(AuthUseCase::new(
            repository.clone(),
            sessions,
            hasher.clone(),
            clock.clone(),
            config.session_ttl,
        ));
        if let Some(seed) = &config.admin_seed {
            auth_usecase.seed_admin(seed).await?;
        }

        // 3. Create AppState
        let state = AppState {
            relay_config: config.relay.clone(),
            connect_peer_usecase: Arc::new(ConnectPeerUseCase::new(registry.clone())),
            disconnect_peer_usecase: Arc::new(DisconnectPeerUseCase::new(registry.clone())),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(registry)),
            auth_usecase,
            user_usecase: Arc::new(UserUseCase::new(repository.clone(), hasher)),
            assignment_usecase: Arc::new(AssignmentUseCase::new(
                repository.clone(),
                clock.clone(),
            )),
            quiz_usecase: Arc::new(QuizUseCase::new(repository.clone(), clock.clone())),
            grade_usecase: Arc::new(GradeUseCase::new(repository.clone(), clock.clone())),
            announcement_usecase: Arc::new(AnnouncementUseCase::new(repository, clock)),
        };

        Ok(Self::new(Arc::new(state)))
    }

    /// Build the router with every route.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/login", post(login))
            .route("/api/logout", post(logout))
            .route("/api/user", get(current_user))
            .route("/api/register", post(register_user))
            .route("/api/users", get(list_users))
            .route("/api/users/students", get(list_students))
            .route(
                "/api/assignments",
                get(list_assignments).post(create_assignment),
            )
            .route("/api/quizzes", get(list_quizzes).post(create_quiz))
            .route("/api/quizzes/{quiz_id}/submit", post(submit_quiz))
            .route("/api/student/quizzes", get(list_own_submissions))
            .route("/api/student/grades", get(list_own_grades))
            .route("/api/grades", post(create_grade))
            .route(
                "/api/announcements",
                get(list_announcements).post(create_announcement),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Campus server listening on {}", listener.local_addr()?);
        tracing::info!("Chat relay: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
