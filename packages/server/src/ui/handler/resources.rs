//! Role-gated resource endpoints.
//!
//! Handlers only translate between DTOs and use cases; the role rules live in the use cases.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    domain::{Quiz, QuizId, Role, User},
    infrastructure::dto::http::{
        AnnouncementResponse, AssignmentResponse, CreateAnnouncementRequest,
        CreateAssignmentRequest, CreateGradeRequest, CreateQuizRequest, GradeResponse,
        QuizResponse, RegisterRequest, SubmissionResponse, SubmitQuizRequest, UserResponse,
    },
    ui::{
        error::ApiError,
        extractor::{ApiJson, ApiPath, Caller},
        state::AppState,
    },
};

type Created<T> = (StatusCode, Json<T>);

fn created<T>(body: T) -> Created<T> {
    (StatusCode::CREATED, Json(body))
}

fn into_responses<M, D: From<M>>(models: Vec<M>) -> Json<Vec<D>> {
    Json(models.into_iter().map(D::from).collect())
}

/// The answer key is shown to the quiz's author and to admins.
fn quiz_response(quiz: Quiz, viewer: Option<&User>) -> QuizResponse {
    let reveal = viewer.is_some_and(|u| u.role == Role::Admin || u.id == quiz.teacher_id);
    let response = QuizResponse::from(quiz);
    if reveal {
        response
    } else {
        response.without_answers()
    }
}

// ========================================
// Users
// ========================================

/// `POST /api/register`
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Created<UserResponse>, ApiError> {
    let user = state
        .user_usecase
        .register(caller.user(), body.into())
        .await?;
    Ok(created(user.into()))
}

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_usecase.list(caller.user()).await?;
    Ok(into_responses(users))
}

/// `GET /api/users/students`
pub async fn list_students(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let students = state.user_usecase.list_students(caller.user()).await?;
    Ok(into_responses(students))
}

// ========================================
// Assignments
// ========================================

/// `POST /api/assignments`
pub async fn create_assignment(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiJson(body): ApiJson<CreateAssignmentRequest>,
) -> Result<Created<AssignmentResponse>, ApiError> {
    let assignment = state
        .assignment_usecase
        .create(caller.user(), body.into())
        .await?;
    Ok(created(assignment.into()))
}

/// `GET /api/assignments`
pub async fn list_assignments(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<AssignmentResponse>>, ApiError> {
    let assignments = state.assignment_usecase.list(caller.user()).await?;
    Ok(into_responses(assignments))
}

// ========================================
// Quizzes
// ========================================

/// `POST /api/quizzes`
pub async fn create_quiz(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiJson(body): ApiJson<CreateQuizRequest>,
) -> Result<Created<QuizResponse>, ApiError> {
    let quiz = state.quiz_usecase.create(caller.user(), body.into()).await?;
    Ok(created(quiz_response(quiz, caller.user())))
}

/// `GET /api/quizzes`
pub async fn list_quizzes(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<QuizResponse>>, ApiError> {
    let quizzes = state.quiz_usecase.list(caller.user()).await?;
    Ok(Json(
        quizzes
            .into_iter()
            .map(|quiz| quiz_response(quiz, caller.user()))
            .collect(),
    ))
}

/// `POST /api/quizzes/{quiz_id}/submit`
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiPath(quiz_id): ApiPath<QuizId>,
    ApiJson(body): ApiJson<SubmitQuizRequest>,
) -> Result<Created<SubmissionResponse>, ApiError> {
    let submission = state
        .quiz_usecase
        .submit(caller.user(), quiz_id, body.answers)
        .await?;
    Ok(created(submission.into()))
}

/// `GET /api/student/quizzes`
pub async fn list_own_submissions(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<SubmissionResponse>>, ApiError> {
    let submissions = state
        .quiz_usecase
        .list_own_submissions(caller.user())
        .await?;
    Ok(into_responses(submissions))
}

// ========================================
// Grades
// ========================================

/// `POST /api/grades`
pub async fn create_grade(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiJson(body): ApiJson<CreateGradeRequest>,
) -> Result<Created<GradeResponse>, ApiError> {
    let grade = state.grade_usecase.create(caller.user(), body.into()).await?;
    Ok(created(grade.into()))
}

/// `GET /api/student/grades`
pub async fn list_own_grades(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<GradeResponse>>, ApiError> {
    let grades = state.grade_usecase.list_own(caller.user()).await?;
    Ok(into_responses(grades))
}

// ========================================
// Announcements
// ========================================

/// `POST /api/announcements`
pub async fn create_announcement(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    ApiJson(body): ApiJson<CreateAnnouncementRequest>,
) -> Result<Created<AnnouncementResponse>, ApiError> {
    let announcement = state
        .announcement_usecase
        .create(caller.user(), body.into())
        .await?;
    Ok(created(announcement.into()))
}

/// `GET /api/announcements`
pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<Vec<AnnouncementResponse>>, ApiError> {
    let announcements = state.announcement_usecase.list(caller.user()).await?;
    Ok(into_responses(announcements))
}
