mod auth;
mod http;
mod resources;
mod websocket;

pub use auth::{current_user, login, logout};
pub use http::health_check;
pub use resources::{
    create_announcement, create_assignment, create_grade, create_quiz, list_announcements,
    list_assignments, list_own_grades, list_own_submissions, list_quizzes, list_students,
    list_users, register_user, submit_quiz,
};
pub use websocket::websocket_handler;
