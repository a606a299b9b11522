//! Resource API integration tests.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot` (no TCP).

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use campus_server::{
    config::{AdminSeed, ServerConfig},
    ui::Server,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_PASSWORD: &str = "admin-pass";

/// Build a test app with a seeded admin account.
async fn test_app() -> Router {
    let config = ServerConfig {
        admin_seed: Some(AdminSeed {
            username: "admin".to_string(),
            password: ADMIN_PASSWORD.to_string(),
            name: "Administrator".to_string(),
        }),
        ..ServerConfig::default()
    };
    Server::from_config(&config).await.unwrap().router()
}

/// Helper: send a request and return the status and JSON body (`Null` when empty).
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!("not valid JSON: {}", String::from_utf8_lossy(&bytes));
        })
    };
    (status, json)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": username, "password": password})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Admin registers a user and returns (id, token).
async fn register_and_login(app: &Router, admin: &str, username: &str, role: &str) -> (i64, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        Some(admin),
        Some(json!({
            "username": username,
            "password": "pw",
            "name": username,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let id = body["id"].as_i64().unwrap();
    (id, login(app, username, "pw").await)
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェックは認証なしで {"status": "ok"} を返す
    // given (前提条件):
    let app = test_app().await;

    // when (操作):
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_unauthenticated_request_is_400_unauthorized() {
    // テスト項目: 認証が必要なエンドポイントへの未認証リクエストは 400 Unauthorized
    // given (前提条件):
    let app = test_app().await;

    // when (操作):
    let (status, body) = send(&app, Method::GET, "/api/assignments", None, None).await;
    let (bad_token_status, bad_token_body) =
        send(&app, Method::GET, "/api/user", Some("bogus"), None).await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Unauthorized"}));
    assert_eq!(bad_token_status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_token_body, json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn test_wrong_role_is_400_forbidden() {
    // テスト項目: 権限のないロールでのリクエストは 400 Forbidden
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, student) = register_and_login(&app, &admin, "stu", "student").await;

    // when (操作):
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/assignments",
        Some(&student),
        Some(json!({
            "title": "Essay",
            "description": "",
            "dueDate": "2030-01-01T00:00:00Z",
        })),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Forbidden"}));
}

#[tokio::test]
async fn test_login_failure_and_logout() {
    // テスト項目: 誤ったパスワードでのログインは 400、ログアウト後のトークンは無効
    // given (前提条件):
    let app = test_app().await;

    // when (操作):
    let (failed_status, failed_body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": "admin", "password": "wrong"})),
    )
    .await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (me_status, me) = send(&app, Method::GET, "/api/user", Some(&token), None).await;
    let (logout_status, _) = send(&app, Method::POST, "/api/logout", Some(&token), None).await;
    let (after_status, _) = send(&app, Method::GET, "/api/user", Some(&token), None).await;

    // then (期待する結果):
    assert_eq!(failed_status, StatusCode::BAD_REQUEST);
    assert!(failed_body["error"].is_string());
    assert_eq!(me_status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
    assert_eq!(me["role"], "admin");
    assert!(me.get("passwordHash").is_none());
    assert!(me.get("password_hash").is_none());
    assert_eq!(logout_status, StatusCode::NO_CONTENT);
    assert_eq!(after_status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_400_with_error() {
    // テスト項目: JSON として不正なリクエストボディも 400 {error} になる
    // given (前提条件):
    let app = test_app().await;

    // when (操作):
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": "admin"})),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_quiz_flow_scores_submission() {
    // テスト項目: 教師が作成した小テストに学生が解答すると、一致した解答数が点数になる
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, teacher) = register_and_login(&app, &admin, "teach", "teacher").await;
    let (student_id, student) = register_and_login(&app, &admin, "stu", "student").await;

    let (status, quiz) = send(
        &app,
        Method::POST,
        "/api/quizzes",
        Some(&teacher),
        Some(json!({
            "title": "Math",
            "description": "Arithmetic",
            "questions": ["1+1", "2+2", "3+3"],
            "answers": ["2", "4", "6"],
            "timeLimit": 5,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let quiz_id = quiz["id"].as_i64().unwrap();

    // when (操作):
    let (_, listed) = send(&app, Method::GET, "/api/quizzes", Some(&student), None).await;
    let (submit_status, submission) = send(
        &app,
        Method::POST,
        &format!("/api/quizzes/{quiz_id}/submit"),
        Some(&student),
        Some(json!({"answers": ["2", "5", "6"]})),
    )
    .await;
    let (_, own) = send(&app, Method::GET, "/api/student/quizzes", Some(&student), None).await;

    // then (期待する結果):
    assert_eq!(quiz["answers"], json!(["2", "4", "6"]));
    assert_eq!(listed[0]["questions"], json!(["1+1", "2+2", "3+3"]));
    assert!(listed[0].get("answers").is_none());
    assert_eq!(submit_status, StatusCode::CREATED);
    assert_eq!(submission["score"], 2);
    assert_eq!(submission["studentId"], student_id);
    assert_eq!(own.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_submit_to_missing_quiz_is_400() {
    // テスト項目: 存在しない小テストへの提出は 400
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, student) = register_and_login(&app, &admin, "stu", "student").await;

    // when (操作):
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/quizzes/999/submit",
        Some(&student),
        Some(json!({"answers": []})),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "quiz 999 not found"}));
}

#[tokio::test]
async fn test_assignment_and_grade_flow() {
    // テスト項目: 教師が課題を作成して採点し、学生が自分の成績を取得できる
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;
    let (teacher_id, teacher) = register_and_login(&app, &admin, "teach", "teacher").await;
    let (student_id, student) = register_and_login(&app, &admin, "stu", "student").await;

    let (status, assignment) = send(
        &app,
        Method::POST,
        "/api/assignments",
        Some(&teacher),
        Some(json!({
            "title": "Essay",
            "description": "500 words",
            "dueDate": "2030-01-01T00:00:00Z",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(assignment["teacherId"], teacher_id);
    assert_eq!(assignment["fileUrl"], "");

    // when (操作):
    let (grade_status, grade) = send(
        &app,
        Method::POST,
        "/api/grades",
        Some(&teacher),
        Some(json!({
            "studentId": student_id,
            "assignmentId": assignment["id"],
            "grade": 88,
            "feedback": "Good",
        })),
    )
    .await;
    let (out_of_range, _) = send(
        &app,
        Method::POST,
        "/api/grades",
        Some(&teacher),
        Some(json!({
            "studentId": student_id,
            "assignmentId": assignment["id"],
            "grade": 150,
        })),
    )
    .await;
    let (_, grades) = send(&app, Method::GET, "/api/student/grades", Some(&student), None).await;
    let (_, students) = send(&app, Method::GET, "/api/users/students", Some(&teacher), None).await;

    // then (期待する結果):
    assert_eq!(grade_status, StatusCode::CREATED);
    assert_eq!(grade["grade"], 88);
    assert_eq!(out_of_range, StatusCode::BAD_REQUEST);
    assert_eq!(grades.as_array().unwrap().len(), 1);
    assert_eq!(grades[0]["feedback"], "Good");
    assert_eq!(students, json!([{"id": student_id, "username": "stu", "role": "student", "name": "stu"}]));
}

#[tokio::test]
async fn test_announcements_are_filtered_by_role() {
    // テスト項目: 他ロール向けのお知らせは管理者以外には表示されない
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, student) = register_and_login(&app, &admin, "stu", "student").await;
    for (title, target) in [("all", Value::Null), ("teachers", json!("teacher"))] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/announcements",
            Some(&admin),
            Some(json!({"title": title, "content": "...", "targetRole": target})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // when (操作):
    let (_, for_student) = send(&app, Method::GET, "/api/announcements", Some(&student), None).await;
    let (_, for_admin) = send(&app, Method::GET, "/api/announcements", Some(&admin), None).await;

    // then (期待する結果):
    let titles = |list: &Value| -> Vec<String> {
        list.as_array()
            .unwrap()
            .iter()
            .map(|a| a["title"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(titles(&for_student), vec!["all"]);
    assert_eq!(titles(&for_admin), vec!["all", "teachers"]);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    // テスト項目: 既存のユーザー名での登録は 400
    // given (前提条件):
    let app = test_app().await;
    let admin = login(&app, "admin", ADMIN_PASSWORD).await;

    // when (操作):
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        Some(&admin),
        Some(json!({"username": "admin", "password": "x", "name": "Dup", "role": "teacher"})),
    )
    .await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already taken"));
}
