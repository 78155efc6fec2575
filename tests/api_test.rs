use axum::http::StatusCode;
use axum_test::TestServer;
use enrollment_backend::{
    api::router,
    db::{self, repository},
    models::{NewCommentRequest, NewCompanyRequest, NewCourseRequest, NewUserRequest},
    state::AppState,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

async fn setup() -> (TestServer, SqlitePool) {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create database");
    db::migrate(&pool).await.expect("Failed to run migrations");

    let server = TestServer::new(router(AppState { db: pool.clone() }))
        .expect("Failed to start test server");
    (server, pool)
}

async fn seed_user(pool: &SqlitePool, name: &str, email: &str, password: &str) -> i64 {
    repository::insert_user(
        pool,
        NewUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            nickname: Some(name.to_lowercase()),
            password: password.to_string(),
            photo: None,
        },
    )
    .await
    .expect("Failed to insert user")
    .id
}

async fn seed_course(pool: &SqlitePool, name: &str) -> i64 {
    repository::insert_course(
        pool,
        NewCourseRequest {
            name: name.to_string(),
            photo: None,
            institution: Some("SENAI".to_string()),
            company_id: None,
        },
    )
    .await
    .expect("Failed to insert course")
    .id
}

#[tokio::test]
async fn test_health() {
    let (server, _pool) = setup().await;
    server.get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn test_list_users_returns_each_user_once() {
    let (server, pool) = setup().await;
    let ana = seed_user(&pool, "Ana", "ana@example.com", "1234").await;
    let bruno = seed_user(&pool, "Bruno", "bruno@example.com", "5678").await;

    let response = server.get("/api/usuarios").await;
    response.assert_status_ok();

    let users = response.json::<Vec<Value>>();
    assert_eq!(users.len(), 2);
    for id in [ana, bruno] {
        assert_eq!(users.iter().filter(|u| u["id"] == id).count(), 1);
    }
    assert!(users.iter().all(|u| u.get("senha").is_none()));
}

#[tokio::test]
async fn test_get_user_by_id() {
    let (server, pool) = setup().await;
    let ana = seed_user(&pool, "Ana", "ana@example.com", "1234").await;

    let response = server.get(&format!("/api/usuarios/{}", ana)).await;
    response.assert_status_ok();
    let user = response.json::<Value>();
    assert_eq!(user["nome"], "Ana");
    assert_eq!(user["email"], "ana@example.com");

    let missing = server.get(&format!("/api/usuarios/{}", ana + 1)).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert!(missing.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_login() {
    let (server, pool) = setup().await;
    let ana = seed_user(&pool, "Ana", "ana@example.com", "1234").await;

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "ana@example.com", "senha": "1234" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], ana);

    // numeric passwords are accepted as well
    let numeric = server
        .post("/api/login")
        .json(&json!({ "email": "ana@example.com", "senha": 1234 }))
        .await;
    assert_eq!(numeric.json::<Value>()["success"], true);

    let rejected = server
        .post("/api/login")
        .json(&json!({ "email": "ana@example.com", "senha": "wrong" }))
        .await;
    rejected.assert_status_ok();
    assert_eq!(rejected.json::<Value>(), json!({ "success": false }));
}

#[tokio::test]
async fn test_list_courses_with_counts() {
    let (server, pool) = setup().await;
    let ana = seed_user(&pool, "Ana", "ana@example.com", "1234").await;
    let rust = seed_course(&pool, "Rust").await;
    seed_course(&pool, "SQL").await;

    repository::create_enrollment(&pool, ana, rust)
        .await
        .expect("Failed to enroll");
    repository::insert_comment(
        &pool,
        NewCommentRequest {
            course_id: rust,
            user_id: ana,
            text: "Muito bom".to_string(),
        },
    )
    .await
    .expect("Failed to comment");

    let response = server.get("/api/cursos").await;
    response.assert_status_ok();

    let courses = response.json::<Vec<Value>>();
    assert_eq!(courses.len(), 2);

    let first = courses.iter().find(|c| c["id_curso"] == rust).unwrap();
    assert_eq!(first["nome_curso"], "Rust");
    assert_eq!(first["numInscritos"], 1);
    assert_eq!(first["numComentarios"], 1);
}

#[tokio::test]
async fn test_get_company() {
    let (server, pool) = setup().await;

    let empty = server.get("/api/empresa").await;
    empty.assert_status_ok();
    assert_eq!(empty.json::<Value>(), Value::Null);

    repository::insert_company(
        &pool,
        NewCompanyRequest {
            name: "Acme".to_string(),
            logo: Some("acme.png".to_string()),
        },
    )
    .await
    .expect("Failed to insert company");

    let response = server.get("/api/empresa").await;
    response.assert_status_ok();
    let company = response.json::<Value>();
    assert_eq!(company["nome"], "Acme");
    assert_eq!(company["logo"], "acme.png");
}

#[tokio::test]
async fn test_enroll_twice_returns_bad_request() {
    let (server, pool) = setup().await;
    let user = seed_user(&pool, "Ana", "ana@example.com", "1234").await;
    let course = seed_course(&pool, "Rust").await;

    let first = server
        .post("/api/inscricao")
        .json(&json!({ "usuario_id": user, "curso_id": course }))
        .await;
    first.assert_status_ok();
    let body = first.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["inscricao"]["usuario_id"], user);
    assert_eq!(body["inscricao"]["curso_id"], course);
    assert!(body["inscricao"]["id_inscricao"].is_i64());

    let second = server
        .post("/api/inscricao")
        .json(&json!({ "usuario_id": user, "curso_id": course }))
        .await;
    second.assert_status(StatusCode::BAD_REQUEST);
    assert!(second.json::<Value>()["error"].is_string());

    let enrollments = repository::fetch_enrollments_for_user(&pool, user)
        .await
        .expect("Failed to fetch enrollments");
    assert_eq!(enrollments.len(), 1);
}

#[tokio::test]
async fn test_unenroll() {
    let (server, pool) = setup().await;
    let user = seed_user(&pool, "Ana", "ana@example.com", "1234").await;
    let course = seed_course(&pool, "Rust").await;

    let missing = server
        .delete(&format!("/api/inscricao/{}/{}", user, course))
        .await;
    missing.assert_status(StatusCode::NOT_FOUND);
    assert!(missing.json::<Value>()["error"].is_string());

    server
        .post("/api/inscricao")
        .json(&json!({ "usuario_id": user, "curso_id": course }))
        .await
        .assert_status_ok();

    let response = server
        .delete(&format!("/api/inscricao/{}/{}", user, course))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "success": true }));

    let courses = server.get("/api/cursos").await.json::<Vec<Value>>();
    assert_eq!(courses[0]["numInscritos"], 0);

    let again = server
        .delete(&format!("/api/inscricao/{}/{}", user, course))
        .await;
    again.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_failure_returns_internal_error() {
    let (server, pool) = setup().await;
    pool.close().await;

    let response = server.get("/api/usuarios").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_non_numeric_user_id_is_not_found() {
    let (server, _pool) = setup().await;

    let response = server.get("/api/usuarios/abc").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "User not found" })
    );
}

#[tokio::test]
async fn test_login_without_password_gets_json_error() {
    let (server, _pool) = setup().await;

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "a@b.c" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert!(body["error"].as_str().unwrap().contains("senha"));
}

#[tokio::test]
async fn test_enroll_accepts_numeric_text_ids() {
    let (server, pool) = setup().await;
    let user = seed_user(&pool, "Ana", "ana@example.com", "1234").await;
    let course = seed_course(&pool, "Rust").await;

    let response = server
        .post("/api/inscricao")
        .json(&json!({ "usuario_id": user.to_string(), "curso_id": course.to_string() }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["inscricao"]["usuario_id"], user);
    assert_eq!(body["inscricao"]["curso_id"], course);

    let bad = server
        .post("/api/inscricao")
        .json(&json!({ "usuario_id": "one", "curso_id": course }))
        .await;
    bad.assert_status(StatusCode::BAD_REQUEST);
    assert!(bad.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn test_unenroll_with_non_numeric_ids_is_not_found() {
    let (server, _pool) = setup().await;

    let response = server.delete("/api/inscricao/abc/5").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert!(response.json::<Value>()["error"].is_string());
}
