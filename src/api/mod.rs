pub mod extract;

use axum::Json;
use axum::extract::Path;
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

use self::extract::{JsonBody, parse_id};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/usuarios", get(list_users))
        .route("/api/usuarios/{id}", get(get_user))
        .route("/api/login", post(login))
        .route("/api/cursos", get(list_courses))
        .route("/api/empresa", get(get_company))
        .route("/api/inscricao", post(create_enrollment))
        .route(
            "/api/inscricao/{usuario_id}/{curso_id}",
            delete(delete_enrollment),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = repository::fetch_users(&state.db).await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let not_found = || AppError::NotFound("User".to_string());
    let id = parse_id(&id).ok_or_else(not_found)?;
    let user = repository::find_user_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(user))
}

async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = match repository::authenticate(&state.db, &req.email, &req.password).await? {
        Some(user) => {
            info!("user {} logged in", user.id);
            LoginResponse::accepted(user)
        }
        None => {
            debug!("login rejected for {}", req.email);
            LoginResponse::rejected()
        }
    };
    Ok(Json(response))
}

async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseSummary>>, AppError> {
    let courses = repository::fetch_course_summaries(&state.db).await?;
    Ok(Json(courses))
}

async fn get_company(State(state): State<AppState>) -> Result<Json<Option<Company>>, AppError> {
    let company = repository::fetch_company(&state.db).await?;
    Ok(Json(company))
}

async fn create_enrollment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewEnrollmentRequest>,
) -> Result<Json<EnrollmentResponse>, AppError> {
    let enrollment = repository::create_enrollment(&state.db, req.user_id, req.course_id).await?;
    info!(
        "user {} enrolled in course {}",
        enrollment.user_id, enrollment.course_id
    );
    Ok(Json(EnrollmentResponse {
        success: true,
        enrollment,
    }))
}

async fn delete_enrollment(
    State(state): State<AppState>,
    Path((user_id, course_id)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let not_found = || AppError::NotFound("Enrollment".to_string());
    let user_id = parse_id(&user_id).ok_or_else(not_found)?;
    let course_id = parse_id(&course_id).ok_or_else(not_found)?;
    let ok = repository::delete_enrollment(&state.db, user_id, course_id).await?;
    if ok {
        info!("user {} unenrolled from course {}", user_id, course_id);
        Ok(Json(SuccessResponse { success: true }))
    } else {
        Err(not_found())
    }
}
