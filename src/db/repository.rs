use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{
    Comment, Company, Course, CourseSummary, Enrollment, NewCommentRequest, NewCompanyRequest,
    NewCourseRequest, NewUserRequest, User,
};
use crate::password;

const USER_COLUMNS: &str = r#"
    id,
    nome AS name,
    email,
    nickname,
    senha AS password_hash,
    foto AS photo,
    createdAt AS created_at,
    updatedAt AS updated_at
"#;

pub async fn fetch_users(db: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM usuario ORDER BY id"))
        .fetch_all(db)
        .await
}

pub async fn find_user_by_id(db: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM usuario WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Email is not unique, so every user sharing it is checked in id order and
/// the first whose hash verifies wins. Hash checks run on the blocking pool.
pub async fn authenticate(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let candidates = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM usuario WHERE email = ? ORDER BY id"
    ))
    .bind(email)
    .fetch_all(db)
    .await?;

    if candidates.is_empty() {
        return Ok(None);
    }

    let password = password.to_string();
    tokio::task::spawn_blocking(move || {
        candidates.into_iter().find(|user| {
            user.password_hash
                .as_deref()
                .is_some_and(|hash| password::verify_password(&password, hash))
        })
    })
    .await
    .map_err(|e| AppError::PasswordHash(format!("verify task failed: {e}")))
}

pub async fn insert_user(db: &SqlitePool, req: NewUserRequest) -> Result<User, AppError> {
    let plain = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| AppError::PasswordHash(format!("hash task failed: {e}")))??;
    let now = Utc::now().to_rfc3339();

    let id = sqlx::query(
        r#"
        INSERT INTO usuario
            (nome, email, nickname, senha, foto, createdAt, updatedAt)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
    )
    .bind(&req.name)
    .bind(&req.email)
    .bind(&req.nickname)
    .bind(&password_hash)
    .bind(&req.photo)
    .bind(&now)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(User {
        id,
        name: Some(req.name),
        email: Some(req.email),
        nickname: req.nickname,
        password_hash: Some(password_hash),
        photo: req.photo,
        created_at: Some(now.clone()),
        updated_at: Some(now),
    })
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(
        r#"
        SELECT
            id_curso AS id,
            foto AS photo,
            nome_curso AS name,
            instituicao AS institution,
            empresa_id AS company_id
        FROM curso
        ORDER BY id_curso
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_course_summaries(db: &SqlitePool) -> Result<Vec<CourseSummary>, sqlx::Error> {
    sqlx::query_as::<_, CourseSummary>(
        r#"
        SELECT
            c.id_curso AS id,
            c.nome_curso AS name,
            c.foto AS photo,
            c.instituicao AS institution,
            c.empresa_id AS company_id,
            (SELECT COUNT(*) FROM inscricao i WHERE i.curso_id = c.id_curso) AS enrollment_count,
            (SELECT COUNT(*) FROM comentario m WHERE m.curso_id = c.id_curso) AS comment_count
        FROM curso c
        ORDER BY c.id_curso
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn insert_course(db: &SqlitePool, req: NewCourseRequest) -> Result<Course, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO curso (foto, nome_curso, instituicao, empresa_id)
        VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&req.photo)
    .bind(&req.name)
    .bind(&req.institution)
    .bind(req.company_id)
    .execute(db)
    .await?
    .last_insert_rowid();

    Ok(Course {
        id,
        photo: req.photo,
        name: Some(req.name),
        institution: req.institution,
        company_id: req.company_id,
    })
}

/// Lowest-id company, if any exist.
pub async fn fetch_company(db: &SqlitePool) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as::<_, Company>(
        "SELECT id_empresa AS id, nome AS name, logo FROM empresa ORDER BY id_empresa LIMIT 1",
    )
    .fetch_optional(db)
    .await
}

pub async fn insert_company(db: &SqlitePool, req: NewCompanyRequest) -> Result<Company, sqlx::Error> {
    let id = sqlx::query("INSERT INTO empresa (nome, logo) VALUES (?1, ?2)")
        .bind(&req.name)
        .bind(&req.logo)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(Company {
        id,
        name: Some(req.name),
        logo: req.logo,
    })
}

pub async fn find_enrollment(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<Option<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id_inscricao AS id, usuario_id AS user_id, curso_id AS course_id
        FROM inscricao
        WHERE usuario_id = ? AND curso_id = ?
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .fetch_optional(db)
    .await
}

pub async fn fetch_enrollments_for_user(
    db: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Enrollment>, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        r#"
        SELECT id_inscricao AS id, usuario_id AS user_id, curso_id AS course_id
        FROM inscricao
        WHERE usuario_id = ?
        ORDER BY id_inscricao
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

/// Enroll a user in a course, refusing a second enrollment for the same pair.
///
/// The existence check and the insert are separate statements; the unique
/// index on `(usuario_id, curso_id)` catches a concurrent insert that slips
/// between them, and that case is reported the same way.
pub async fn create_enrollment(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<Enrollment, AppError> {
    if find_enrollment(db, user_id, course_id).await?.is_some() {
        return Err(AppError::DuplicateEnrollment);
    }

    insert_enrollment(db, user_id, course_id).await
}

async fn insert_enrollment(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<Enrollment, AppError> {
    let result = sqlx::query("INSERT INTO inscricao (usuario_id, curso_id) VALUES (?1, ?2)")
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await;

    let id = match result {
        Ok(done) => done.last_insert_rowid(),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            return Err(AppError::DuplicateEnrollment);
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Enrollment {
        id,
        user_id,
        course_id,
    })
}

pub async fn delete_enrollment(
    db: &SqlitePool,
    user_id: i64,
    course_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM inscricao WHERE usuario_id = ?1 AND curso_id = ?2")
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn insert_comment(db: &SqlitePool, req: NewCommentRequest) -> Result<Comment, sqlx::Error> {
    let id = sqlx::query("INSERT INTO comentario (curso_id, usuario_id, texto) VALUES (?1, ?2, ?3)")
        .bind(req.course_id)
        .bind(req.user_id)
        .bind(&req.text)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(Comment {
        id,
        course_id: req.course_id,
        user_id: req.user_id,
        text: Some(req.text),
    })
}
