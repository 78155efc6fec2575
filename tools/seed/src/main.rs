use dotenvy::dotenv;
use sqlx::SqlitePool;
use std::env;

use enrollment_backend::config::DEFAULT_DATABASE_URL;
use enrollment_backend::db::{self, repository};
use enrollment_backend::models::{NewCompanyRequest, NewCourseRequest, NewUserRequest};

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let email = env::var("SEED_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password = env::var("SEED_PASSWORD").unwrap_or_else(|_| "admin".to_string());

    let pool = db::connect(&database_url, 1).await?;

    seed(&pool, &email, password, is_dry_run()).await?;

    pool.close().await;
    Ok(())
}

async fn seed(
    pool: &SqlitePool,
    email: &str,
    password: String,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if dry_run {
        println!("[DRY RUN] Would apply pending migrations");
    } else {
        db::migrate(pool).await?;
    }

    let company = NewCompanyRequest {
        name: "Demo Company".to_string(),
        logo: None,
    };
    let user = NewUserRequest {
        name: "Admin".to_string(),
        email: email.to_string(),
        nickname: Some("admin".to_string()),
        password,
        photo: None,
    };

    // without migrations a dry run may find no tables; treat that as empty
    let has_company = match repository::fetch_company(pool).await {
        Ok(company) => company.is_some(),
        Err(_) if dry_run => false,
        Err(e) => return Err(e.into()),
    };

    if has_company {
        println!("Company already present, skipping");
    } else if dry_run {
        println!("[DRY RUN] Would insert company {:?}", company.name);
    } else {
        let company = repository::insert_company(pool, company).await?;
        println!("Inserted company {}", company.id);

        let course = repository::insert_course(
            pool,
            NewCourseRequest {
                name: "Intro to Rust".to_string(),
                photo: None,
                institution: Some("Demo Institute".to_string()),
                company_id: Some(company.id),
            },
        )
        .await?;
        println!("Inserted course {}", course.id);
    }

    let users = match repository::fetch_users(pool).await {
        Ok(users) => users,
        Err(_) if dry_run => Vec::new(),
        Err(e) => return Err(e.into()),
    };
    let existing = users
        .iter()
        .any(|u| u.email.as_deref() == Some(email));

    if existing {
        println!("User {} already present, skipping", email);
    } else if dry_run {
        println!("[DRY RUN] Would insert user {}", email);
    } else {
        let user = repository::insert_user(pool, user).await?;
        println!("Inserted user {} ({})", user.id, email);
    }

    if dry_run {
        println!("Dry run only. Re-run with --apply to write.");
    }

    Ok(())
}
