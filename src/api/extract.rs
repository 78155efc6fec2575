use axum::extract::FromRequest;

use crate::error::AppError;

/// `Json` whose rejections come back as an `AppError` JSON body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Ids arrive as path text; anything that is not an integer matches no row.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
