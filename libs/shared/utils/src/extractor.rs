use axum::extract::{FromRequest, FromRequestParts};

use shared_models::AppError;

/// `Json<T>` whose rejections become `AppError`, so a bad body gets the same
/// 400 `{"error": ...}` response as any other validation failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `Path<T>` with rejections mapped into `AppError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
