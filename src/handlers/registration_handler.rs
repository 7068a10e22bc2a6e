use actix_web::{web, HttpResponse};
use chrono::Utc;
use secrecy::ExposeSecret;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::user::RegistrationRequest;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool),
    fields(
        username = %user_form.username,
        email = %user_form
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, ApiError> {
    insert_user(&user_form, &pool).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User registered successfully"
    })))
}

pub async fn insert_user(
    user_form: &RegistrationRequest,
    pool: &PgPool,
) -> Result<Uuid, ApiError> {
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        "#,
    )
    .bind(user_id)
    .bind(&user_form.username)
    .bind(&user_form.email)
    .bind(hash_password(user_form.password.expose_secret()))
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        if e.as_database_error()
            .map(|db| db.is_unique_violation())
            .unwrap_or(false)
        {
            ApiError::Conflict("Username or email is already taken".into())
        } else {
            tracing::error!("Failed to execute user insert query: {:?}", e);
            ApiError::Database(e)
        }
    })?;

    Ok(user_id)
}
