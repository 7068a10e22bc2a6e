// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::jwt::JwtSettings;
use crate::errors::ApiError;
use crate::middleware::auth::Claims;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        username = %login_form.username
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse, ApiError> {
    let user = sqlx::query_as::<_, (Uuid, String, String)>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(&login_form.username)
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| {
        tracing::info!("User not found or invalid credentials");
        ApiError::Auth("Invalid username or password".into())
    })?;

    let (user_id, username, password_hash) = user;

    if !verify_password(login_form.password.expose_secret(), &password_hash) {
        tracing::info!("Invalid password");
        return Err(ApiError::Auth("Invalid username or password".into()));
    }

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(jwt_settings.expiration_hours))
        .expect("Valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username,
        exp: expiration,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_settings.secret.expose_secret().as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Error generating JWT token: {:?}", e);
        ApiError::Auth("Failed to issue token".into())
    })?;

    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}
