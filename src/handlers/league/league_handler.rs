use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::caller_id;
use crate::league::registry::LeagueRegistry;
use crate::middleware::auth::Claims;
use crate::models::league::{CreateLeagueRequest, JoinByCodeRequest};

/// Create a new league
#[tracing::instrument(
    name = "Create league",
    skip(request, pool, claims),
    fields(
        league_name = %request.name,
        user = %claims.username
    )
)]
pub async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let owner_id = caller_id(&claims)?;

    let registry = LeagueRegistry::new(pool.get_ref().clone());
    let created = registry.create_league(owner_id, request.into_inner()).await?;

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "League created successfully",
        "data": created
    })))
}

/// List all public leagues
#[tracing::instrument(name = "Discover public leagues", skip(pool, claims), fields(user = %claims.username))]
pub async fn discover_public_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let registry = LeagueRegistry::new(pool.get_ref().clone());
    let leagues = registry.discover_public().await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": leagues
    })))
}

/// List the caller's leagues with membership info
#[tracing::instrument(name = "List my leagues", skip(pool, claims), fields(user = %claims.username))]
pub async fn list_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let registry = LeagueRegistry::new(pool.get_ref().clone());
    let leagues = registry.list_my_leagues(user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": leagues
    })))
}

/// Join a private league by join code
#[tracing::instrument(
    name = "Join league by code",
    skip(request, pool, claims),
    fields(user = %claims.username)
)]
pub async fn join_by_code(
    request: web::Json<JoinByCodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let registry = LeagueRegistry::new(pool.get_ref().clone());
    let membership = registry.join_by_code(user_id, &request.code).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Joined league successfully",
        "data": membership
    })))
}

/// Join a public league
#[tracing::instrument(
    name = "Join public league",
    skip(pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn join_public(
    league_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let registry = LeagueRegistry::new(pool.get_ref().clone());
    let membership = registry.join_public(user_id, league_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Joined league successfully",
        "data": membership
    })))
}
