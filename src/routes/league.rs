// src/routes/league.rs
use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::{
    captaincy_handler, leaderboard_handler, league_handler, member_handler, roster_handler,
};
use crate::middleware::auth::Claims;
use crate::models::league::{CreateLeagueRequest, JoinByCodeRequest};
use crate::models::membership::{DeleteLeagueRequest, KickMemberRequest};
use crate::models::roster::{SetCaptainsRequest, SetSelectionRequest};

/// Create a new league
#[post("")]
async fn create_league(
    request: web::Json<CreateLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    league_handler::create_league(request, pool, claims).await
}

/// Discover public leagues
#[get("/public")]
async fn discover_public_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    league_handler::discover_public_leagues(pool, claims).await
}

/// List the caller's leagues
#[get("/mine")]
async fn list_my_leagues(
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    league_handler::list_my_leagues(pool, claims).await
}

/// Join a private league by code
#[post("/join")]
async fn join_by_code(
    request: web::Json<JoinByCodeRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    league_handler::join_by_code(request, pool, claims).await
}

/// Join a public league
#[post("/{league_id}/join")]
async fn join_public(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    league_handler::join_public(path, pool, claims).await
}

/// List members of a league
#[get("/{league_id}/members")]
async fn list_members(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    member_handler::list_members(path, pool, claims).await
}

/// Remove a member from a league
#[delete("/{league_id}/members/{user_id}")]
async fn kick_member(
    path: web::Path<(Uuid, Uuid)>,
    request: web::Json<KickMemberRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    member_handler::kick_member(path, request, pool, claims).await
}

/// Delete a league
#[delete("/{league_id}")]
async fn delete_league(
    path: web::Path<Uuid>,
    request: web::Json<DeleteLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    member_handler::delete_league(path, request, pool, claims).await
}

/// Get the caller's roster for a league
#[get("/{league_id}/roster")]
async fn get_roster(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    roster_handler::get_roster(path, pool, claims).await
}

/// List the caller's eligible cards for a league
#[get("/{league_id}/cards")]
async fn list_eligible_cards(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    roster_handler::list_eligible_cards(path, pool, claims).await
}

/// Replace the caller's roster selection
#[put("/{league_id}/roster/selection")]
async fn set_selection(
    path: web::Path<Uuid>,
    request: web::Json<SetSelectionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    roster_handler::set_selection(path, request, pool, claims).await
}

/// Assign or clear captain and vice-captain
#[put("/{league_id}/roster/captains")]
async fn set_captains(
    path: web::Path<Uuid>,
    request: web::Json<SetCaptainsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    captaincy_handler::set_captains(path, request, pool, claims).await
}

/// Get the league leaderboard
#[get("/{league_id}/leaderboard")]
async fn get_league_leaderboard(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    leaderboard_handler::get_league_leaderboard(path, pool, claims).await
}
