use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::caller_id;
use crate::league::roster::RosterComposer;
use crate::middleware::auth::Claims;
use crate::models::roster::SetSelectionRequest;

/// Get the caller's roster for a league, creating it lazily on first
/// visit
#[tracing::instrument(
    name = "Get roster",
    skip(pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn get_roster(
    league_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let composer = RosterComposer::new(pool.get_ref().clone());
    let roster = composer.ensure_roster(league_id.into_inner(), user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": roster
    })))
}

/// List the caller's eligible cards for a league
#[tracing::instrument(
    name = "List eligible cards",
    skip(pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn list_eligible_cards(
    league_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let composer = RosterComposer::new(pool.get_ref().clone());
    let cards = composer
        .list_eligible_cards(league_id.into_inner(), user_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": cards
    })))
}

/// Replace the caller's roster selection
#[tracing::instrument(
    name = "Set roster selection",
    skip(request, pool, claims),
    fields(
        league_id = %league_id,
        user = %claims.username,
        card_count = %request.card_ids.len()
    )
)]
pub async fn set_selection(
    league_id: web::Path<Uuid>,
    request: web::Json<SetSelectionRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let composer = RosterComposer::new(pool.get_ref().clone());
    let roster = composer
        .set_selection(
            league_id.into_inner(),
            user_id,
            request.into_inner().card_ids,
        )
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Selection updated",
        "data": roster
    })))
}
