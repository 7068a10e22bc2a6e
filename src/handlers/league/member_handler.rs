use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::caller_id;
use crate::league::deletion::DeletionFlow;
use crate::league::membership::MembershipManager;
use crate::middleware::auth::Claims;
use crate::models::membership::{DeleteLeagueRequest, KickMemberRequest};

/// List members of a league
#[tracing::instrument(
    name = "List league members",
    skip(pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn list_members(
    league_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let manager = MembershipManager::new(pool.get_ref().clone());
    let listing = manager.list_members(league_id.into_inner(), user_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": listing
    })))
}

/// Remove a member from a league (owner only)
#[tracing::instrument(
    name = "Kick league member",
    skip(request, pool, claims),
    fields(user = %claims.username)
)]
pub async fn kick_member(
    path: web::Path<(Uuid, Uuid)>, // (league_id, user_id)
    request: web::Json<KickMemberRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let (league_id, target_user_id) = path.into_inner();
    let user_id = caller_id(&claims)?;

    let manager = MembershipManager::new(pool.get_ref().clone());
    manager
        .kick_member(league_id, user_id, target_user_id, request.into_inner().note)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Member removed from league"
    })))
}

/// Delete a league (owner only, mandatory justification note)
#[tracing::instrument(
    name = "Delete league",
    skip(request, pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn delete_league(
    league_id: web::Path<Uuid>,
    request: web::Json<DeleteLeagueRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    // Drive the confirmation flow: a blank note fails arming and we bail
    // out before touching the database.
    let mut flow = DeletionFlow::new();
    flow.request_confirmation()?;
    flow.arm(&request.note)?;
    let note = flow.begin_execution()?;

    let manager = MembershipManager::new(pool.get_ref().clone());
    match manager
        .delete_league(league_id.into_inner(), user_id, &note)
        .await
    {
        Ok(()) => {
            flow.complete()?;
            Ok(HttpResponse::Ok().json(json!({
                "success": true,
                "message": "League deleted"
            })))
        }
        Err(e) => {
            // Back to armed; the client may retry with the same note
            flow.fail()?;
            Err(e)
        }
    }
}
