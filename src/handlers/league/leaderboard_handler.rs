use actix_web::{web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::handlers::league::caller_id;
use crate::league::leaderboard::LeaderboardProjection;
use crate::middleware::auth::Claims;

/// Get the league leaderboard as supplied by the scoring engine
#[tracing::instrument(
    name = "Get league leaderboard",
    skip(pool, claims),
    fields(league_id = %league_id, user = %claims.username)
)]
pub async fn get_league_leaderboard(
    league_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, ApiError> {
    let user_id = caller_id(&claims)?;

    let projection = LeaderboardProjection::new(pool.get_ref().clone());
    let entries = projection
        .get_league_leaderboard(league_id.into_inner(), user_id)
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "data": entries
    })))
}
