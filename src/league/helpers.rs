use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::league::League;

/// Shared lookups used by several league services.

pub(crate) async fn fetch_league(pool: &PgPool, league_id: Uuid) -> Result<League, ApiError> {
    sqlx::query_as::<_, League>("SELECT * FROM leagues WHERE id = $1")
        .bind(league_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::not_found("League not found"))
}

pub(crate) async fn is_active_member(
    pool: &PgPool,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<bool, ApiError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM league_members \
         WHERE league_id = $1 AND user_id = $2 AND status = 'active'",
    )
    .bind(league_id)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

pub(crate) async fn require_active_member(
    pool: &PgPool,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<(), ApiError> {
    if is_active_member(pool, league_id, user_id).await? {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You are not a member of this league".into(),
        ))
    }
}
