use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::helpers::{fetch_league, is_active_member};
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::league::LeagueVisibility;

/// Thin read of the externally aggregated league standings.
pub struct LeaderboardProjection {
    pool: PgPool,
}

impl LeaderboardProjection {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Ranked members of a league, in the exact order the external
    /// scoring engine supplied. The `rank` column is authoritative;
    /// re-sorting by points here could disagree with it on ties.
    pub async fn get_league_leaderboard(
        &self,
        league_id: Uuid,
        caller_id: Uuid,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let league = fetch_league(&self.pool, league_id).await?;

        if league.visibility == LeagueVisibility::Private
            && !is_active_member(&self.pool, league_id, caller_id).await?
        {
            return Err(ApiError::Forbidden(
                "Only members can view a private league's leaderboard".into(),
            ));
        }

        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT s.user_id, u.username, s.total_points, s.rank
            FROM league_scores s
            JOIN users u ON u.id = s.user_id
            WHERE s.league_id = $1
            ORDER BY s.rank ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
