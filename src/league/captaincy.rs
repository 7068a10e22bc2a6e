use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::helpers::require_active_member;
use crate::league::roster::load_roster_view;
use crate::models::roster::{Roster, RosterView};

/// Captain and vice-captain assignment for a roster.
pub struct CaptaincyAssigner {
    pool: PgPool,
}

impl CaptaincyAssigner {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Assign (or clear, by passing both as None) the captain pair.
    /// All-or-nothing: on any validation failure the roster is untouched.
    /// Both pointers are written in one transaction holding the roster
    /// row lock, so no reader observes a half-applied pair.
    pub async fn set_captains(
        &self,
        league_id: Uuid,
        user_id: Uuid,
        captain_id: Option<Uuid>,
        vice_captain_id: Option<Uuid>,
    ) -> Result<RosterView, ApiError> {
        if let (Some(captain), Some(vice)) = (captain_id, vice_captain_id) {
            if captain == vice {
                return Err(ApiError::validation(
                    "Captain and vice-captain must be different cards",
                ));
            }
        }

        require_active_member(&self.pool, league_id, user_id).await?;

        let mut tx = self.pool.begin().await?;

        let roster = sqlx::query_as::<_, Roster>(
            "SELECT * FROM rosters WHERE league_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::not_found("No roster exists for this league"))?;

        let selection: Vec<Uuid> = sqlx::query_scalar(
            "SELECT league_card_id FROM roster_selections WHERE roster_id = $1",
        )
        .bind(roster.id)
        .fetch_all(&mut *tx)
        .await?;

        for card_id in [captain_id, vice_captain_id].into_iter().flatten() {
            if !selection.contains(&card_id) {
                return Err(ApiError::validation(
                    "Captain assignments must reference cards in your current selection",
                ));
            }
        }

        sqlx::query(
            "UPDATE rosters \
             SET captain_card_id = $2, vice_captain_card_id = $3, updated_at = $4 \
             WHERE id = $1",
        )
        .bind(roster.id)
        .bind(captain_id)
        .bind(vice_captain_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "User {} set captains (captain: {:?}, vice: {:?}) in league {}",
            user_id,
            captain_id,
            vice_captain_id,
            league_id
        );

        load_roster_view(&self.pool, league_id, user_id).await
    }
}
