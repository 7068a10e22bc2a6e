use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::helpers::require_active_member;
use crate::models::card::EligibleCard;
use crate::models::roster::{Roster, RosterView};

/// Per-member, per-league roster composition from owned league cards.
pub struct RosterComposer {
    pool: PgPool,
}

impl RosterComposer {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Idempotently create the caller's roster for this league and return
    /// it. Safe to call concurrently: the unique index on
    /// (league_id, user_id) guarantees at most one row per pair.
    pub async fn ensure_roster(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<RosterView, ApiError> {
        require_active_member(&self.pool, league_id, user_id).await?;

        let now = Utc::now();
        sqlx::query(
            "INSERT INTO rosters (id, league_id, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (league_id, user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(league_id)
        .bind(user_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        load_roster_view(&self.pool, league_id, user_id).await
    }

    /// The caller's cards minted into this league, flagged with whether
    /// they are in the current selection.
    pub async fn list_eligible_cards(
        &self,
        league_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<EligibleCard>, ApiError> {
        require_active_member(&self.pool, league_id, user_id).await?;

        let cards = sqlx::query_as::<_, EligibleCard>(
            r#"
            SELECT
                c.id,
                c.backing_card_id,
                c.player_name,
                c.player_role,
                c.player_team,
                c.image_url,
                (rs.league_card_id IS NOT NULL) AS is_selected
            FROM league_cards c
            LEFT JOIN rosters r
                ON r.league_id = c.league_id AND r.user_id = c.owner_user_id
            LEFT JOIN roster_selections rs
                ON rs.roster_id = r.id AND rs.league_card_id = c.id
            WHERE c.league_id = $1 AND c.owner_user_id = $2
            ORDER BY c.player_name ASC
            "#,
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Replace the whole selection set in one transaction. Every id must
    /// be a card of this league owned by the caller. Captain or
    /// vice-captain pointers referencing a card that leaves the selection
    /// are cleared in the same transaction: no reader ever observes a
    /// captain outside the current selection.
    pub async fn set_selection(
        &self,
        league_id: Uuid,
        user_id: Uuid,
        card_ids: Vec<Uuid>,
    ) -> Result<RosterView, ApiError> {
        require_active_member(&self.pool, league_id, user_id).await?;

        // Duplicate ids in the request collapse
        let card_ids: Vec<Uuid> = card_ids
            .into_iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO rosters (id, league_id, user_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $4) \
             ON CONFLICT (league_id, user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(league_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let roster = sqlx::query_as::<_, Roster>(
            "SELECT * FROM rosters WHERE league_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(league_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        if !card_ids.is_empty() {
            let owned: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM league_cards \
                 WHERE league_id = $1 AND owner_user_id = $2 AND id = ANY($3)",
            )
            .bind(league_id)
            .bind(user_id)
            .bind(&card_ids)
            .fetch_one(&mut *tx)
            .await?;

            if owned != card_ids.len() as i64 {
                return Err(ApiError::validation(
                    "Selection contains cards you do not own in this league",
                ));
            }
        }

        sqlx::query("DELETE FROM roster_selections WHERE roster_id = $1")
            .bind(roster.id)
            .execute(&mut *tx)
            .await?;

        if !card_ids.is_empty() {
            sqlx::query(
                "INSERT INTO roster_selections (roster_id, league_card_id) \
                 SELECT $1, UNNEST($2::uuid[])",
            )
            .bind(roster.id)
            .bind(&card_ids)
            .execute(&mut *tx)
            .await?;
        }

        // Clear any captain/vice pointer that no longer references a
        // selected card, as part of the same transaction
        sqlx::query(
            r#"
            UPDATE rosters SET
                captain_card_id = CASE
                    WHEN captain_card_id = ANY($2) THEN captain_card_id
                END,
                vice_captain_card_id = CASE
                    WHEN vice_captain_card_id = ANY($2) THEN vice_captain_card_id
                END,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(roster.id)
        .bind(&card_ids)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            "User {} set a {}-card selection in league {}",
            user_id,
            card_ids.len(),
            league_id
        );

        load_roster_view(&self.pool, league_id, user_id).await
    }
}

/// Read a roster with its selection ids.
pub(crate) async fn load_roster_view(
    pool: &PgPool,
    league_id: Uuid,
    user_id: Uuid,
) -> Result<RosterView, ApiError> {
    let roster = sqlx::query_as::<_, Roster>(
        "SELECT * FROM rosters WHERE league_id = $1 AND user_id = $2",
    )
    .bind(league_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| ApiError::not_found("No roster exists for this league"))?;

    let selection: Vec<Uuid> =
        sqlx::query_scalar("SELECT league_card_id FROM roster_selections WHERE roster_id = $1")
            .bind(roster.id)
            .fetch_all(pool)
            .await?;

    Ok(RosterView { roster, selection })
}
