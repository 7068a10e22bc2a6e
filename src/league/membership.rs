use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::helpers::{fetch_league, is_active_member};
use crate::league::validation::LeagueValidator;
use crate::models::league::LeagueVisibility;
use crate::models::membership::{MemberInfo, MemberListing, PublicMemberInfo};

/// Membership listing, owner-only kick, and league deletion.
pub struct MembershipManager {
    pool: PgPool,
    validator: LeagueValidator,
}

impl MembershipManager {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: LeagueValidator::new(),
        }
    }

    /// List league members. Public leagues and members of private leagues
    /// get the full listing; everyone else gets a restricted projection
    /// instead of a hard failure. That degradation is deliberate and is
    /// the only place an authorization outcome is not surfaced as an
    /// error.
    pub async fn list_members(
        &self,
        league_id: Uuid,
        caller_id: Uuid,
    ) -> Result<MemberListing, ApiError> {
        let league = fetch_league(&self.pool, league_id).await?;
        let caller_is_member = is_active_member(&self.pool, league_id, caller_id).await?;

        if league.visibility == LeagueVisibility::Public || caller_is_member {
            let members = sqlx::query_as::<_, MemberInfo>(
                r#"
                SELECT
                    m.user_id,
                    u.username,
                    m.status,
                    (m.user_id = $2) AS is_owner,
                    m.joined_at
                FROM league_members m
                JOIN users u ON u.id = m.user_id
                WHERE m.league_id = $1
                ORDER BY m.joined_at ASC
                "#,
            )
            .bind(league_id)
            .bind(league.owner_user_id)
            .fetch_all(&self.pool)
            .await?;

            let join_code = league
                .join_code_visible_to(caller_is_member)
                .map(str::to_string);

            return Ok(MemberListing::Full {
                league_name: league.name,
                join_code,
                members,
            });
        }

        tracing::debug!(
            "Non-member {} requested members of private league {}, serving restricted view",
            caller_id,
            league_id
        );

        let members = sqlx::query_as::<_, PublicMemberInfo>(
            r#"
            SELECT u.username, m.joined_at
            FROM league_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.league_id = $1 AND m.status = 'active'
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(league_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(MemberListing::Restricted {
            league_name: league.name,
            members,
        })
    }

    /// Soft-close a membership. Owner only; the owner's own membership
    /// cannot be closed this way. The optional note is kept as an audit
    /// record on the membership row.
    pub async fn kick_member(
        &self,
        league_id: Uuid,
        caller_id: Uuid,
        target_user_id: Uuid,
        note: Option<String>,
    ) -> Result<(), ApiError> {
        let league = fetch_league(&self.pool, league_id).await?;

        if league.owner_user_id != caller_id {
            return Err(ApiError::Forbidden(
                "Only the league owner can remove members".into(),
            ));
        }

        if target_user_id == league.owner_user_id {
            return Err(ApiError::validation(
                "The league owner cannot be removed from their own league",
            ));
        }

        let result = sqlx::query(
            "UPDATE league_members \
             SET status = 'removed', note = $3, updated_at = NOW() \
             WHERE league_id = $1 AND user_id = $2 AND status = 'active'",
        )
        .bind(league_id)
        .bind(target_user_id)
        .bind(&note)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::not_found(
                "User is not an active member of this league",
            ));
        }

        tracing::info!(
            "Owner {} removed {} from league {} (note: {:?})",
            caller_id,
            target_user_id,
            league_id,
            note
        );

        Ok(())
    }

    /// Delete a league and everything scoped to it. Owner only; the
    /// justification note is mandatory and must already have been
    /// validated at the operation boundary (we re-check here since this
    /// is the last stop before the cascade).
    pub async fn delete_league(
        &self,
        league_id: Uuid,
        caller_id: Uuid,
        note: &str,
    ) -> Result<(), ApiError> {
        let note = self.validator.validate_deletion_note(note)?;

        let league = fetch_league(&self.pool, league_id).await?;
        if league.owner_user_id != caller_id {
            return Err(ApiError::Forbidden(
                "Only the league owner can delete the league".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "DELETE FROM roster_selections \
             WHERE roster_id IN (SELECT id FROM rosters WHERE league_id = $1)",
        )
        .bind(league_id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM rosters WHERE league_id = $1")
            .bind(league_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM league_cards WHERE league_id = $1")
            .bind(league_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM league_members WHERE league_id = $1")
            .bind(league_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM league_scores WHERE league_id = $1")
            .bind(league_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM leagues WHERE id = $1")
            .bind(league_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        // The note is the audit record for this irreversible action
        tracing::info!(
            league_id = %league_id,
            owner = %caller_id,
            note = %note,
            "League deleted"
        );

        Ok(())
    }
}
