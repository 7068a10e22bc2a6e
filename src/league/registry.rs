use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::ApiError;
use crate::league::validation::LeagueValidator;
use crate::models::league::{
    CreateLeagueRequest, CreatedLeague, LeagueSummary, LeagueVisibility, MembershipResult,
    MyLeague,
};
use crate::models::membership::MemberStatus;
use crate::utils::join_code::generate_join_code;

/// League creation, discovery and admission.
///
/// Capacity and duplicate-membership checks run at commit time inside a
/// transaction holding the league row lock, so concurrent joins against
/// the same league serialize instead of both pre-checking a stale count.
pub struct LeagueRegistry {
    pool: PgPool,
    validator: LeagueValidator,
}

impl LeagueRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            validator: LeagueValidator::new(),
        }
    }

    /// Create a league. The caller becomes owner and sole initial member;
    /// private leagues get a generated join code. Filters (`rules`,
    /// `allowed_formats`, date range) are fixed here for good: no update
    /// path exists for them.
    pub async fn create_league(
        &self,
        owner_id: Uuid,
        request: CreateLeagueRequest,
    ) -> Result<CreatedLeague, ApiError> {
        self.validator.validate_create_league(&request)?;

        let league_id = Uuid::new_v4();
        let join_code = match request.visibility {
            LeagueVisibility::Private => Some(generate_join_code()),
            LeagueVisibility::Public => None,
        };
        let rules = request.rules.unwrap_or_else(|| serde_json::json!({}));
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO leagues
                (id, name, description, visibility, owner_user_id, max_users,
                 start_date, end_date, allowed_formats, rules, update_policy,
                 join_code, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            "#,
        )
        .bind(league_id)
        .bind(request.name.trim())
        .bind(&request.description)
        .bind(request.visibility.as_str())
        .bind(owner_id)
        .bind(request.max_users)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(&request.allowed_formats)
        .bind(&rules)
        .bind(request.update_policy.as_str())
        .bind(&join_code)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        // The owner is admitted in the same transaction that creates the
        // league, so no league is ever observed without its owner member.
        sqlx::query(
            r#"
            INSERT INTO league_members (id, league_id, user_id, status, joined_at, updated_at)
            VALUES ($1, $2, $3, 'active', $4, $4)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(league_id)
        .bind(owner_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("Created league {} owned by {}", league_id, owner_id);

        Ok(CreatedLeague {
            league_id,
            join_code,
        })
    }

    /// All public leagues, regardless of caller membership.
    pub async fn discover_public(&self) -> Result<Vec<LeagueSummary>, ApiError> {
        let leagues = sqlx::query_as::<_, LeagueSummary>(
            r#"
            SELECT
                l.id,
                l.name,
                l.description,
                l.visibility,
                u.username AS owner_username,
                l.max_users,
                (SELECT COUNT(*) FROM league_members m
                 WHERE m.league_id = l.id AND m.status = 'active') AS member_count,
                l.start_date,
                l.end_date,
                l.allowed_formats,
                l.update_policy
            FROM leagues l
            JOIN users u ON u.id = l.owner_user_id
            WHERE l.visibility = 'public'
            ORDER BY l.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(leagues)
    }

    /// Leagues the caller holds an active membership in. This is the one
    /// read path that emits join codes: the membership join in the query
    /// is the authorization predicate.
    pub async fn list_my_leagues(&self, user_id: Uuid) -> Result<Vec<MyLeague>, ApiError> {
        let leagues = sqlx::query_as::<_, MyLeague>(
            r#"
            SELECT
                l.id,
                l.name,
                l.description,
                l.visibility,
                l.owner_user_id,
                l.max_users,
                (SELECT COUNT(*) FROM league_members m2
                 WHERE m2.league_id = l.id AND m2.status = 'active') AS member_count,
                l.start_date,
                l.end_date,
                l.update_policy,
                l.join_code,
                m.joined_at
            FROM leagues l
            JOIN league_members m ON m.league_id = l.id
            WHERE m.user_id = $1 AND m.status = 'active'
            ORDER BY m.joined_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(leagues)
    }

    /// Join a private league by its join code.
    pub async fn join_by_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> Result<MembershipResult, ApiError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ApiError::validation("Join code cannot be empty"));
        }

        let mut tx = self.pool.begin().await?;

        let (league_id, league_name, max_users) =
            sqlx::query_as::<_, (Uuid, String, i32)>(
                "SELECT id, name, max_users FROM leagues WHERE join_code = $1 FOR UPDATE",
            )
            .bind(&code)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("No league matches this join code"))?;

        let result = admit_member(&mut tx, league_id, &league_name, max_users, user_id).await?;
        tx.commit().await?;

        Ok(result)
    }

    /// Join a public league directly. Private leagues are not valid
    /// targets here and report as not found.
    pub async fn join_public(
        &self,
        user_id: Uuid,
        league_id: Uuid,
    ) -> Result<MembershipResult, ApiError> {
        let mut tx = self.pool.begin().await?;

        let (league_id, league_name, max_users) =
            sqlx::query_as::<_, (Uuid, String, i32)>(
                "SELECT id, name, max_users FROM leagues \
                 WHERE id = $1 AND visibility = 'public' FOR UPDATE",
            )
            .bind(league_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| ApiError::not_found("League not found"))?;

        let result = admit_member(&mut tx, league_id, &league_name, max_users, user_id).await?;
        tx.commit().await?;

        Ok(result)
    }
}

/// Shared admission path. The caller holds the league row lock, so the
/// active-member count cannot move under us.
async fn admit_member(
    tx: &mut Transaction<'_, Postgres>,
    league_id: Uuid,
    league_name: &str,
    max_users: i32,
    user_id: Uuid,
) -> Result<MembershipResult, ApiError> {
    let existing = sqlx::query_as::<_, (Uuid, MemberStatus)>(
        "SELECT id, status FROM league_members \
         WHERE league_id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(league_id)
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?;

    if matches!(existing, Some((_, MemberStatus::Active))) {
        return Err(ApiError::Conflict(
            "You are already a member of this league".into(),
        ));
    }

    let active_members: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM league_members WHERE league_id = $1 AND status = 'active'",
    )
    .bind(league_id)
    .fetch_one(&mut **tx)
    .await?;

    if active_members >= max_users as i64 {
        return Err(ApiError::Capacity("This league is already full".into()));
    }

    let now = Utc::now();
    match existing {
        // A previously removed member re-joins by reviving their row,
        // keeping one row per (league, user)
        Some((member_id, _)) => {
            sqlx::query(
                "UPDATE league_members \
                 SET status = 'active', note = NULL, joined_at = $2, updated_at = $2 \
                 WHERE id = $1",
            )
            .bind(member_id)
            .bind(now)
            .execute(&mut **tx)
            .await?;
        }
        None => {
            sqlx::query(
                "INSERT INTO league_members (id, league_id, user_id, status, joined_at, updated_at) \
                 VALUES ($1, $2, $3, 'active', $4, $4)",
            )
            .bind(Uuid::new_v4())
            .bind(league_id)
            .bind(user_id)
            .bind(now)
            .execute(&mut **tx)
            .await?;
        }
    }

    tracing::info!("User {} joined league {}", user_id, league_id);

    Ok(MembershipResult {
        league_id,
        league_name: league_name.to_string(),
        joined_at: now,
    })
}
