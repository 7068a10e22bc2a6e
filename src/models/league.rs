// src/models/league.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeagueVisibility {
    Public,
    Private,
}

impl LeagueVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeagueVisibility::Public => "public",
            LeagueVisibility::Private => "private",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    LockPerGameweek,
    LockOnSubmit,
    Live,
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::LockPerGameweek => "lock_per_gameweek",
            UpdatePolicy::LockOnSubmit => "lock_on_submit",
            UpdatePolicy::Live => "live",
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct League {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub owner_user_id: Uuid,
    pub max_users: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    // Empty = every match format is allowed
    pub allowed_formats: Vec<String>,
    // Opaque structured filter, fixed at creation
    pub rules: serde_json::Value,
    pub update_policy: UpdatePolicy,
    #[serde(skip_serializing, default)]
    pub join_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl League {
    /// Join codes are only ever revealed to current members of a private
    /// league. Evaluated explicitly before the field is emitted anywhere.
    pub fn join_code_visible_to(&self, is_member: bool) -> Option<&str> {
        match self.visibility {
            LeagueVisibility::Private if is_member => self.join_code.as_deref(),
            _ => None,
        }
    }
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateLeagueRequest {
    pub name: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub max_users: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub allowed_formats: Vec<String>,
    #[serde(default)]
    pub rules: Option<serde_json::Value>,
    pub update_policy: UpdatePolicy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedLeague {
    pub league_id: Uuid,
    pub join_code: Option<String>,
}

/// Public projection of a league. Never carries the join code.
#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub owner_username: String,
    pub max_users: i32,
    pub member_count: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub allowed_formats: Vec<String>,
    pub update_policy: UpdatePolicy,
}

/// A league the caller belongs to, with their membership info attached.
#[derive(Debug, FromRow, Serialize, Deserialize)]
pub struct MyLeague {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub visibility: LeagueVisibility,
    pub owner_user_id: Uuid,
    pub max_users: i32,
    pub member_count: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub update_policy: UpdatePolicy,
    // Only populated for private leagues; caller is a member by query
    // construction, which is exactly the visibility predicate
    pub join_code: Option<String>,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinByCodeRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MembershipResult {
    pub league_id: Uuid,
    pub league_name: String,
    pub joined_at: DateTime<Utc>,
}
