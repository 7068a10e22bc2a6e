// src/models/membership.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Removed,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MemberInfo {
    pub user_id: Uuid,
    pub username: String,
    pub status: MemberStatus,
    pub is_owner: bool,
    pub joined_at: DateTime<Utc>,
}

/// Restricted projection served to non-members of a private league.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PublicMemberInfo {
    pub username: String,
    pub joined_at: DateTime<Utc>,
}

/// Member listing, tagged with how much the caller was allowed to see.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum MemberListing {
    Full {
        league_name: String,
        join_code: Option<String>,
        members: Vec<MemberInfo>,
    },
    Restricted {
        league_name: String,
        members: Vec<PublicMemberInfo>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KickMemberRequest {
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLeagueRequest {
    pub note: String,
}
