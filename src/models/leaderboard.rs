// src/models/leaderboard.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One leaderboard row as supplied by the external scoring engine.
/// Rank is authoritative; rows are never re-sorted by a different key.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub username: String,
    pub total_points: i32,
    pub rank: i32,
}
