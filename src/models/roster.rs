// src/models/roster.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user's roster submission for one league.
///
/// Invariants (enforced transactionally, visible in every read):
/// - captain/vice-captain, if set, reference cards in the selection set
/// - captain != vice-captain when both are set
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Roster {
    pub id: Uuid,
    pub league_id: Uuid,
    pub user_id: Uuid,
    pub captain_card_id: Option<Uuid>,
    pub vice_captain_card_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RosterView {
    #[serde(flatten)]
    pub roster: Roster,
    pub selection: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetSelectionRequest {
    pub card_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetCaptainsRequest {
    pub captain_id: Option<Uuid>,
    pub vice_captain_id: Option<Uuid>,
}
