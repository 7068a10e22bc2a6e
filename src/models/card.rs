// src/models/card.rs
//
// League cards are minted into a league by the external card/pack
// service; this service reads them when composing rosters.
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A card the caller may select into their roster, flagged with whether
/// it currently is selected.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct EligibleCard {
    pub id: Uuid,
    pub backing_card_id: Option<Uuid>,
    pub player_name: String,
    pub player_role: String,
    pub player_team: String,
    pub image_url: Option<String>,
    pub is_selected: bool,
}
