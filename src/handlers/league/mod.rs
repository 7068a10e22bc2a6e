pub mod captaincy_handler;
pub mod leaderboard_handler;
pub mod league_handler;
pub mod member_handler;
pub mod roster_handler;

use uuid::Uuid;

use crate::errors::ApiError;
use crate::middleware::auth::Claims;

/// Resolve the authenticated user's id from the JWT claims. Every core
/// operation receives this explicitly.
pub(crate) fn caller_id(claims: &Claims) -> Result<Uuid, ApiError> {
    claims
        .user_id()
        .ok_or_else(|| ApiError::Auth("Invalid user ID in token".into()))
}
