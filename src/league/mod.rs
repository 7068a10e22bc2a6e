pub mod captaincy;
pub mod deletion;
pub(crate) mod helpers;
pub mod leaderboard;
pub mod membership;
pub mod registry;
pub mod roster;
pub mod validation;
